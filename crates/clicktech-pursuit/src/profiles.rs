//! Tuning profile for pursuing units.
//!
//! Consolidates the per-unit parameters consumed by the controller.

use clicktech_core::constants::*;

/// Behavioral parameters of a pursuing unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitProfile {
    /// Horizontal step toward a target (pixels per tick).
    pub step: f32,
    /// Half-width of the hold band around the unit center.
    pub dead_zone: f32,
    /// Chance per tick of re-rolling the idle drift step.
    pub drift_chance: f64,
    /// Candidate idle drift steps.
    pub drift_steps: &'static [f32],
    /// Chance per tick of firing.
    pub fire_chance: f64,
}

impl Default for PursuitProfile {
    fn default() -> Self {
        Self::defense_unit()
    }
}

impl PursuitProfile {
    /// Profile used by the two guards of the defense scene.
    pub fn defense_unit() -> Self {
        Self {
            step: PURSUIT_STEP,
            dead_zone: PURSUIT_DEAD_ZONE,
            drift_chance: IDLE_DRIFT_CHANCE,
            drift_steps: &IDLE_DRIFT_STEPS,
            fire_chance: UNIT_FIRE_CHANCE,
        }
    }
}
