//! Pursuit controller.
//!
//! Pure functions that pick a target and a horizontal step for one unit.
//! No ECS dependency; operates on plain boxes. Randomness is injected
//! so callers control determinism.

use rand::Rng;

use clicktech_core::types::Aabb;

use crate::profiles::PursuitProfile;

/// Input to the controller for a single unit.
pub struct PursuitContext<'a> {
    /// Current extents of the unit.
    pub unit: Aabb,
    /// Step the unit is currently holding.
    pub held_step: f32,
    /// Hazard boxes in scan order.
    pub hazards: &'a [Aabb],
}

/// Hazard selected for pursuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// Horizontal center of the hazard.
    pub center_x: f32,
    /// Vertical gap between the hazard's lower edge and the unit's upper edge.
    pub distance: f32,
}

/// Output from the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitUpdate {
    /// Step to hold from now on.
    pub step: f32,
    pub target: Option<Target>,
}

/// Position correction after clamping to the play field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamp {
    /// Horizontal shift that brings the unit back inside.
    pub correction: f32,
    /// Held step after clamping, pointing away from the edge that was hit.
    pub step: f32,
}

/// Nearest incoming hazard: lower edge strictly above the unit's upper edge,
/// minimum vertical gap, first in scan order on ties.
pub fn select_target(unit: &Aabb, hazards: &[Aabb]) -> Option<Target> {
    let mut best: Option<Target> = None;
    for hazard in hazards {
        if hazard.max_y >= unit.min_y {
            continue;
        }
        let distance = unit.min_y - hazard.max_y;
        if let Some(current) = best {
            if distance >= current.distance {
                continue;
            }
        }
        best = Some(Target {
            center_x: hazard.center_x(),
            distance,
        });
    }
    best
}

/// Decide the step for one tick.
pub fn evaluate<R: Rng + ?Sized>(
    ctx: &PursuitContext<'_>,
    profile: &PursuitProfile,
    rng: &mut R,
) -> PursuitUpdate {
    match select_target(&ctx.unit, ctx.hazards) {
        Some(target) => PursuitUpdate {
            step: track_step(ctx.unit.center_x(), target.center_x, profile),
            target: Some(target),
        },
        None => PursuitUpdate {
            step: idle_step(ctx.held_step, profile, rng),
            target: None,
        },
    }
}

/// Step toward `target_x`, or hold inside the dead zone.
pub fn track_step(unit_x: f32, target_x: f32, profile: &PursuitProfile) -> f32 {
    if target_x < unit_x - profile.dead_zone {
        -profile.step
    } else if target_x > unit_x + profile.dead_zone {
        profile.step
    } else {
        0.0
    }
}

/// Idle drift: occasionally re-roll, otherwise keep the held step.
pub fn idle_step<R: Rng + ?Sized>(held_step: f32, profile: &PursuitProfile, rng: &mut R) -> f32 {
    if profile.drift_steps.is_empty() || rng.gen::<f64>() >= profile.drift_chance {
        return held_step;
    }
    profile.drift_steps[rng.gen_range(0..profile.drift_steps.len())]
}

/// Keep a unit inside `[min_x, max_x]`, flipping the held step away from
/// the edge it crossed. Returns `None` when no correction is needed.
pub fn clamp_to_field(unit: &Aabb, step: f32, min_x: f32, max_x: f32) -> Option<Clamp> {
    if unit.min_x < min_x {
        Some(Clamp {
            correction: min_x - unit.min_x,
            step: step.abs(),
        })
    } else if unit.max_x > max_x {
        Some(Clamp {
            correction: max_x - unit.max_x,
            step: -step.abs(),
        })
    } else {
        None
    }
}

/// Fire-and-forget roll for this tick.
pub fn wants_to_fire<R: Rng + ?Sized>(profile: &PursuitProfile, rng: &mut R) -> bool {
    rng.gen::<f64>() < profile.fire_chance
}
