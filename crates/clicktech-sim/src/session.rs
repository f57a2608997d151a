//! Per-scene score and terminal state.

use clicktech_core::enums::Outcome;

/// Score state for the running scene. Reset on every scene entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub points: u32,
    /// Remaining seconds for timed scenes.
    pub timer: Option<u32>,
    pub outcome: Option<Outcome>,
    /// Set when the outcome is first recorded, cleared once the engine
    /// has persisted the high score for it.
    pending_outcome: bool,
}

impl Session {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add points and return the new total.
    pub fn add(&mut self, points: u32) -> u32 {
        self.points = self.points.saturating_add(points);
        self.points
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record the terminal outcome. Only the first call counts.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        self.pending_outcome = true;
        true
    }

    /// Outcome reached since the last call, if any.
    pub fn take_pending(&mut self) -> Option<Outcome> {
        if !self.pending_outcome {
            return None;
        }
        self.pending_outcome = false;
        self.outcome
    }
}
