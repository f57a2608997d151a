//! Events emitted by the engine for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{GameKind, Outcome, SceneTag};

/// Feedback events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new scene finished its setup.
    SceneEntered { scene: SceneTag },
    /// Points were added to the running score.
    Scored { points: u32, total: u32 },
    /// A scored scene reached its terminal condition.
    GameOver { game: GameKind, outcome: Outcome },
    /// A new high score was written to the store.
    HighScoreSaved { game: GameKind, score: u32 },
    /// A particle burst was spawned.
    Burst { x: f32, y: f32, count: u32 },
    /// The animation studio changed its visible frame.
    FrameShown { index: usize, total: usize },
}
