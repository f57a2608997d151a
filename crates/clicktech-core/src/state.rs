//! Scene snapshot: the complete visible state handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::enums::SceneTag;
use crate::events::GameEvent;
use crate::types::{Color, Shape};

/// Everything a drawing surface needs to paint one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub scene: SceneTag,
    /// Virtual clock in milliseconds.
    pub clock_ms: u64,
    pub background: Color,
    /// Items in paint order, back to front.
    pub items: Vec<DrawItem>,
    pub hud: Option<HudView>,
    pub menu: Option<MenuView>,
    /// End-state message of a finished scene.
    pub message: Option<String>,
    pub events: Vec<GameEvent>,
}

/// One canvas item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    /// Stable for the lifetime of the entity.
    pub id: u64,
    pub shape: Shape,
    pub fill: Color,
    pub outline: Option<Color>,
}

/// Score line shown while a scored scene runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    /// Remaining seconds, for timed scenes.
    pub timer: Option<u32>,
    pub high_score: u32,
}

/// Navigable list of entries (main menu, clicker duration picker).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuView {
    pub title: String,
    /// Informational lines above the entries (high scores).
    pub lines: Vec<String>,
    pub entries: Vec<String>,
    /// Index of the single highlighted entry.
    pub selected: usize,
}
