//! Snapshot builder: reads the active scene world and produces a
//! `SceneSnapshot` for the renderer.

use clicktech_core::enums::SceneTag;
use clicktech_core::events::GameEvent;
use clicktech_core::state::{HudView, MenuView, SceneSnapshot};
use clicktech_core::types::Color;

use crate::world::World;

/// Overlays drawn on top of the world by the renderer.
#[derive(Debug, Clone, Default)]
pub struct Overlays {
    pub hud: Option<HudView>,
    pub menu: Option<MenuView>,
    pub message: Option<String>,
}

pub fn build_snapshot(
    scene: SceneTag,
    clock_ms: u64,
    background: Color,
    world: &World,
    overlays: Overlays,
    events: Vec<GameEvent>,
) -> SceneSnapshot {
    SceneSnapshot {
        scene,
        clock_ms,
        background,
        items: world.draw_items(),
        hud: overlays.hud,
        menu: overlays.menu,
        message: overlays.message,
        events,
    }
}
