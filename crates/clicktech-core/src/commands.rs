//! Input commands delivered by the host to the active scene.
//!
//! Commands are handled synchronously between scheduled ticks.

use serde::{Deserialize, Serialize};

/// Discrete keys the arcade reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
    /// Any printable key, lower-cased by the host.
    Char(char),
}

/// All possible input events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    KeyDown { key: Key },
    /// Primary button pressed at canvas coordinates.
    PointerDown { x: f32, y: f32 },
    /// Pointer moved while the primary button is held.
    PointerDrag { x: f32, y: f32 },
    /// Primary button released.
    PointerUp { x: f32, y: f32 },
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown { key }
    }
}
