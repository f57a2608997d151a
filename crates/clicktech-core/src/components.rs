//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behaviour beyond trivial
//! accessors. Game logic lives in the scene simulators and systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::types::{Aabb, Color, Shape};

/// Tag naming the collection an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kind(pub EntityKind);

/// Visible geometry plus paint attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub shape: Shape,
    pub fill: Color,
    pub outline: Option<Color>,
    /// Hidden bodies still collide; they are only skipped when drawing.
    pub hidden: bool,
}

impl Body {
    pub fn new(shape: Shape, fill: Color) -> Self {
        Self {
            shape,
            fill,
            outline: None,
            hidden: false,
        }
    }

    pub fn with_outline(mut self, outline: Color) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn bbox(&self) -> Option<Aabb> {
        self.shape.bbox()
    }
}

/// Constant per-tick displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Remaining ticks before a short-lived effect is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
    pub ticks_left: u32,
}

/// Friendly defense unit pursuit state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseUnit {
    pub name: String,
    /// Horizontal step applied every tick until changed.
    pub held_step: f32,
    /// Horizontal center of the hazard pursued on the last tick.
    pub last_target_x: Option<f32>,
}

/// Horizontal drift of a background cloud (pixels per drift tick, negative = left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudDrift {
    pub speed: f32,
}

/// Stable identity of an animation-studio shape across recorded frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Marks an entity that reacts to pointer drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movable;
