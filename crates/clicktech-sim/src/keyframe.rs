//! Keyframe capture and navigation.
//!
//! A `Frame` maps stable shape ids to a typed snapshot of each shape. The
//! sequence is a discrete slideshow: loading a frame replaces the live
//! shapes, nothing is interpolated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use clicktech_core::components::{Body, ShapeId};
use clicktech_core::types::{Aabb, Color, Shape};

/// Recorded state of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ShapeSnapshot {
    Oval { bounds: Aabb, fill: Color },
    Rectangle { bounds: Aabb, fill: Color },
}

impl ShapeSnapshot {
    /// `None` for shapes the studio does not animate.
    pub fn capture(body: &Body) -> Option<Self> {
        match body.shape {
            Shape::Oval { bounds } => Some(ShapeSnapshot::Oval {
                bounds,
                fill: body.fill,
            }),
            Shape::Rect { bounds } => Some(ShapeSnapshot::Rectangle {
                bounds,
                fill: body.fill,
            }),
            _ => None,
        }
    }

    pub fn to_body(&self) -> Body {
        match *self {
            ShapeSnapshot::Oval { bounds, fill } => Body::new(Shape::Oval { bounds }, fill),
            ShapeSnapshot::Rectangle { bounds, fill } => Body::new(Shape::Rect { bounds }, fill),
        }
        .with_outline(Color::BLACK)
    }
}

pub type Frame = BTreeMap<ShapeId, ShapeSnapshot>;

/// Ordered frames plus the cursor of the frame on display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    cursor: usize,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.cursor)
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// An empty frame is only accepted as the very first one.
    pub fn accepts(&self, frame: &Frame) -> bool {
        !frame.is_empty() || self.frames.is_empty()
    }

    /// Insert right after the cursor and move the cursor onto it.
    /// Returns the new cursor, or `None` when the frame is rejected.
    pub fn insert_after_cursor(&mut self, frame: Frame) -> Option<usize> {
        if !self.accepts(&frame) {
            return None;
        }
        if self.frames.is_empty() {
            self.frames.push(frame);
            self.cursor = 0;
        } else {
            self.cursor += 1;
            self.frames.insert(self.cursor, frame);
        }
        Some(self.cursor)
    }

    /// Move the cursor by `delta`, clamped to the valid range.
    pub fn step(&mut self, delta: isize) -> Option<&Frame> {
        let last = self.frames.len().checked_sub(1)?;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.current()
    }

    /// Playback advance, wrapping past the last frame.
    pub fn advance_wrapping(&mut self) -> Option<&Frame> {
        if self.frames.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.frames.len();
        self.current()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.cursor = 0;
    }

    /// 1-based position and total, for the "Frame: i/n" display.
    pub fn display_position(&self) -> (usize, usize) {
        if self.frames.is_empty() {
            (0, 0)
        } else {
            (self.cursor + 1, self.frames.len())
        }
    }
}
