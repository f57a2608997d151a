//! Fundamental geometric types.
//!
//! All coordinates are canvas pixels with the origin at the top-left
//! corner and y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    /// Build a box from two corners given in any order.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(
            center.x - half_extents.x,
            center.y - half_extents.y,
            center.x + half_extents.x,
            center.y + half_extents.y,
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min_x: self.min_x + delta.x,
            min_y: self.min_y + delta.y,
            max_x: self.max_x + delta.x,
            max_y: self.max_y + delta.y,
        }
    }

    /// Point containment, edges inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Smallest box enclosing both.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Text anchoring relative to the text position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    #[default]
    Center,
    /// Left edge at the position.
    West,
    /// Right edge at the position.
    East,
}

/// Drawable geometry of a single canvas item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Rect { bounds: Aabb },
    Oval { bounds: Aabb },
    Polygon { points: Vec<Vec2> },
    Line { from: Vec2, to: Vec2, width: f32 },
    Text {
        at: Vec2,
        text: String,
        size: u16,
        anchor: Anchor,
    },
}

impl Shape {
    pub fn rect(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Shape::Rect {
            bounds: Aabb::new(x1, y1, x2, y2),
        }
    }

    pub fn oval(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Shape::Oval {
            bounds: Aabb::new(x1, y1, x2, y2),
        }
    }

    pub fn text(at: Vec2, text: impl Into<String>, size: u16, anchor: Anchor) -> Self {
        Shape::Text {
            at,
            text: text.into(),
            size,
            anchor,
        }
    }

    /// Current extents, or `None` for shapes that never take part in
    /// collision (text, empty polygons).
    pub fn bbox(&self) -> Option<Aabb> {
        match self {
            Shape::Rect { bounds } | Shape::Oval { bounds } => Some(*bounds),
            Shape::Polygon { points } => {
                let first = points.first()?;
                let seed = Aabb::new(first.x, first.y, first.x, first.y);
                Some(points.iter().skip(1).fold(seed, |acc, p| {
                    acc.union(&Aabb::new(p.x, p.y, p.x, p.y))
                }))
            }
            Shape::Line { from, to, .. } => Some(Aabb::new(from.x, from.y, to.x, to.y)),
            Shape::Text { .. } => None,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Rect { bounds } | Shape::Oval { bounds } => *bounds = bounds.translated(delta),
            Shape::Polygon { points } => {
                for p in points.iter_mut() {
                    *p += delta;
                }
            }
            Shape::Line { from, to, .. } => {
                *from += delta;
                *to += delta;
            }
            Shape::Text { at, .. } => *at += delta,
        }
    }

    /// Replace the label of a text item. No-op for other shapes.
    pub fn set_text(&mut self, value: impl Into<String>) {
        if let Shape::Text { text, .. } = self {
            *text = value.into();
        }
    }
}

/// Opaque RGB fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);
    pub const LIME: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const DARK_BLUE: Color = Color::rgb(0, 0, 139);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const GRAY: Color = Color::rgb(190, 190, 190);
    pub const DARK_GRAY: Color = Color::rgb(169, 169, 169);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const GRAY10: Color = Color::rgb(26, 26, 26);
    pub const GRAY20: Color = Color::rgb(51, 51, 51);
    pub const GRAY30: Color = Color::rgb(77, 77, 77);
    pub const GRAY50: Color = Color::rgb(127, 127, 127);
    pub const GRAY80: Color = Color::rgb(204, 204, 204);
    pub const SKY_BLUE: Color = Color::rgb(135, 206, 235);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const CLOUD_SHADOW: Color = Color::rgb(0xe0, 0xe0, 0xe0);
    pub const GRASS: Color = Color::rgb(0x38, 0x76, 0x1d);
    pub const GRASS_EDGE: Color = Color::rgb(0x1e, 0x46, 0x00);
    pub const CONCRETE: Color = Color::rgb(0x5e, 0x5e, 0x5e);
    pub const CONCRETE_EDGE: Color = Color::rgb(0x33, 0x33, 0x33);
    pub const ROOF: Color = Color::rgb(0xa6, 0x4d, 0x79);
    pub const ROOF_EDGE: Color = Color::rgb(0x77, 0x2b, 0x52);
    pub const COCKPIT: Color = Color::rgb(0x2c, 0x3e, 0x50);
    pub const COCKPIT_CONSOLE: Color = Color::rgb(0x55, 0x55, 0x55);
    pub const COCKPIT_TRIM: Color = Color::rgb(0x77, 0x77, 0x77);

    /// `#rrggbb` form, as understood by most drawing surfaces.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
