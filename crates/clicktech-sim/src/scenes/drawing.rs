//! Freehand drawing on a white canvas with a palette panel at the bottom.

use glam::Vec2;

use clicktech_core::commands::InputEvent;
use clicktech_core::components::Body;
use clicktech_core::constants::*;
use clicktech_core::enums::{EntityKind, GameKind};
use clicktech_core::types::{Aabb, Anchor, Color, Shape};

use super::{SimContext, Simulator};
use crate::world::World;

const PALETTE: [Color; 6] = [
    Color::BLACK,
    Color::RED,
    Color::BLUE,
    Color::GREEN,
    Color::YELLOW,
    Color::WHITE,
];

const BRUSH_SIZES: [f32; 4] = [3.0, 6.0, 10.0, 20.0];

const PANEL_TOP: f32 = HEIGHT - DRAWING_PANEL_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PanelAction {
    Color(Color),
    Size(f32),
    Clear,
}

pub struct DrawingStudio {
    world: World,
    color: Color,
    size: f32,
    last: Option<Vec2>,
    buttons: Vec<(Aabb, PanelAction)>,
}

impl DrawingStudio {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            color: Color::BLACK,
            size: DEFAULT_BRUSH_SIZE,
            last: None,
            buttons: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn brush_size(&self) -> f32 {
        self.size
    }

    pub fn stroke_count(&self) -> usize {
        self.world.count(EntityKind::Stroke)
    }

    /// Remove every stroke, keeping the panel.
    pub fn clear(&mut self) {
        self.world.despawn_kind(EntityKind::Stroke);
    }

    fn add_button(&mut self, bounds: Aabb, fill: Color, label: &str, action: PanelAction) {
        self.world.spawn(
            EntityKind::Panel,
            Body::new(Shape::Rect { bounds }, fill).with_outline(Color::GRAY50),
        );
        if !label.is_empty() {
            let text_fill = if fill == Color::RED {
                Color::WHITE
            } else {
                Color::BLACK
            };
            self.world.spawn(
                EntityKind::Panel,
                Body::new(
                    Shape::text(bounds.center(), label, 8, Anchor::Center),
                    text_fill,
                ),
            );
        }
        self.buttons.push((bounds, action));
    }

    fn build_panel(&mut self) {
        self.world.spawn(
            EntityKind::Panel,
            Body::new(Shape::rect(0.0, PANEL_TOP, WIDTH, HEIGHT), Color::GRAY80),
        );
        let row_y = HEIGHT - 20.0;
        let mut x = 10.0;
        for color in PALETTE {
            let bounds = Aabb::from_center(Vec2::new(x, row_y), Vec2::new(10.0, 10.0));
            self.add_button(bounds, color, "", PanelAction::Color(color));
            x += 30.0;
        }
        for size in BRUSH_SIZES {
            let bounds = Aabb::from_center(Vec2::new(x + 10.0, row_y), Vec2::new(14.0, 10.0));
            self.add_button(
                bounds,
                Color::WHITE,
                &format!("{size}"),
                PanelAction::Size(size),
            );
            x += 40.0;
        }
        let bounds = Aabb::from_center(Vec2::new(WIDTH - 50.0, row_y), Vec2::new(24.0, 12.0));
        self.add_button(bounds, Color::RED, "Clear", PanelAction::Clear);
    }

    fn press_panel(&mut self, point: Vec2) {
        let action = self
            .buttons
            .iter()
            .find(|(bounds, _)| bounds.contains(point))
            .map(|(_, action)| *action);
        match action {
            Some(PanelAction::Color(color)) => self.color = color,
            Some(PanelAction::Size(size)) => self.size = size,
            Some(PanelAction::Clear) => self.clear(),
            None => {}
        }
    }
}

impl Default for DrawingStudio {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for DrawingStudio {
    fn kind(&self) -> GameKind {
        GameKind::Drawing
    }

    fn setup(&mut self, _ctx: &mut SimContext<'_>) {
        self.build_panel();
    }

    fn handle_input(&mut self, input: &InputEvent, _ctx: &mut SimContext<'_>) {
        match *input {
            InputEvent::PointerDown { x, y } => {
                let point = Vec2::new(x, y);
                if y > PANEL_TOP {
                    self.last = None;
                    self.press_panel(point);
                } else {
                    self.last = Some(point);
                }
            }
            InputEvent::PointerDrag { x, y } => {
                if y > PANEL_TOP {
                    return;
                }
                let point = Vec2::new(x, y);
                if let Some(from) = self.last {
                    self.world.spawn(
                        EntityKind::Stroke,
                        Body::new(
                            Shape::Line {
                                from,
                                to: point,
                                width: self.size,
                            },
                            self.color,
                        ),
                    );
                }
                self.last = Some(point);
            }
            InputEvent::PointerUp { .. } => self.last = None,
            InputEvent::KeyDown { .. } => {}
        }
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn background(&self) -> Color {
        Color::WHITE
    }
}
