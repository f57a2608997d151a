//! Click counter against a countdown.

use glam::Vec2;
use hecs::Entity;

use clicktech_core::commands::InputEvent;
use clicktech_core::components::Body;
use clicktech_core::constants::*;
use clicktech_core::enums::{EntityKind, GameKind, Outcome};
use clicktech_core::types::{Color, Shape};

use super::{SimContext, Simulator, Task};
use crate::world::World;
use crate::world_setup;

/// Travel of the button while pressed.
const PRESS_DEPTH: f32 = 2.0;

pub struct ClickerGame {
    world: World,
    duration: u32,
    remaining: u32,
    clicks: u32,
    /// Base block and trapezoid top.
    button: Vec<Entity>,
}

impl ClickerGame {
    pub fn new(duration: u32) -> Self {
        Self {
            world: World::new(),
            duration,
            remaining: duration,
            clicks: 0,
            button: Vec::new(),
        }
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn button_contains(&self, point: Vec2) -> bool {
        self.button
            .iter()
            .filter_map(|part| self.world.bbox(*part))
            .any(|bounds| bounds.contains(point))
    }

    fn shift_button(&mut self, dy: f32) {
        for part in self.button.clone() {
            self.world.translate(part, Vec2::new(0.0, dy));
        }
    }

    fn press(&mut self, point: Vec2, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() || !self.button_contains(point) {
            return;
        }
        self.clicks += 1;
        ctx.add_score(1);
        self.shift_button(PRESS_DEPTH);
        ctx.after(CLICKER_PRESS_MS, Task::ButtonRelease);
        ctx.burst(&mut self.world, point, Color::YELLOW);
    }
}

impl Simulator for ClickerGame {
    fn kind(&self) -> GameKind {
        GameKind::Clicker
    }

    fn setup(&mut self, ctx: &mut SimContext<'_>) {
        world_setup::spawn_clouds(&mut self.world, ctx.rng);

        let y = (HEIGHT / 2.0).floor();
        let x1 = WIDTH / 2.0 - 40.0;
        let x2 = WIDTH / 2.0 + 40.0;
        let base = self.world.spawn(
            EntityKind::ClickButton,
            Body::new(Shape::rect(x1, y, x2, y + 20.0), Color::DARK_GRAY),
        );
        let top = self.world.spawn(
            EntityKind::ClickButton,
            Body::new(
                Shape::Polygon {
                    points: vec![
                        Vec2::new(x1, y),
                        Vec2::new(x2, y),
                        Vec2::new(x2 - 10.0, y - 20.0),
                        Vec2::new(x1 + 10.0, y - 20.0),
                    ],
                },
                Color::RED,
            )
            .with_outline(Color::DARK_RED),
        );
        self.button = vec![base, top];

        self.remaining = self.duration;
        ctx.session.timer = Some(self.remaining);

        ctx.every(CLICKER_COUNTDOWN_MS, Task::Countdown);
        ctx.every(CLOUD_INTERVAL_MS, Task::DriftClouds);
        ctx.every(PARTICLE_INTERVAL_MS, Task::Particles);
    }

    fn on_task(&mut self, task: Task, ctx: &mut SimContext<'_>) {
        match task {
            Task::Countdown => {
                if ctx.is_finished() {
                    return;
                }
                self.remaining = self.remaining.saturating_sub(1);
                ctx.session.timer = Some(self.remaining);
                if self.remaining == 0 {
                    ctx.finish(Outcome::TimeUp {
                        clicks: self.clicks,
                    });
                }
            }
            Task::ButtonRelease => self.shift_button(-PRESS_DEPTH),
            _ => {}
        }
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SimContext<'_>) {
        if let InputEvent::PointerDown { x, y } = *input {
            self.press(Vec2::new(x, y), ctx);
        }
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn background(&self) -> Color {
        Color::SKY_BLUE
    }
}
