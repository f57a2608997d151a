//! Side-scrolling flight: dodge buildings, stay off the ground.
//!
//! In cockpit view the plane is hidden and the world moves opposite to the
//! player's input instead. The hidden plane still moves normally so
//! collision and altitude keep working.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;

use clicktech_core::commands::{InputEvent, Key};
use clicktech_core::components::Body;
use clicktech_core::constants::*;
use clicktech_core::enums::{EntityKind, GameKind, Outcome};
use clicktech_core::types::{Anchor, Color, Shape};

use super::{SimContext, Simulator, Task};
use crate::world::World;
use crate::world_setup;

const GROUND_Y: f32 = HEIGHT - FLIGHT_GROUND_HEIGHT;

pub struct FlightGame {
    world: World,
    plane: Option<Entity>,
    hud: Option<Entity>,
    cockpit: bool,
    speed: u32,
}

impl FlightGame {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            plane: None,
            hud: None,
            cockpit: false,
            speed: FLIGHT_BASE_SPEED,
        }
    }

    pub fn plane(&self) -> Option<Entity> {
        self.plane
    }

    pub fn is_cockpit(&self) -> bool {
        self.cockpit
    }

    /// Current forward speed in pixels per tick.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Building with its left edge at `x`, `width` wide and `height` tall,
    /// standing on the ground line.
    pub fn spawn_building(&mut self, x: f32, width: f32, height: f32) -> Entity {
        let body = self.world.spawn(
            EntityKind::Building,
            Body::new(
                Shape::rect(x, GROUND_Y - height, x + width, GROUND_Y),
                Color::CONCRETE,
            )
            .with_outline(Color::CONCRETE_EDGE),
        );
        let roof_height = (height / 8.0).floor();
        let roof = self.world.spawn(
            EntityKind::BuildingRoof,
            Body::new(
                Shape::rect(
                    x - 2.0,
                    GROUND_Y - height - roof_height,
                    x + width + 2.0,
                    GROUND_Y - height,
                ),
                Color::ROOF,
            )
            .with_outline(Color::ROOF_EDGE),
        );
        self.world.pair(body, roof);
        body
    }

    fn nudge(&mut self, delta: Vec2, ctx: &SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        let Some(plane) = self.plane else {
            return;
        };
        self.world.translate(plane, delta);
        if self.cockpit {
            for kind in [EntityKind::Building, EntityKind::Cloud, EntityKind::Ground] {
                self.world.translate_kind(kind, -delta);
            }
        }
    }

    fn toggle_cockpit(&mut self, ctx: &SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        self.cockpit = !self.cockpit;
        self.world.despawn_kind(EntityKind::Cockpit);
        if let Some(plane) = self.plane {
            self.world.set_hidden(plane, self.cockpit);
        }

        let (hud_at, hud_anchor, hud_fill) = if self.cockpit {
            self.spawn_cockpit_frame();
            (Vec2::new(WIDTH / 2.0, HEIGHT - 20.0), Anchor::Center, Color::WHITE)
        } else {
            (Vec2::new(10.0, 20.0), Anchor::West, Color::BLACK)
        };
        if let Some(body) = self.hud.and_then(|hud| self.world.body_mut(hud)) {
            if let Shape::Text { at, anchor, .. } = &mut body.shape {
                *at = hud_at;
                *anchor = hud_anchor;
            }
            body.fill = hud_fill;
        }
    }

    fn spawn_cockpit_frame(&mut self) {
        let center_x = WIDTH / 2.0;
        let center_y = HEIGHT * 0.95;
        let parts = [
            Body::new(
                Shape::Line {
                    from: Vec2::new(0.0, GROUND_Y),
                    to: Vec2::new(WIDTH, GROUND_Y),
                    width: 2.0,
                },
                Color::YELLOW,
            ),
            Body::new(Shape::rect(0.0, 0.0, 30.0, HEIGHT), Color::COCKPIT),
            Body::new(Shape::rect(WIDTH - 30.0, 0.0, WIDTH, HEIGHT), Color::COCKPIT),
            Body::new(
                Shape::Polygon {
                    points: vec![
                        Vec2::new(center_x - 50.0, HEIGHT),
                        Vec2::new(center_x + 50.0, HEIGHT),
                        Vec2::new(center_x + 15.0, center_y),
                        Vec2::new(center_x - 15.0, center_y),
                    ],
                },
                Color::COCKPIT_CONSOLE,
            )
            .with_outline(Color::COCKPIT_TRIM),
        ];
        for part in parts {
            self.world.spawn(EntityKind::Cockpit, part);
        }
    }

    fn crash(&mut self, outcome: Outcome, ctx: &mut SimContext<'_>) {
        if let Some(plane) = self.plane.take() {
            if let Some(bounds) = self.world.bbox(plane) {
                match outcome {
                    Outcome::CrashedOnGround => {
                        ctx.burst(&mut self.world, bounds.center().floor(), Color::DARK_GREEN)
                    }
                    _ => ctx.explosion(&mut self.world, bounds.center()),
                }
            }
            self.world.despawn(plane);
        }
        ctx.finish(outcome);
    }
}

impl Default for FlightGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for FlightGame {
    fn kind(&self) -> GameKind {
        GameKind::Flight
    }

    fn setup(&mut self, ctx: &mut SimContext<'_>) {
        world_setup::spawn_clouds(&mut self.world, ctx.rng);
        world_setup::spawn_ground(
            &mut self.world,
            FLIGHT_GROUND_HEIGHT,
            Some(Color::GRASS_EDGE),
        );

        let x = (WIDTH / 3.0).floor();
        let y = (HEIGHT / 2.0).floor();
        self.plane = Some(self.world.spawn(
            EntityKind::Plane,
            Body::new(
                Shape::Polygon {
                    points: vec![
                        Vec2::new(x, y),
                        Vec2::new(x - 20.0, y - 10.0),
                        Vec2::new(x - 20.0, y + 10.0),
                    ],
                },
                Color::GRAY,
            ),
        ));
        self.hud = Some(self.world.spawn(
            EntityKind::Hud,
            Body::new(
                Shape::text(
                    Vec2::new(10.0, 20.0),
                    "Alt: 0 | Spd: 0 | View: External",
                    12,
                    Anchor::West,
                ),
                Color::BLACK,
            ),
        ));

        ctx.every(FLIGHT_SPAWN_MS, Task::Spawn);
        ctx.every(FLIGHT_UPDATE_MS, Task::Update);
        ctx.every(CLOUD_INTERVAL_MS, Task::DriftClouds);
        ctx.every(PARTICLE_INTERVAL_MS, Task::Particles);
    }

    fn update(&mut self, ctx: &mut SimContext<'_>) {
        let Some(plane) = self.plane else {
            return;
        };
        if ctx.is_finished() {
            return;
        }
        self.speed = FLIGHT_BASE_SPEED + ctx.session.points / FLIGHT_SCORE_PER_SPEED;
        let scroll = Vec2::new(-(self.speed as f32), 0.0);

        for building in self.world.ids(EntityKind::Building) {
            self.world.translate(building, scroll);
            if self.world.bbox(building).is_some_and(|b| b.max_x < 0.0) {
                self.world.despawn(building);
                ctx.add_score(1);
                continue;
            }
            if self.world.collide(plane, building) {
                self.crash(Outcome::Crashed, ctx);
                return;
            }
        }

        self.world
            .translate(plane, Vec2::new((self.speed / 4) as f32, 0.0));

        let Some(bounds) = self.world.bbox(plane) else {
            return;
        };
        let center = bounds.center().floor();
        let altitude = (GROUND_Y - center.y).max(0.0);
        let view = if self.cockpit { "Cockpit" } else { "External" };
        if let Some(hud) = self.hud {
            self.world.set_text(
                hud,
                format!("Alt: {altitude:.0} | Spd: {} | View: {view}", self.speed),
            );
        }

        if bounds.max_y >= GROUND_Y {
            self.crash(Outcome::CrashedOnGround, ctx);
        }
    }

    fn spawn(&mut self, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        if ctx.rng.gen::<f64>() < BUILDING_SPAWN_CHANCE {
            let width = ctx.rng.gen_range(30..=50) as f32;
            let height = ctx.rng.gen_range(80..=160) as f32;
            self.spawn_building(WIDTH + 10.0, width, height);
        }
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SimContext<'_>) {
        let InputEvent::KeyDown { key } = input else {
            return;
        };
        match key {
            Key::Left => self.nudge(Vec2::new(-FLIGHT_STEP, 0.0), ctx),
            Key::Right => self.nudge(Vec2::new(FLIGHT_STEP, 0.0), ctx),
            Key::Up => self.nudge(Vec2::new(0.0, -FLIGHT_STEP), ctx),
            Key::Down => self.nudge(Vec2::new(0.0, FLIGHT_STEP), ctx),
            Key::Char('c') => self.toggle_cockpit(ctx),
            _ => {}
        }
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn background(&self) -> Color {
        Color::LIGHT_BLUE
    }
}
