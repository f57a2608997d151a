//! "Earth Protector": falling asteroids and hostile craft, a player ship
//! and two AI defense units.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;
use tracing::debug;

use clicktech_core::commands::{InputEvent, Key};
use clicktech_core::components::{Body, DefenseUnit, Velocity};
use clicktech_core::constants::*;
use clicktech_core::enums::{EntityKind, GameKind, Outcome};
use clicktech_core::types::{Aabb, Color, Shape};
use clicktech_pursuit::controller::{self, PursuitContext};
use clicktech_pursuit::profiles::PursuitProfile;

use super::{SimContext, Simulator, Task};
use crate::systems::movement;
use crate::world::World;
use crate::world_setup;

const GROUND_Y: f32 = HEIGHT - DEFENSE_GROUND_HEIGHT;

pub struct DefenseGame {
    world: World,
    ship: Option<Entity>,
    profile: PursuitProfile,
}

impl DefenseGame {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            ship: None,
            profile: PursuitProfile::defense_unit(),
        }
    }

    pub fn ship(&self) -> Option<Entity> {
        self.ship
    }

    pub fn units(&self) -> &[Entity] {
        self.world.entities(EntityKind::DefenseUnit)
    }

    /// Place an asteroid of diameter `size` with its top-left at `(x, y)`.
    pub fn spawn_asteroid(&mut self, x: f32, y: f32, size: f32) -> Entity {
        self.world.spawn_with(
            EntityKind::Asteroid,
            Body::new(Shape::oval(x, y, x + size, y + size), Color::DARK_GRAY),
            (Velocity(Vec2::new(0.0, ASTEROID_SPEED)),),
        )
    }

    pub fn spawn_hostile(&mut self, x: f32, y: f32) -> Entity {
        self.world.spawn_with(
            EntityKind::HostileCraft,
            Body::new(
                Shape::rect(x, y, x + HOSTILE_WIDTH, y + HOSTILE_HEIGHT),
                Color::BLUE,
            ),
            (Velocity(Vec2::new(0.0, HOSTILE_SPEED)),),
        )
    }

    fn spawn_triangle(&mut self, kind: EntityKind, center_x: f32, fill: Color, label: &str) -> Entity {
        let body = Body::new(
            Shape::Polygon {
                points: vec![
                    Vec2::new(center_x, HEIGHT - 90.0),
                    Vec2::new(center_x - 16.0, HEIGHT - 60.0),
                    Vec2::new(center_x + 16.0, HEIGHT - 60.0),
                ],
            },
            fill,
        );
        let entity = self.world.spawn(kind, body);
        let caption = world_setup::spawn_text(
            &mut self.world,
            EntityKind::Label,
            Vec2::new(center_x, HEIGHT - 100.0),
            label,
            9,
            Color::WHITE,
        );
        self.world.pair(entity, caption);
        entity
    }

    /// Projectile rising from the top center of `shooter`.
    fn fire_from(&mut self, shooter: Entity, fill: Color) {
        let Some(bounds) = self.world.bbox(shooter) else {
            return;
        };
        let x = bounds.center_x().floor();
        self.world.spawn_with(
            EntityKind::Projectile,
            Body::new(
                Shape::rect(x - 2.0, bounds.min_y - 15.0, x + 2.0, bounds.min_y),
                fill,
            ),
            (Velocity(Vec2::new(0.0, -PROJECTILE_SPEED)),),
        );
    }

    fn hazard_boxes(&self) -> Vec<Aabb> {
        self.world
            .entities(EntityKind::Asteroid)
            .iter()
            .chain(self.world.entities(EntityKind::HostileCraft))
            .filter_map(|e| self.world.bbox(*e))
            .collect()
    }

    fn move_units(&mut self, ctx: &mut SimContext<'_>) {
        let hazards = self.hazard_boxes();
        for unit in self.world.ids(EntityKind::DefenseUnit) {
            let held_step = self
                .world
                .ecs()
                .get::<&DefenseUnit>(unit)
                .map(|state| state.held_step);
            let (Some(bounds), Ok(held_step)) = (self.world.bbox(unit), held_step) else {
                continue;
            };

            let pursuit = PursuitContext {
                unit: bounds,
                held_step,
                hazards: &hazards,
            };
            let update = controller::evaluate(&pursuit, &self.profile, &mut *ctx.rng);
            let mut step = update.step;
            self.world.translate(unit, Vec2::new(step, 0.0));

            if let Some(bounds) = self.world.bbox(unit) {
                if let Some(clamp) = controller::clamp_to_field(&bounds, step, 0.0, WIDTH) {
                    self.world.translate(unit, Vec2::new(clamp.correction, 0.0));
                    step = clamp.step;
                }
            }

            if let Some(state) = self.world.get_mut::<DefenseUnit>(unit) {
                state.held_step = step;
                state.last_target_x = update.target.map(|t| t.center_x);
            }
        }
    }

    /// Unit lost to a hazard: burst at its apex, unit and label removed, 50 points.
    fn lose_unit(&mut self, unit: Entity, ctx: &mut SimContext<'_>) {
        if let Some(at) = self.world.origin(unit) {
            ctx.burst(&mut self.world, at, Color::GREEN);
        }
        self.world.despawn(unit);
        ctx.add_score(SCORE_UNIT_LOST);
    }

    /// Ship lost: explosion at its apex, ship and label removed, scene over.
    fn lose_ship(&mut self, outcome: Outcome, ctx: &mut SimContext<'_>) {
        if let Some(ship) = self.ship.take() {
            if let Some(at) = self.world.origin(ship) {
                ctx.explosion(&mut self.world, at);
            }
            self.world.despawn(ship);
        }
        ctx.finish(outcome);
    }

    fn ship_hit(&self, hazard: Entity) -> bool {
        self.ship.is_some_and(|ship| self.world.collide(ship, hazard))
    }

    /// Returns true when the scene ended.
    fn update_asteroids(&mut self, ctx: &mut SimContext<'_>) -> bool {
        for asteroid in self.world.ids(EntityKind::Asteroid) {
            movement::step(&mut self.world, asteroid);

            if self.ship_hit(asteroid) {
                self.lose_ship(Outcome::ShipDestroyed, ctx);
                return true;
            }

            if let Some(unit) = self.world.first_hit(asteroid, EntityKind::DefenseUnit) {
                self.world.despawn(asteroid);
                self.lose_unit(unit, ctx);
                continue;
            }

            if self
                .world
                .bbox(asteroid)
                .is_some_and(|b| b.max_y >= GROUND_Y)
            {
                self.world.despawn(asteroid);
                self.lose_ship(Outcome::EarthDestroyed, ctx);
                return true;
            }
        }
        false
    }

    fn update_projectiles(&mut self, ctx: &mut SimContext<'_>) {
        for shot in self.world.ids(EntityKind::Projectile) {
            movement::step(&mut self.world, shot);
            if self.world.bbox(shot).is_some_and(|b| b.min_y < 0.0) {
                self.world.despawn(shot);
                continue;
            }

            let targets = [
                (EntityKind::Asteroid, SCORE_ASTEROID),
                (EntityKind::HostileCraft, SCORE_HOSTILE),
            ];
            for (kind, points) in targets {
                if let Some(target) = self.world.first_hit(shot, kind) {
                    if let Some(at) = self.world.origin(target) {
                        ctx.burst(&mut self.world, at, Color::ORANGE);
                    }
                    self.world.despawn(target);
                    self.world.despawn(shot);
                    ctx.add_score(points);
                    break;
                }
            }
        }
    }

    fn units_fire(&mut self, ctx: &mut SimContext<'_>) {
        for unit in self.world.ids(EntityKind::DefenseUnit) {
            if controller::wants_to_fire(&self.profile, &mut *ctx.rng) {
                self.fire_from(unit, Color::LIME);
            }
        }
    }

    /// Returns true when the scene ended.
    fn update_hostiles(&mut self, ctx: &mut SimContext<'_>) -> bool {
        for craft in self.world.ids(EntityKind::HostileCraft) {
            movement::step(&mut self.world, craft);

            if self.ship.is_some() && ctx.rng.gen::<f64>() < HOSTILE_FIRE_CHANCE {
                if let Some(bounds) = self.world.bbox(craft) {
                    let at = bounds.center().floor();
                    self.world.spawn_with(
                        EntityKind::HostileProjectile,
                        Body::new(
                            Shape::rect(at.x - 2.0, at.y, at.x + 2.0, at.y + 10.0),
                            Color::MAGENTA,
                        ),
                        (Velocity(Vec2::new(0.0, HOSTILE_PROJECTILE_SPEED)),),
                    );
                }
            }

            if self.ship_hit(craft) {
                self.lose_ship(Outcome::ShipDestroyed, ctx);
                return true;
            }

            if let Some(unit) = self.world.first_hit(craft, EntityKind::DefenseUnit) {
                self.world.despawn(craft);
                self.lose_unit(unit, ctx);
                continue;
            }

            if self.world.bbox(craft).is_some_and(|b| b.min_y > HEIGHT) {
                self.world.despawn(craft);
            }
        }
        false
    }

    /// Returns true when the scene ended.
    fn update_hostile_projectiles(&mut self, ctx: &mut SimContext<'_>) -> bool {
        for shot in self.world.ids(EntityKind::HostileProjectile) {
            movement::step(&mut self.world, shot);
            let Some(bounds) = self.world.bbox(shot) else {
                continue;
            };
            if bounds.max_y > HEIGHT {
                self.world.despawn(shot);
                continue;
            }

            if self.ship_hit(shot) {
                self.world.despawn(shot);
                self.lose_ship(Outcome::ShipDestroyed, ctx);
                return true;
            }

            if let Some(unit) = self.world.first_hit(shot, EntityKind::DefenseUnit) {
                self.world.despawn(shot);
                self.lose_unit(unit, ctx);
                continue;
            }

            if bounds.max_y >= GROUND_Y {
                ctx.burst(&mut self.world, Vec2::new(bounds.min_x, GROUND_Y), Color::GRAY);
                self.world.despawn(shot);
            }
        }
        false
    }
}

impl Default for DefenseGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for DefenseGame {
    fn kind(&self) -> GameKind {
        GameKind::DefenseGame
    }

    fn setup(&mut self, ctx: &mut SimContext<'_>) {
        world_setup::spawn_clouds(&mut self.world, ctx.rng);
        world_setup::spawn_ground(&mut self.world, DEFENSE_GROUND_HEIGHT, None);

        let center = (WIDTH / 2.0).floor();
        self.ship = Some(self.spawn_triangle(EntityKind::Ship, center, Color::RED, "Player Guard"));

        let guards = [
            ("Guard L", -DEFENSE_UNIT_OFFSET, Color::DARK_GREEN),
            ("Guard R", DEFENSE_UNIT_OFFSET, Color::DARK_BLUE),
        ];
        for (name, offset, fill) in guards {
            let unit = self.spawn_triangle(EntityKind::DefenseUnit, center + offset, fill, name);
            self.world.insert(
                unit,
                DefenseUnit {
                    name: name.to_string(),
                    held_step: 0.0,
                    last_target_x: None,
                },
            );
        }

        ctx.every(DEFENSE_SPAWN_MS, Task::Spawn);
        ctx.every(DEFENSE_UPDATE_MS, Task::Update);
        ctx.every(CLOUD_INTERVAL_MS, Task::DriftClouds);
        ctx.every(PARTICLE_INTERVAL_MS, Task::Particles);
    }

    fn update(&mut self, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        self.move_units(ctx);
        if self.update_asteroids(ctx) {
            return;
        }
        self.update_projectiles(ctx);
        self.units_fire(ctx);
        if self.update_hostiles(ctx) {
            return;
        }
        self.update_hostile_projectiles(ctx);
    }

    fn spawn(&mut self, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        if ctx.rng.gen::<f64>() < ASTEROID_SPAWN_CHANCE {
            let size = ctx.rng.gen_range(ASTEROID_MIN_SIZE..=ASTEROID_MAX_SIZE);
            let x = ctx.rng.gen_range(0..=WIDTH as i32 - size) as f32;
            let size = size as f32;
            self.spawn_asteroid(x, -size, size);
        }
        if ctx.rng.gen::<f64>() < HOSTILE_SPAWN_CHANCE {
            let x = ctx.rng.gen_range(50..=WIDTH as i32 - 50) as f32;
            self.spawn_hostile(x, -HOSTILE_HEIGHT);
            debug!(x, "hostile_spawned");
        }
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        let Some(ship) = self.ship else {
            return;
        };
        match input {
            InputEvent::KeyDown { key: Key::Left } => {
                self.world.translate(ship, Vec2::new(-SHIP_STEP, 0.0));
            }
            InputEvent::KeyDown { key: Key::Right } => {
                self.world.translate(ship, Vec2::new(SHIP_STEP, 0.0));
            }
            InputEvent::KeyDown { key: Key::Space } => self.fire_from(ship, Color::YELLOW),
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
        Color::SKY_BLUE
    }
}
