//! Breakout: paddle, balls and a wall of bricks.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;

use clicktech_core::collision::overlaps;
use clicktech_core::commands::{InputEvent, Key};
use clicktech_core::components::{Body, Velocity};
use clicktech_core::constants::*;
use clicktech_core::enums::{EntityKind, GameKind, Outcome};
use clicktech_core::types::{Aabb, Color, Shape};

use super::{SimContext, Simulator, Task};
use crate::systems::movement;
use crate::world::World;

const ROW_COLORS: [Color; 4] = [Color::RED, Color::ORANGE, Color::YELLOW, Color::GREEN];

pub struct BreakoutGame {
    world: World,
    paddle: Option<Entity>,
}

impl BreakoutGame {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            paddle: None,
        }
    }

    pub fn paddle(&self) -> Option<Entity> {
        self.paddle
    }

    pub fn balls(&self) -> &[Entity] {
        self.world.entities(EntityKind::Ball)
    }

    pub fn brick_count(&self) -> usize {
        self.world.count(EntityKind::Brick)
    }

    pub fn ball_velocity(&self, ball: Entity) -> Option<Vec2> {
        self.world.get::<Velocity>(ball).map(|v| v.0)
    }

    /// Put a ball with the given extents and velocity into play.
    pub fn launch_ball(&mut self, bounds: Aabb, velocity: Vec2) -> Entity {
        self.world.spawn_with(
            EntityKind::Ball,
            Body::new(Shape::Oval { bounds }, Color::YELLOW),
            (Velocity(velocity),),
        )
    }

    fn spawn_bricks(&mut self) {
        let columns = (WIDTH / BRICK_WIDTH) as usize;
        for row in 0..BRICK_ROWS {
            let fill = ROW_COLORS[row % ROW_COLORS.len()];
            let y1 = BRICK_TOP + row as f32 * BRICK_HEIGHT;
            let y2 = BRICK_TOP + (row + 1) as f32 * BRICK_HEIGHT - BRICK_GAP;
            for column in 0..columns {
                let x1 = column as f32 * BRICK_WIDTH;
                let x2 = (column + 1) as f32 * BRICK_WIDTH - BRICK_GAP;
                if x2 < WIDTH {
                    self.world.spawn(
                        EntityKind::Brick,
                        Body::new(Shape::rect(x1, y1, x2, y2), fill).with_outline(Color::GRAY50),
                    );
                }
            }
        }
    }

    /// Move one ball and resolve its wall, paddle and brick contacts.
    /// Returns false for a ball that no longer exists.
    fn step_ball(&mut self, ball: Entity, ctx: &mut SimContext<'_>) -> bool {
        let before = movement::velocity(&self.world, ball);
        self.world.translate(ball, before);
        let Some(bounds) = self.world.bbox(ball) else {
            return false;
        };
        let mut velocity = before;

        if bounds.min_x <= 0.0 || bounds.max_x >= WIDTH {
            velocity.x = -velocity.x;
        }
        if bounds.min_y <= 0.0 {
            velocity.y = -velocity.y;
        }

        if let Some(paddle) = self.paddle {
            if before.y > 0.0 && self.world.collide(paddle, ball) {
                velocity.y = -velocity.y;
                if let Some(paddle_box) = self.world.bbox(paddle) {
                    let offset = bounds.center_x() - paddle_box.center_x();
                    velocity.x = offset / PADDLE_DEFLECTION_DIVISOR;
                }
            }
        }

        let hit = self
            .world
            .entities(EntityKind::Brick)
            .iter()
            .copied()
            .find(|brick| {
                self.world
                    .bbox(*brick)
                    .is_some_and(|b| overlaps(&bounds, &b))
            });
        if let Some(brick) = hit {
            self.world.despawn(brick);
            velocity.y = -velocity.y;
            ctx.add_score(SCORE_BRICK);
            ctx.burst(&mut self.world, bounds.center(), Color::LIGHT_GRAY);
        }

        movement::set_velocity(&mut self.world, ball, velocity);
        true
    }
}

impl Default for BreakoutGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for BreakoutGame {
    fn kind(&self) -> GameKind {
        GameKind::Breakout
    }

    fn setup(&mut self, ctx: &mut SimContext<'_>) {
        let half = PADDLE_WIDTH / 2.0;
        self.paddle = Some(self.world.spawn(
            EntityKind::Paddle,
            Body::new(
                Shape::rect(
                    WIDTH / 2.0 - half,
                    HEIGHT - 30.0,
                    WIDTH / 2.0 + half,
                    HEIGHT - 30.0 + PADDLE_HEIGHT,
                ),
                Color::WHITE,
            ),
        ));

        let dx = if ctx.rng.gen::<bool>() {
            BALL_SPEED
        } else {
            -BALL_SPEED
        };
        self.launch_ball(
            Aabb::from_center(
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0),
                Vec2::splat(BALL_RADIUS),
            ),
            Vec2::new(dx, -BALL_SPEED),
        );

        self.spawn_bricks();

        ctx.every(BREAKOUT_UPDATE_MS, Task::Update);
        ctx.every(PARTICLE_INTERVAL_MS, Task::Particles);
    }

    fn update(&mut self, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        if self.world.count(EntityKind::Brick) == 0 {
            ctx.finish(Outcome::LevelCleared);
            return;
        }

        for ball in self.world.ids(EntityKind::Ball) {
            if !self.step_ball(ball, ctx) {
                self.world.despawn(ball);
                continue;
            }
            if self.world.bbox(ball).is_some_and(|b| b.min_y >= HEIGHT) {
                self.world.despawn(ball);
                if self.world.count(EntityKind::Ball) == 0 {
                    ctx.finish(Outcome::BallsLost);
                    return;
                }
            }
        }
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        let Some(paddle) = self.paddle else {
            return;
        };
        match input {
            InputEvent::KeyDown { key: Key::Left } => {
                self.world.translate(paddle, Vec2::new(-PADDLE_STEP, 0.0));
            }
            InputEvent::KeyDown { key: Key::Right } => {
                self.world.translate(paddle, Vec2::new(PADDLE_STEP, 0.0));
            }
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
        Color::GRAY20
    }
}
