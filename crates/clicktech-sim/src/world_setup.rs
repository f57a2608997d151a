//! Entity spawn factories shared by several scenes.
//!
//! Scene-specific entities (ship, bricks, snake cells) are spawned by the
//! scene that owns them; this module only holds the common decoration and
//! effects.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use clicktech_core::components::{Body, CloudDrift, Lifetime, Velocity};
use clicktech_core::constants::*;
use clicktech_core::enums::EntityKind;
use clicktech_core::types::{Anchor, Color, Shape};

use crate::world::World;

/// Drifting cloud band, each cloud paired with its shadow.
pub fn spawn_clouds(world: &mut World, rng: &mut ChaCha8Rng) {
    for _ in 0..CLOUD_COUNT {
        let x = rng.gen_range(0.0..WIDTH);
        let y = rng.gen_range(50.0..HEIGHT - 100.0);
        let w = rng.gen_range(50..=100) as f32;
        let h = rng.gen_range(15..=35) as f32;

        let cloud = world.spawn_with(
            EntityKind::Cloud,
            Body::new(
                Shape::oval(x - w / 2.0, y - h / 2.0, x + w / 2.0, y + h / 2.0),
                Color::WHITE,
            ),
            (CloudDrift {
                speed: -rng.gen_range(0.5..2.5),
            },),
        );
        let shadow = world.spawn(
            EntityKind::Decoration,
            Body::new(
                Shape::oval(x - w / 2.0, y + h / 4.0, x + w / 2.0, y + h / 2.0 + 5.0),
                Color::CLOUD_SHADOW,
            ),
        );
        world.pair(cloud, shadow);
    }
}

/// Full-width ground strip of the given height.
pub fn spawn_ground(world: &mut World, height: f32, outline: Option<Color>) -> Entity {
    let mut body = Body::new(Shape::rect(0.0, HEIGHT - height, WIDTH, HEIGHT), Color::GRASS);
    body.outline = outline;
    world.spawn(EntityKind::Ground, body)
}

/// Small bold caption, used for unit labels and scene titles.
pub fn spawn_text(
    world: &mut World,
    kind: EntityKind,
    at: Vec2,
    text: &str,
    size: u16,
    fill: Color,
) -> Entity {
    world.spawn(
        kind,
        Body::new(Shape::text(at, text, size, Anchor::Center), fill),
    )
}

/// Six small particles scattering from `at`.
pub fn spawn_burst(world: &mut World, rng: &mut ChaCha8Rng, at: Vec2, color: Color) {
    for _ in 0..BURST_PARTICLES {
        let velocity = Vec2::new(
            rng.gen_range(-3..=3) as f32,
            rng.gen_range(-3..=3) as f32,
        );
        world.spawn_with(
            EntityKind::Particle,
            Body::new(Shape::oval(at.x, at.y, at.x + 4.0, at.y + 4.0), color),
            (
                Velocity(velocity),
                Lifetime {
                    ticks_left: BURST_LIFETIME,
                },
            ),
        );
    }
}

/// Forty fire-coloured particles thrown mostly upward from `at`.
pub fn spawn_explosion(world: &mut World, rng: &mut ChaCha8Rng, at: Vec2) {
    const FIRE: [Color; 3] = [Color::RED, Color::ORANGE, Color::YELLOW];
    for _ in 0..EXPLOSION_PARTICLES {
        let half = rng.gen_range(5..=12) as f32 / 2.0;
        let velocity = Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..5.0));
        let color = FIRE[rng.gen_range(0..FIRE.len())];
        world.spawn_with(
            EntityKind::Particle,
            Body::new(
                Shape::oval(at.x - half, at.y - half, at.x + half, at.y + half),
                color,
            ),
            (
                Velocity(velocity),
                Lifetime {
                    ticks_left: EXPLOSION_LIFETIME,
                },
            ),
        );
    }
}
