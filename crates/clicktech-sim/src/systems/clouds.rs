//! Background cloud drift.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use clicktech_core::components::CloudDrift;
use clicktech_core::constants::{HEIGHT, WIDTH};
use clicktech_core::enums::EntityKind;

use crate::world::World;

/// Drift every cloud by its speed. Clouds that left the left edge wrap to
/// just past the right edge at a fresh random height.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    for cloud in world.ids(EntityKind::Cloud) {
        let Some(drift) = world.get::<CloudDrift>(cloud) else {
            continue;
        };
        world.translate(cloud, Vec2::new(drift.speed, 0.0));

        let Some(bounds) = world.bbox(cloud) else {
            continue;
        };
        if bounds.max_x < 0.0 {
            let new_y = rng.gen_range(50.0..HEIGHT - 100.0);
            let reset = Vec2::new(WIDTH + 10.0 - bounds.min_x, new_y - bounds.min_y);
            world.translate(cloud, reset);
        }
    }
}
