//! Particle animation: move by velocity, expire after a fixed number of ticks.

use clicktech_core::components::Lifetime;
use clicktech_core::enums::EntityKind;

use crate::systems::movement;
use crate::world::World;

pub fn run(world: &mut World) {
    for particle in world.ids(EntityKind::Particle) {
        let ticks_left = world
            .get::<Lifetime>(particle)
            .map(|l| l.ticks_left)
            .unwrap_or(0);
        if ticks_left == 0 {
            world.despawn(particle);
            continue;
        }
        movement::step(world, particle);
        if let Some(lifetime) = world.get_mut::<Lifetime>(particle) {
            lifetime.ticks_left -= 1;
        }
    }
}
