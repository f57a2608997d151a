//! Constant-velocity integration.

use glam::Vec2;

use clicktech_core::components::Velocity;
use hecs::Entity;

use crate::world::World;

/// Displace one entity by its velocity. Returns false when the entity is
/// gone or has no velocity.
pub fn step(world: &mut World, entity: Entity) -> bool {
    let Some(Velocity(delta)) = world.get::<Velocity>(entity) else {
        return false;
    };
    world.translate(entity, delta)
}

/// Current velocity, zero when absent.
pub fn velocity(world: &World, entity: Entity) -> Vec2 {
    world.get::<Velocity>(entity).map(|v| v.0).unwrap_or(Vec2::ZERO)
}

pub fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
    if let Some(v) = world.get_mut::<Velocity>(entity) {
        v.0 = velocity;
    }
}
