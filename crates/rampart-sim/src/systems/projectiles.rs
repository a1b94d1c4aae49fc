//! Shot traces fade out after a fixed lifetime.

use hecs::{Entity, World};

use rampart_core::components::Projectile;

pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.ttl_secs -= dt;
        if projectile.ttl_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
