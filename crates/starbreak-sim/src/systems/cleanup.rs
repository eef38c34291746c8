//! Cleanup system: removes expired, out-of-bounds and scheduled entities.

use hecs::{Entity, World};

use starbreak_core::components::{DespawnAt, Projectile};
use starbreak_core::constants::{ARENA_HALF_HEIGHT, ARENA_HALF_WIDTH, ARENA_OOB_MARGIN};
use starbreak_core::types::Position;

/// Despawn everything that is past its time or outside the arena.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, now: f64, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    let max_x = ARENA_HALF_WIDTH + ARENA_OOB_MARGIN;
    let max_y = ARENA_HALF_HEIGHT + ARENA_OOB_MARGIN;

    for (entity, (pos, projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        let out_of_bounds = pos.0.x.abs() > max_x || pos.0.y.abs() > max_y;
        if out_of_bounds || now >= projectile.expires_at {
            despawn_buffer.push(entity);
        }
    }

    // Delayed destruction (e.g. the boss body after its defeat grace period).
    for (entity, despawn) in world.query_mut::<&DespawnAt>() {
        if now >= despawn.at {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
