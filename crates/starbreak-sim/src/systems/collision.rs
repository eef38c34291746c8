//! Overlap detection between tagged colliders.
//!
//! Produces contact pairs only; the engine routes each pair exactly the way
//! an externally reported collision would be routed.

use hecs::World;

use starbreak_core::components::Collider;
use starbreak_core::enums::CollisionTag;
use starbreak_core::types::{EntityHandle, Position};

use crate::world::to_handle;

/// Contacts for this tick: player bullets against the boss and minions,
/// hostile projectiles against the player.
pub fn detect(world: &World) -> Vec<(EntityHandle, EntityHandle)> {
    let mut bullets = Vec::new();
    let mut hostiles = Vec::new();
    let mut targets = Vec::new();
    let mut players = Vec::new();

    for (entity, (pos, collider)) in world.query::<(&Position, &Collider)>().iter() {
        let entry = (to_handle(entity), pos.0, collider.radius);
        match collider.tag {
            CollisionTag::Bullet => bullets.push(entry),
            CollisionTag::Hostile => hostiles.push(entry),
            CollisionTag::Boss | CollisionTag::Minion => targets.push(entry),
            CollisionTag::Player => players.push(entry),
        }
    }

    let mut contacts = Vec::new();
    for &(bullet, bullet_pos, bullet_r) in &bullets {
        for &(target, target_pos, target_r) in &targets {
            if bullet_pos.distance_squared(target_pos) <= (bullet_r + target_r).powi(2) {
                contacts.push((bullet, target));
            }
        }
    }
    for &(shot, shot_pos, shot_r) in &hostiles {
        for &(player, player_pos, player_r) in &players {
            if shot_pos.distance_squared(player_pos) <= (shot_r + player_r).powi(2) {
                contacts.push((shot, player));
            }
        }
    }
    contacts
}
