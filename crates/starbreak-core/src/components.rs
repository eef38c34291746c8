//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::MinionId;

/// A moving shot. Position and Velocity are separate components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub tag: ProjectileTag,
    pub speed: f32,
    /// Simulation time at which the projectile expires.
    pub expires_at: f64,
}

/// Re-aims toward the player every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Homing;

/// Collision category and radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub tag: CollisionTag,
    pub radius: f32,
}

/// Marks the boss body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossBody;

/// Marks the player ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Links a world entity back to its registry entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MinionBody {
    pub minion: MinionId,
}

/// Entity scheduled for removal at a given time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DespawnAt {
    pub at: f64,
}
