//! Commands sent to the encounter engine by collaborators.
//!
//! Commands are queued and applied at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::{EntityHandle, MinionId};

/// All inputs the engine accepts from outside the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncounterCommand {
    // --- Lifecycle ---
    /// Spawn the boss and start the encounter.
    StartEncounter,
    Pause,
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },

    // --- Damage ---
    /// Apply damage to the boss directly.
    DamageBoss { amount: i32 },
    /// Apply damage to one minion.
    DamageMinion { minion: MinionId, amount: i32 },
    /// Remove a minion without it being destroyed by damage.
    RemoveMinion { minion: MinionId },
    /// Two world entities touched.
    ReportCollision { a: EntityHandle, b: EntityHandle },
    /// Debug switch: the boss ignores all damage while set.
    SetTestingInvulnerable { enabled: bool },

    // --- Player ---
    SetPlayerPosition { position: Vec2 },
    FirePlayerBullet { origin: Vec2, direction: Vec2 },

    // --- Progression ---
    /// Award score; reaching the boss threshold starts the encounter.
    AddScore { points: u32 },
}
