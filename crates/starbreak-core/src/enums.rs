//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which attack produced a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileTag {
    /// Radial burst fired by the boss on its main timer.
    #[default]
    BossBurst,
    /// One shot of a spiral burst.
    Spiral,
    /// Spread shot fired by an immovable asteroid.
    MinionBullet,
    /// Missile that re-aims at the player every tick.
    HomingMissile,
    /// Bullet fired by the player ship.
    PlayerBullet,
}

impl ProjectileTag {
    /// Whether this projectile hurts the player (as opposed to the boss side).
    pub fn is_hostile(self) -> bool {
        !matches!(self, ProjectileTag::PlayerBullet)
    }
}

/// Collision category of a world entity. Ordered so contact pairs can be
/// normalized before routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollisionTag {
    /// Player-fired bullet.
    Bullet,
    /// The player ship.
    Player,
    /// The boss body.
    Boss,
    /// An immovable asteroid shielding the boss.
    Minion,
    /// A boss-side projectile.
    Hostile,
}

/// Boss state machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum BossStatus {
    /// Fighting in the given phase.
    Active { phase: usize },
    /// HP reached zero. Terminal.
    Defeated,
}

impl Default for BossStatus {
    fn default() -> Self {
        BossStatus::Active { phase: 0 }
    }
}

/// Encounter lifecycle (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterStatus {
    /// No boss spawned yet.
    #[default]
    Idle,
    Active,
    Paused,
    /// Configuration was rejected; nothing is scheduled.
    Aborted,
    /// Boss defeated.
    Complete,
}

/// Why a damage application was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    Defeated,
    TestingInvulnerable,
    /// At least one minion is alive.
    Shielded,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
