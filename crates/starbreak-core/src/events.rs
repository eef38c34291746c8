//! Events emitted by the encounter for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::MinionId;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncounterEvent {
    EncounterStarted { max_hp: i32, phase_count: usize },
    /// Configuration rejected; the encounter will not progress.
    EncounterAborted { reason: String },
    BossDamaged { amount: i32, hp: i32 },
    /// Damage dropped without touching HP.
    DamageIgnored { amount: i32, reason: IgnoreReason },
    PhaseChanged { from: usize, to: usize, hp: i32 },
    MinionsSpawned { count: usize },
    MinionDestroyed { minion: MinionId },
    /// Last shield minion gone; the boss takes damage again.
    ShieldDown,
    RadialBurst { count: usize },
    SpiralStarted { shots: usize },
    SpiralCancelled { remaining: usize },
    HomingMissileLaunched,
    /// An attack was skipped because its configuration is degenerate.
    AttackSkipped { attack: String, reason: String },
    PlayerHit { tag: ProjectileTag },
    BossDefeated,
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
