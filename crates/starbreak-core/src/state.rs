//! Encounter snapshot: the complete visible state produced after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, EncounterEvent};
use crate::types::{MinionId, SimTime};

/// Complete encounter state broadcast to collaborators after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub time: SimTime,
    pub status: EncounterStatus,
    pub boss: Option<BossView>,
    pub minions: Vec<MinionView>,
    pub projectiles: ProjectileCounts,
    pub player: PlayerView,
    pub progression: ProgressionView,
    pub events: Vec<EncounterEvent>,
    pub alerts: Vec<Alert>,
}

/// Boss status for the HP bar and phase display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub status: BossStatus,
    pub hp: i32,
    pub max_hp: i32,
    /// HP bar fill (0.0 - 1.0).
    pub hp_fraction: f32,
    pub hp_bar_visible: bool,
    pub phase: usize,
    pub phase_count: usize,
    /// True while at least one minion is alive.
    pub shielded: bool,
    pub position: Vec2,
    /// Spiral bursts still emitting.
    pub active_spirals: usize,
}

/// One immovable asteroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinionView {
    pub id: MinionId,
    pub hp: i32,
    pub position: Vec2,
    /// Seconds until this minion fires again.
    pub next_fire_in: f64,
}

/// Live projectile counts by side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileCounts {
    pub hostile: u32,
    pub player: u32,
    /// Total hostile projectiles fired over the encounter.
    pub hostile_fired: u32,
}

/// Player ship as seen by the encounter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub hits_taken: u32,
}

/// Meta-progression for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionView {
    pub score: u32,
    pub fragments: u32,
    pub bosses_defeated: u32,
    pub asteroid_spawning_enabled: bool,
}
