//! Encounter configuration loaded at encounter start.
//!
//! [`EncounterConfig`] mirrors the constants in [`crate::constants`]. Every
//! field has a default, so a TOML file only needs the values it overrides.
//! Phases are given as `[[phases]]` tables:
//!
//! ```toml
//! boss_max_hp = 1500
//!
//! [[phases]]
//! health_threshold_percent = 100.0
//! immovable_asteroids_to_spawn = 2
//! projectile_count = 6
//!
//! [[phases]]
//! health_threshold_percent = 50.0
//! spiral_enabled = true
//! spiral_projectile_count = 16
//! spiral_angle_step = 22.5
//! spiral_projectile_delay = 0.05
//! ```

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::phase::{
    default_phases, require_finite, require_non_negative, require_positive, PhaseEntry,
    PhaseTable,
};

/// Static configuration for one boss encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub boss_max_hp: i32,
    pub boss_position: Vec2,

    // --- Minion placement ---
    pub minion_ring_min: f32,
    pub minion_ring_max: f32,
    pub minion_jitter_degrees: f32,
    /// Spawn phase 0's minion quota when the encounter starts.
    pub spawn_initial_minions: bool,

    // --- Timing ---
    pub defeat_grace_secs: f64,
    pub spiral_interval_factor: f64,
    pub projectile_lifetime_secs: f64,

    pub homing_missile_speed: f32,

    // --- Progression ---
    pub boss_spawn_score: u32,
    pub defeat_fragment_reward: u32,

    pub phases: Vec<PhaseEntry>,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            boss_max_hp: BOSS_MAX_HP,
            boss_position: Vec2::ZERO,
            minion_ring_min: MINION_RING_MIN,
            minion_ring_max: MINION_RING_MAX,
            minion_jitter_degrees: MINION_JITTER_DEGREES,
            spawn_initial_minions: true,
            defeat_grace_secs: BOSS_DEFEAT_GRACE_SECS,
            spiral_interval_factor: SPIRAL_INTERVAL_FACTOR,
            projectile_lifetime_secs: PROJECTILE_LIFETIME_SECS,
            homing_missile_speed: HOMING_MISSILE_SPEED,
            boss_spawn_score: BOSS_SPAWN_SCORE,
            defeat_fragment_reward: BOSS_FRAGMENT_REWARD,
            phases: default_phases(),
        }
    }
}

impl EncounterConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::ParseToml {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a TOML configuration file. The result is not validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Check scalar fields and build the phase table.
    pub fn validate(&self) -> Result<PhaseTable, ConfigError> {
        if self.boss_max_hp <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "boss_max_hp",
                reason: format!("must be positive, got {}", self.boss_max_hp),
            });
        }
        require_finite("boss_position.x", self.boss_position.x as f64)?;
        require_finite("boss_position.y", self.boss_position.y as f64)?;
        require_non_negative("minion_ring_min", self.minion_ring_min as f64)?;
        require_non_negative("minion_ring_max", self.minion_ring_max as f64)?;
        if self.minion_ring_max < self.minion_ring_min {
            return Err(ConfigError::InvalidValue {
                field: "minion_ring_max",
                reason: format!(
                    "ring [{}, {}] is empty",
                    self.minion_ring_min, self.minion_ring_max
                ),
            });
        }
        require_non_negative("minion_jitter_degrees", self.minion_jitter_degrees as f64)?;
        require_non_negative("defeat_grace_secs", self.defeat_grace_secs)?;
        require_positive("spiral_interval_factor", self.spiral_interval_factor)?;
        require_positive("projectile_lifetime_secs", self.projectile_lifetime_secs)?;
        require_non_negative("homing_missile_speed", self.homing_missile_speed as f64)?;
        PhaseTable::new(self.phases.clone())
    }
}
