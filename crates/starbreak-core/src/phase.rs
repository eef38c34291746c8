//! Phase table: per-health-bracket boss behavior.
//!
//! The table is immutable once built and shared read-only between the boss
//! and anything that wants to inspect it.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_MINIONS_PER_PHASE, MAX_PROJECTILES_PER_VOLLEY};
use crate::error::ConfigError;

/// Boss behavior while HP is within one bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseEntry {
    /// Phase activates once HP% falls to or below this value.
    pub health_threshold_percent: f32,

    // --- Minions ---
    pub immovable_asteroids_to_spawn: i32,
    pub immovable_asteroid_hp: i32,

    // --- Main radial burst ---
    pub projectile_count: i32,
    pub projectile_speed: f32,
    /// Seconds between radial bursts.
    pub projectile_interval: f64,

    // --- Minion spread fire ---
    /// Seconds between volleys of a single minion.
    pub asteroid_bullet_interval: f64,
    pub asteroid_bullet_speed: f32,
    pub asteroid_bullet_count: i32,

    // --- Spiral ---
    pub spiral_enabled: bool,
    pub spiral_projectile_count: i32,
    /// Degrees between consecutive spiral shots.
    pub spiral_angle_step: f32,
    /// Seconds between consecutive spiral shots.
    pub spiral_projectile_delay: f64,

    /// Seconds between homing missiles. `None` disables them for this phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homing_missile_interval: Option<f64>,
}

impl Default for PhaseEntry {
    fn default() -> Self {
        Self {
            health_threshold_percent: 100.0,
            immovable_asteroids_to_spawn: 0,
            immovable_asteroid_hp: 100,
            projectile_count: 4,
            projectile_speed: 8.0,
            projectile_interval: 2.0,
            asteroid_bullet_interval: 3.0,
            asteroid_bullet_speed: 6.0,
            asteroid_bullet_count: 3,
            spiral_enabled: false,
            spiral_projectile_count: 0,
            spiral_angle_step: 0.0,
            spiral_projectile_delay: 0.0,
            homing_missile_interval: None,
        }
    }
}

/// Ordered phase table. Entry 0 is the 100% phase; thresholds strictly decrease.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseTable {
    entries: Vec<PhaseEntry>,
}

impl PhaseTable {
    /// Build a validated table.
    pub fn new(entries: Vec<PhaseEntry>) -> Result<Self, ConfigError> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    /// A table with no phases. A boss built on it never attacks.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Three-phase encounter: 100%, 66%, 33%.
    pub fn default_encounter() -> Self {
        Self {
            entries: default_phases(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhaseEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[PhaseEntry] {
        &self.entries
    }

    /// The highest-indexed phase above `current` whose threshold is at or
    /// above `health_percent`. Intermediate phases may be skipped.
    pub fn next_phase_for(&self, health_percent: f32, current: usize) -> Option<usize> {
        (current + 1..self.entries.len())
            .rev()
            .find(|&i| self.entries[i].health_threshold_percent >= health_percent)
    }
}

/// The phase list behind [`PhaseTable::default_encounter`].
pub fn default_phases() -> Vec<PhaseEntry> {
    vec![
        PhaseEntry {
            health_threshold_percent: 100.0,
            immovable_asteroids_to_spawn: 2,
            immovable_asteroid_hp: 100,
            projectile_count: 4,
            projectile_speed: 8.0,
            projectile_interval: 2.0,
            asteroid_bullet_interval: 3.0,
            asteroid_bullet_speed: 6.0,
            asteroid_bullet_count: 3,
            ..Default::default()
        },
        PhaseEntry {
            health_threshold_percent: 66.0,
            immovable_asteroids_to_spawn: 3,
            immovable_asteroid_hp: 150,
            projectile_count: 8,
            projectile_speed: 9.0,
            projectile_interval: 1.6,
            asteroid_bullet_interval: 2.5,
            asteroid_bullet_speed: 7.0,
            asteroid_bullet_count: 3,
            spiral_enabled: true,
            spiral_projectile_count: 12,
            spiral_angle_step: 30.0,
            spiral_projectile_delay: 0.08,
            homing_missile_interval: None,
        },
        PhaseEntry {
            health_threshold_percent: 33.0,
            immovable_asteroids_to_spawn: 4,
            immovable_asteroid_hp: 200,
            projectile_count: 12,
            projectile_speed: 10.0,
            projectile_interval: 1.2,
            asteroid_bullet_interval: 2.0,
            asteroid_bullet_speed: 8.0,
            asteroid_bullet_count: 5,
            spiral_enabled: true,
            spiral_projectile_count: 24,
            spiral_angle_step: 15.0,
            spiral_projectile_delay: 0.05,
            homing_missile_interval: Some(5.0),
        },
    ]
}

fn validate_entries(entries: &[PhaseEntry]) -> Result<(), ConfigError> {
    let first = entries.first().ok_or(ConfigError::EmptyPhaseTable)?;
    for entry in entries {
        require_finite(
            "health_threshold_percent",
            entry.health_threshold_percent as f64,
        )?;
    }
    if first.health_threshold_percent < 100.0 {
        return Err(ConfigError::FirstPhaseNotFull {
            threshold: first.health_threshold_percent,
        });
    }

    for (index, pair) in entries.windows(2).enumerate() {
        let (previous, entry) = (&pair[0], &pair[1]);
        if entry.health_threshold_percent >= previous.health_threshold_percent {
            return Err(ConfigError::ThresholdsNotDescending {
                index: index + 1,
                previous: previous.health_threshold_percent,
                threshold: entry.health_threshold_percent,
            });
        }
    }

    for entry in entries {
        require_positive("projectile_interval", entry.projectile_interval)?;
        require_positive("asteroid_bullet_interval", entry.asteroid_bullet_interval)?;
        require_non_negative("spiral_projectile_delay", entry.spiral_projectile_delay)?;
        if let Some(interval) = entry.homing_missile_interval {
            require_positive("homing_missile_interval", interval)?;
        }
        require_non_negative("projectile_speed", entry.projectile_speed as f64)?;
        require_non_negative("asteroid_bullet_speed", entry.asteroid_bullet_speed as f64)?;
        require_finite("spiral_angle_step", entry.spiral_angle_step as f64)?;

        if entry.immovable_asteroids_to_spawn > MAX_MINIONS_PER_PHASE {
            return Err(ConfigError::InvalidValue {
                field: "immovable_asteroids_to_spawn",
                reason: format!(
                    "at most {MAX_MINIONS_PER_PHASE}, got {}",
                    entry.immovable_asteroids_to_spawn
                ),
            });
        }
        if entry.immovable_asteroids_to_spawn > 0 && entry.immovable_asteroid_hp <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "immovable_asteroid_hp",
                reason: format!("must be positive, got {}", entry.immovable_asteroid_hp),
            });
        }
        for (field, count) in [
            ("projectile_count", entry.projectile_count),
            ("asteroid_bullet_count", entry.asteroid_bullet_count),
            ("spiral_projectile_count", entry.spiral_projectile_count),
        ] {
            if count > MAX_PROJECTILES_PER_VOLLEY {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("at most {MAX_PROJECTILES_PER_VOLLEY}, got {count}"),
                });
            }
        }
    }

    Ok(())
}

/// Finite number. NaN and infinities fail.
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be finite, got {value}"),
        })
    }
}

/// Finite and strictly positive.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

/// Finite and zero or more.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must not be negative, got {value}"),
        })
    }
}
