#[cfg(test)]
mod tests {
    use std::path::Path;

    use glam::Vec2;

    use crate::commands::EncounterCommand;
    use crate::config::EncounterConfig;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::phase::{PhaseEntry, PhaseTable};
    use crate::state::EncounterSnapshot;
    use crate::types::*;

    fn phase(threshold: f32) -> PhaseEntry {
        PhaseEntry {
            health_threshold_percent: threshold,
            ..Default::default()
        }
    }

    // ---- Phase table ----

    #[test]
    fn test_default_encounter_is_valid() {
        let table = PhaseTable::default_encounter();
        assert_eq!(table.len(), 3);
        assert!(PhaseTable::new(table.entries().to_vec()).is_ok());
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = PhaseTable::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPhaseTable));
    }

    #[test]
    fn test_first_phase_must_be_full_health() {
        let err = PhaseTable::new(vec![phase(90.0), phase(50.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::FirstPhaseNotFull { .. }));
    }

    #[test]
    fn test_thresholds_must_strictly_decrease() {
        let err = PhaseTable::new(vec![phase(100.0), phase(50.0), phase(50.0)]).unwrap_err();
        match err {
            ConfigError::ThresholdsNotDescending { index, .. } => assert_eq!(index, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        let mut bad = phase(100.0);
        bad.projectile_interval = 0.0;
        let err = PhaseTable::new(vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "projectile_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_next_phase_skips_to_highest_eligible() {
        let table = PhaseTable::new(vec![phase(100.0), phase(66.0), phase(33.0)]).unwrap();
        assert_eq!(table.next_phase_for(10.0, 0), Some(2));
        assert_eq!(table.next_phase_for(50.0, 0), Some(1));
        assert_eq!(table.next_phase_for(66.0, 0), Some(1));
        assert_eq!(table.next_phase_for(80.0, 0), None);
    }

    #[test]
    fn test_next_phase_never_goes_back() {
        let table = PhaseTable::new(vec![phase(100.0), phase(66.0), phase(33.0)]).unwrap();
        assert_eq!(table.next_phase_for(50.0, 2), None);
        assert_eq!(table.next_phase_for(10.0, 2), None);
        assert_eq!(table.next_phase_for(20.0, 1), Some(2));
    }

    // ---- Config ----

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
            boss_max_hp = 1500

            [[phases]]
            health_threshold_percent = 100.0
            projectile_count = 6

            [[phases]]
            health_threshold_percent = 40.0
            spiral_enabled = true
            spiral_projectile_count = 16
            spiral_angle_step = 22.5
            spiral_projectile_delay = 0.05
            homing_missile_interval = 4.0
        "#;
        let config = EncounterConfig::from_toml_str(text, Path::new("inline.toml")).unwrap();
        assert_eq!(config.boss_max_hp, 1500);
        assert_eq!(config.minion_ring_min, crate::constants::MINION_RING_MIN);
        assert_eq!(config.phases.len(), 2);
        assert_eq!(config.phases[0].projectile_count, 6);
        assert_eq!(config.phases[0].projectile_interval, 2.0);
        assert!(config.phases[1].spiral_enabled);
        assert_eq!(config.phases[1].homing_missile_interval, Some(4.0));

        let table = config.validate().unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_bad_toml_reports_path() {
        let err = EncounterConfig::from_toml_str("boss_max_hp = \"lots\"", Path::new("boss.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("boss.toml"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = EncounterConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_config_rejects_inverted_ring() {
        let config = EncounterConfig {
            minion_ring_min: 15.0,
            minion_ring_max: 8.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    fn invalid_field(config: &EncounterConfig) -> Option<&'static str> {
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_config_rejects_infinite_ring_and_jitter() {
        let path = Path::new("inline.toml");
        let ring = EncounterConfig::from_toml_str("minion_ring_max = inf", path).unwrap();
        assert_eq!(ring.minion_ring_max, f32::INFINITY);
        assert_eq!(invalid_field(&ring), Some("minion_ring_max"));

        let jitter = EncounterConfig::from_toml_str("minion_jitter_degrees = inf", path).unwrap();
        assert_eq!(invalid_field(&jitter), Some("minion_jitter_degrees"));

        let negative = EncounterConfig {
            minion_jitter_degrees: -5.0,
            ..Default::default()
        };
        assert_eq!(invalid_field(&negative), Some("minion_jitter_degrees"));
    }

    #[test]
    fn test_config_rejects_nan_scalars() {
        let path = Path::new("inline.toml");
        for (text, field) in [
            ("spiral_interval_factor = nan", "spiral_interval_factor"),
            ("projectile_lifetime_secs = nan", "projectile_lifetime_secs"),
            ("defeat_grace_secs = nan", "defeat_grace_secs"),
            ("minion_ring_min = nan", "minion_ring_min"),
        ] {
            let config = EncounterConfig::from_toml_str(text, path).unwrap();
            assert_eq!(invalid_field(&config), Some(field), "{text}");
        }
    }

    #[test]
    fn test_phase_rejects_nan_timings() {
        let text = r#"
            [[phases]]
            health_threshold_percent = 100.0
            projectile_interval = nan
        "#;
        let config = EncounterConfig::from_toml_str(text, Path::new("inline.toml")).unwrap();
        assert!(config.phases[0].projectile_interval.is_nan());
        assert_eq!(invalid_field(&config), Some("projectile_interval"));

        let cases: [(PhaseEntry, &str); 4] = [
            (
                PhaseEntry {
                    asteroid_bullet_interval: f64::NAN,
                    ..Default::default()
                },
                "asteroid_bullet_interval",
            ),
            (
                PhaseEntry {
                    spiral_projectile_delay: f64::NAN,
                    ..Default::default()
                },
                "spiral_projectile_delay",
            ),
            (
                PhaseEntry {
                    homing_missile_interval: Some(f64::NAN),
                    ..Default::default()
                },
                "homing_missile_interval",
            ),
            (
                PhaseEntry {
                    health_threshold_percent: f32::NAN,
                    ..Default::default()
                },
                "health_threshold_percent",
            ),
        ];
        for (entry, field) in cases {
            assert!(
                matches!(
                    PhaseTable::new(vec![entry]),
                    Err(ConfigError::InvalidValue { field: f, .. }) if f == field
                ),
                "{field}"
            );
        }
    }

    #[test]
    fn test_phase_rejects_hpless_minions() {
        let entry = PhaseEntry {
            immovable_asteroids_to_spawn: 2,
            immovable_asteroid_hp: 0,
            ..Default::default()
        };
        assert!(matches!(
            PhaseTable::new(vec![entry]),
            Err(ConfigError::InvalidValue { field: "immovable_asteroid_hp", .. })
        ));

        // HP is irrelevant when nothing spawns.
        let entry = PhaseEntry {
            immovable_asteroids_to_spawn: 0,
            immovable_asteroid_hp: 0,
            ..Default::default()
        };
        assert!(PhaseTable::new(vec![entry]).is_ok());
    }

    #[test]
    fn test_phase_caps_counts() {
        let entry = PhaseEntry {
            immovable_asteroids_to_spawn: crate::constants::MAX_MINIONS_PER_PHASE + 1,
            ..Default::default()
        };
        assert!(matches!(
            PhaseTable::new(vec![entry]),
            Err(ConfigError::InvalidValue { field: "immovable_asteroids_to_spawn", .. })
        ));

        let entry = PhaseEntry {
            projectile_count: 1_000_000,
            ..Default::default()
        };
        assert!(matches!(
            PhaseTable::new(vec![entry]),
            Err(ConfigError::InvalidValue { field: "projectile_count", .. })
        ));

        let entry = PhaseEntry {
            immovable_asteroids_to_spawn: crate::constants::MAX_MINIONS_PER_PHASE,
            ..Default::default()
        };
        assert!(PhaseTable::new(vec![entry]).is_ok());
    }

    #[test]
    fn test_config_rejects_empty_phases() {
        let config = EncounterConfig {
            phases: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPhaseTable)
        ));
    }

    // ---- Geometry ----

    #[test]
    fn test_direction_from_degrees_axes() {
        let right = direction_from_degrees(0.0);
        let up = direction_from_degrees(90.0);
        assert!((right - Vec2::X).length() < 1e-5);
        assert!((up - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_degrees_of_is_normalized() {
        assert!((degrees_of(Vec2::new(0.0, -1.0)) - 270.0).abs() < 1e-3);
        assert!((degrees_of(Vec2::new(-1.0, 0.0)) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotate_degrees_quarter_turn() {
        let v = rotate_degrees(Vec2::X, 90.0);
        assert!((v - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 0.75).abs() < 1e-12);
    }

    // ---- Wire format ----

    #[test]
    fn test_command_tagged_format() {
        let json = serde_json::to_string(&EncounterCommand::DamageBoss { amount: 25 }).unwrap();
        assert_eq!(json, r#"{"type":"DamageBoss","amount":25}"#);

        let back: EncounterCommand =
            serde_json::from_str(r#"{"type":"SetTestingInvulnerable","enabled":true}"#).unwrap();
        assert!(matches!(
            back,
            EncounterCommand::SetTestingInvulnerable { enabled: true }
        ));
    }

    #[test]
    fn test_boss_status_serde() {
        let json = serde_json::to_string(&BossStatus::Active { phase: 2 }).unwrap();
        assert_eq!(json, r#"{"state":"Active","phase":2}"#);
        let back: BossStatus = serde_json::from_str(r#"{"state":"Defeated"}"#).unwrap();
        assert_eq!(back, BossStatus::Defeated);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = EncounterSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"status\":\"Idle\""));
    }

    #[test]
    fn test_projectile_tag_hostility() {
        assert!(ProjectileTag::Spiral.is_hostile());
        assert!(ProjectileTag::HomingMissile.is_hostile());
        assert!(!ProjectileTag::PlayerBullet.is_hostile());
    }
}
