//! Autopilot: clears the minion shield, then shoots the boss.
//!
//! To keep the boss body out of the line of fire, the ship lines up outside
//! the target minion, on the ray from the boss through it.

use glam::Vec2;

use starbreak_core::commands::EncounterCommand;
use starbreak_core::enums::{BossStatus, EncounterStatus};
use starbreak_core::state::EncounterSnapshot;

/// Ticks between shots at 60Hz (five shots per second).
pub const DEFAULT_FIRE_INTERVAL_TICKS: u32 = 12;

/// Distance kept outside a target minion.
pub const STANDOFF: f32 = 6.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    fire_interval_ticks: u32,
    cooldown: u32,
    shots_fired: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_FIRE_INTERVAL_TICKS)
    }
}

impl Autopilot {
    pub fn new(fire_interval_ticks: u32) -> Self {
        Self {
            fire_interval_ticks: fire_interval_ticks.max(1),
            cooldown: 0,
            shots_fired: 0,
        }
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    /// Commands for the next tick given the latest snapshot.
    pub fn plan(&mut self, snapshot: &EncounterSnapshot) -> Vec<EncounterCommand> {
        if snapshot.status != EncounterStatus::Active {
            return Vec::new();
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Vec::new();
        }
        let Some(boss) = snapshot
            .boss
            .as_ref()
            .filter(|boss| boss.status != BossStatus::Defeated)
        else {
            return Vec::new();
        };

        let player = snapshot.player.position;
        let (origin, target) = match nearest_minion(snapshot, player) {
            Some(minion) => {
                let outward = (minion - boss.position).try_normalize().unwrap_or(Vec2::NEG_Y);
                (minion + outward * STANDOFF, minion)
            }
            None => (player, boss.position),
        };

        self.cooldown = self.fire_interval_ticks - 1;
        self.shots_fired += 1;

        let mut commands = Vec::with_capacity(2);
        if origin != player {
            commands.push(EncounterCommand::SetPlayerPosition { position: origin });
        }
        commands.push(EncounterCommand::FirePlayerBullet {
            origin,
            direction: target - origin,
        });
        commands
    }
}

fn nearest_minion(snapshot: &EncounterSnapshot, from: Vec2) -> Option<Vec2> {
    snapshot
        .minions
        .iter()
        .map(|m| m.position)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use starbreak_core::state::{BossView, MinionView};
    use starbreak_core::types::MinionId;

    fn boss_view(status: BossStatus) -> BossView {
        BossView {
            status,
            hp: 1000,
            max_hp: 1000,
            hp_fraction: 1.0,
            hp_bar_visible: true,
            phase: 0,
            phase_count: 3,
            shielded: false,
            position: Vec2::ZERO,
            active_spirals: 0,
        }
    }

    fn minion_at(index: u32, position: Vec2) -> MinionView {
        MinionView {
            id: MinionId::new(index, 0),
            hp: 100,
            position,
            next_fire_in: 1.0,
        }
    }

    fn active_snapshot() -> EncounterSnapshot {
        let mut snapshot = EncounterSnapshot {
            status: EncounterStatus::Active,
            boss: Some(boss_view(BossStatus::Active { phase: 0 })),
            ..Default::default()
        };
        snapshot.player.position = Vec2::new(0.0, -18.0);
        snapshot
    }

    fn fired(commands: &[EncounterCommand]) -> Option<(Vec2, Vec2)> {
        commands.iter().find_map(|c| match c {
            EncounterCommand::FirePlayerBullet { origin, direction } => Some((*origin, *direction)),
            _ => None,
        })
    }

    #[test]
    fn test_targets_nearest_minion_first() {
        let mut snapshot = active_snapshot();
        snapshot.minions = vec![
            minion_at(0, Vec2::new(0.0, 10.0)),
            minion_at(1, Vec2::new(0.0, -10.0)),
        ];
        let mut pilot = Autopilot::default();

        let commands = pilot.plan(&snapshot);
        assert!(matches!(
            commands[0],
            EncounterCommand::SetPlayerPosition { position } if position == Vec2::new(0.0, -16.0)
        ));
        // Fires from outside the minion back toward it; the boss is behind it.
        let (origin, direction) = fired(&commands).expect("one shot");
        assert_eq!(origin, Vec2::new(0.0, -16.0));
        assert_eq!(direction, Vec2::new(0.0, 6.0));
    }

    #[test]
    fn test_targets_boss_when_unshielded() {
        let snapshot = active_snapshot();
        let mut pilot = Autopilot::default();

        let commands = pilot.plan(&snapshot);
        assert_eq!(commands.len(), 1);
        let (origin, direction) = fired(&commands).expect("one shot");
        assert_eq!(origin, Vec2::new(0.0, -18.0));
        assert_eq!(direction, Vec2::new(0.0, 18.0));
    }

    #[test]
    fn test_respects_fire_interval() {
        let snapshot = active_snapshot();
        let mut pilot = Autopilot::new(3);

        let fired: Vec<bool> = (0..7).map(|_| !pilot.plan(&snapshot).is_empty()).collect();
        assert_eq!(fired, vec![true, false, false, true, false, false, true]);
        assert_eq!(pilot.shots_fired(), 3);
    }

    #[test]
    fn test_holds_fire_when_not_active() {
        let mut snapshot = active_snapshot();
        snapshot.boss = Some(boss_view(BossStatus::Defeated));
        let mut pilot = Autopilot::default();
        assert!(pilot.plan(&snapshot).is_empty());

        snapshot.status = EncounterStatus::Paused;
        snapshot.boss = Some(boss_view(BossStatus::Active { phase: 0 }));
        assert!(pilot.plan(&snapshot).is_empty());
    }
}
