//! Snapshot system: reads the world and the boss into an `EncounterSnapshot`.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use starbreak_core::components::Projectile;
use starbreak_core::enums::EncounterStatus;
use starbreak_core::events::{Alert, EncounterEvent};
use starbreak_core::state::*;
use starbreak_core::types::SimTime;

use crate::boss::Boss;
use crate::world::{HecsWorld, SpatialWorld};

/// Everything the snapshot needs besides the world itself.
pub struct SnapshotInput<'a> {
    pub time: SimTime,
    pub status: EncounterStatus,
    pub boss: Option<&'a Boss>,
    pub player_hits: u32,
    pub progression: ProgressionView,
    pub events: Vec<EncounterEvent>,
    pub alerts: Vec<Alert>,
}

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(world: &HecsWorld, input: SnapshotInput<'_>) -> EncounterSnapshot {
    let now = input.time.elapsed_secs;

    EncounterSnapshot {
        time: input.time,
        status: input.status,
        boss: input.boss.map(build_boss),
        minions: input
            .boss
            .map(|boss| build_minions(world, boss, now))
            .unwrap_or_default(),
        projectiles: count_projectiles(world.ecs(), world.hostile_fired()),
        player: PlayerView {
            position: world.player_position().unwrap_or_default(),
            hits_taken: input.player_hits,
        },
        progression: input.progression,
        events: input.events,
        alerts: input.alerts,
    }
}

fn build_boss(boss: &Boss) -> BossView {
    BossView {
        status: boss.status(),
        hp: boss.hp(),
        max_hp: boss.max_hp(),
        hp_fraction: boss.hp_fraction(),
        hp_bar_visible: boss.hp_bar_visible(),
        phase: boss.phase_index(),
        phase_count: boss.phase_count(),
        shielded: boss.is_shielded(),
        position: boss.position(),
        active_spirals: boss.active_spirals(),
    }
}

/// Minions whose body still exists, in registry order.
fn build_minions(world: &HecsWorld, boss: &Boss, now: f64) -> Vec<MinionView> {
    boss.minions()
        .iter()
        .filter_map(|m| {
            let position = world.position_of(m.entity)?;
            Some(MinionView {
                id: m.id,
                hp: m.hp,
                position,
                next_fire_in: (m.next_fire_time - now).max(0.0),
            })
        })
        .collect()
}

fn count_projectiles(world: &World, hostile_fired: u32) -> ProjectileCounts {
    let mut counts = ProjectileCounts {
        hostile_fired,
        ..ProjectileCounts::default()
    };
    for (_entity, projectile) in world.query::<&Projectile>().iter() {
        if projectile.tag.is_hostile() {
            counts.hostile += 1;
        } else {
            counts.player += 1;
        }
    }
    counts
}
