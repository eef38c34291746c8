//! Encounter engine: the headless core of the boss fight.
//!
//! `EncounterEngine` owns the world, the boss and the RNG, applies queued
//! commands at tick boundaries, runs systems in a fixed order and produces
//! an `EncounterSnapshot` per tick. Same seed and same commands give the
//! same fight.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starbreak_core::commands::EncounterCommand;
use starbreak_core::config::EncounterConfig;
use starbreak_core::constants::{DT, PLAYER_BULLET_DAMAGE, PLAYER_RAM_DAMAGE, PLAYER_START_Y};
use starbreak_core::enums::{AlertLevel, CollisionTag, EncounterStatus};
use starbreak_core::events::{Alert, EncounterEvent};
use starbreak_core::state::EncounterSnapshot;
use starbreak_core::types::{EntityHandle, MinionId, SimTime};

use crate::boss::{Boss, BossSettings, DamageOutcome};
use crate::error::EncounterError;
use crate::minions::MinionDamage;
use crate::progression::{Progression, SharedProgression};
use crate::systems;
use crate::systems::snapshot::SnapshotInput;
use crate::world::{HecsWorld, SpatialWorld};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same encounter.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

pub struct EncounterEngine {
    world: HecsWorld,
    time: SimTime,
    status: EncounterStatus,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<EncounterCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<EncounterEvent>,
    alerts: Vec<Alert>,

    config: EncounterConfig,
    boss: Option<Boss>,
    progression: SharedProgression,
    testing_invulnerable: bool,
    player_hits: u32,
}

impl EncounterEngine {
    /// Create an idle engine. The player ship exists from the start; the
    /// boss spawns on `StartEncounter` or when score crosses the threshold.
    pub fn new(sim: SimConfig, config: EncounterConfig) -> Self {
        let progression =
            Progression::shared(config.boss_spawn_score, config.defeat_fragment_reward);
        Self::with_progression(sim, config, progression)
    }

    /// Create an engine that reports defeats to an existing progression.
    pub fn with_progression(
        sim: SimConfig,
        config: EncounterConfig,
        progression: SharedProgression,
    ) -> Self {
        let mut world = HecsWorld::new(config.projectile_lifetime_secs);
        world.ensure_player(config.boss_position + Vec2::new(0.0, PLAYER_START_Y));
        Self {
            world,
            time: SimTime::default(),
            status: EncounterStatus::default(),
            time_scale: sim.time_scale,
            rng: ChaCha8Rng::seed_from_u64(sim.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            alerts: Vec::new(),
            config,
            boss: None,
            progression,
            testing_invulnerable: false,
            player_hits: 0,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: EncounterCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = EncounterCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> EncounterSnapshot {
        self.tick_for(DT)
    }

    /// Advance by `dt` seconds. Nothing moves while idle, paused or aborted.
    pub fn tick_for(&mut self, dt: f64) -> EncounterSnapshot {
        self.process_commands();

        if matches!(
            self.status,
            EncounterStatus::Active | EncounterStatus::Complete
        ) {
            self.run_systems(dt.max(0.0));
            self.time.advance(dt.max(0.0));
        }

        self.snapshot()
    }

    /// Spawn the boss and start the fight.
    ///
    /// A rejected configuration leaves the engine `Aborted`: nothing is
    /// scheduled, but the session keeps running.
    pub fn start_encounter(&mut self) -> Result<(), EncounterError> {
        if matches!(
            self.status,
            EncounterStatus::Active | EncounterStatus::Paused
        ) {
            return Err(EncounterError::AlreadyRunning);
        }

        let phases = match self.config.validate() {
            Ok(phases) => phases,
            Err(err) => {
                tracing::error!(error = %err, "encounter aborted");
                self.status = EncounterStatus::Aborted;
                self.events.push(EncounterEvent::EncounterAborted {
                    reason: err.to_string(),
                });
                self.push_alert(AlertLevel::Critical, format!("Encounter aborted: {err}"));
                return Err(err.into());
            }
        };

        self.world.clear_encounter_entities();
        self.world.set_projectile_lifetime(self.config.projectile_lifetime_secs);
        let now = self.time.elapsed_secs;
        self.world.set_now(now);

        let position = self.config.boss_position;
        let entity = self.world.spawn_boss(position);
        let phase_count = phases.len();
        let mut boss = Boss::new(
            Arc::new(phases),
            BossSettings::from_config(&self.config),
            position,
            Some(entity),
            now,
            Box::new(Arc::clone(&self.progression)),
        );
        boss.set_testing_invulnerable(self.testing_invulnerable);

        self.events.push(EncounterEvent::EncounterStarted {
            max_hp: boss.max_hp(),
            phase_count,
        });
        if self.config.spawn_initial_minions {
            boss.spawn_phase_minions(&mut self.world, &mut self.rng, now, &mut self.events);
        }
        tracing::info!(max_hp = boss.max_hp(), phase_count, "encounter started");
        self.push_alert(AlertLevel::Warning, "Boss approaching".to_string());

        self.boss = Some(boss);
        self.status = EncounterStatus::Active;
        Ok(())
    }

    /// Apply damage to the boss immediately.
    pub fn damage_boss(&mut self, amount: i32) -> Result<DamageOutcome, EncounterError> {
        let now = self.time.elapsed_secs;
        let boss = self.boss.as_mut().ok_or(EncounterError::NoEncounter)?;
        let outcome = boss.take_damage(
            amount,
            &mut self.world,
            &mut self.rng,
            now,
            &mut self.events,
        );
        self.after_damage(outcome);
        Ok(outcome)
    }

    /// Apply damage to one minion immediately.
    pub fn damage_minion(
        &mut self,
        minion: MinionId,
        amount: i32,
    ) -> Result<MinionDamage, EncounterError> {
        let boss = self.boss.as_mut().ok_or(EncounterError::NoEncounter)?;
        Ok(boss.damage_minion(minion, amount, &mut self.world, &mut self.events))
    }

    /// Get the current encounter status.
    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn world(&self) -> &HecsWorld {
        &self.world
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn progression(&self) -> SharedProgression {
        Arc::clone(&self.progression)
    }

    /// Replace the configuration used by the next `StartEncounter`.
    pub fn set_config(&mut self, config: EncounterConfig) {
        self.config = config;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        self.world.set_now(self.time.elapsed_secs);
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: EncounterCommand) {
        match command {
            EncounterCommand::StartEncounter => {
                if let Err(err) = self.start_encounter() {
                    tracing::warn!(error = %err, "start encounter refused");
                }
            }
            EncounterCommand::Pause => {
                if self.status == EncounterStatus::Active {
                    self.status = EncounterStatus::Paused;
                }
            }
            EncounterCommand::Resume => {
                if self.status == EncounterStatus::Paused {
                    self.status = EncounterStatus::Active;
                }
            }
            EncounterCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            EncounterCommand::DamageBoss { amount } => {
                if let Err(err) = self.damage_boss(amount) {
                    tracing::debug!(error = %err, "boss damage dropped");
                }
            }
            EncounterCommand::DamageMinion { minion, amount } => {
                if let Err(err) = self.damage_minion(minion, amount) {
                    tracing::debug!(error = %err, "minion damage dropped");
                }
            }
            EncounterCommand::RemoveMinion { minion } => {
                if let Some(boss) = self.boss.as_mut() {
                    boss.remove_minion(minion, &mut self.world, &mut self.events);
                }
            }
            EncounterCommand::ReportCollision { a, b } => {
                self.route_collision(a, b);
            }
            EncounterCommand::SetTestingInvulnerable { enabled } => {
                self.testing_invulnerable = enabled;
                if let Some(boss) = self.boss.as_mut() {
                    boss.set_testing_invulnerable(enabled);
                }
            }
            EncounterCommand::SetPlayerPosition { position } => {
                self.world.set_player_position(position);
            }
            EncounterCommand::FirePlayerBullet { origin, direction } => {
                self.world.spawn_player_bullet(origin, direction);
            }
            EncounterCommand::AddScore { points } => {
                let threshold_reached = match self.progression.lock() {
                    Ok(mut progression) => progression.add_score(points),
                    Err(_) => {
                        tracing::error!("progression lock poisoned");
                        false
                    }
                };
                if threshold_reached && self.boss.is_none() {
                    if let Err(err) = self.start_encounter() {
                        tracing::warn!(error = %err, "boss spawn refused");
                    }
                }
            }
        }
    }

    /// Route a contact between two entities. Order does not matter; pairs
    /// with no rule, or with an entity that no longer exists, do nothing.
    fn route_collision(&mut self, a: EntityHandle, b: EntityHandle) {
        let (Some(ca), Some(cb)) = (self.world.collider_of(a), self.world.collider_of(b)) else {
            tracing::trace!(?a, ?b, "collision with stale entity ignored");
            return;
        };

        let ((first, first_tag), (second, second_tag)) = if ca.tag <= cb.tag {
            ((a, ca.tag), (b, cb.tag))
        } else {
            ((b, cb.tag), (a, ca.tag))
        };

        match (first_tag, second_tag) {
            (CollisionTag::Bullet, CollisionTag::Boss) => {
                self.world.destroy_entity(first, None);
                self.collide_boss(PLAYER_BULLET_DAMAGE);
            }
            (CollisionTag::Bullet, CollisionTag::Minion) => {
                self.world.destroy_entity(first, None);
                if let Some(minion) = self.world.minion_of(second) {
                    if let Err(err) = self.damage_minion(minion, PLAYER_BULLET_DAMAGE) {
                        tracing::debug!(error = %err, "minion hit dropped");
                    }
                }
            }
            (CollisionTag::Player, CollisionTag::Boss) => {
                self.collide_boss(PLAYER_RAM_DAMAGE);
            }
            (CollisionTag::Player, CollisionTag::Hostile) => {
                if let Some(projectile) = self.world.projectile_of(second) {
                    self.world.destroy_entity(second, None);
                    self.player_hits += 1;
                    self.events.push(EncounterEvent::PlayerHit {
                        tag: projectile.tag,
                    });
                }
            }
            _ => {}
        }
    }

    fn collide_boss(&mut self, amount: i32) {
        if let Err(err) = self.damage_boss(amount) {
            tracing::debug!(error = %err, "boss hit dropped");
        }
    }

    fn after_damage(&mut self, outcome: DamageOutcome) {
        match outcome {
            DamageOutcome::PhaseChanged { to, .. } => {
                self.push_alert(AlertLevel::Warning, format!("Boss entered phase {}", to + 1));
            }
            DamageOutcome::Defeated => {
                self.status = EncounterStatus::Complete;
                self.push_alert(AlertLevel::Info, "Boss defeated".to_string());
            }
            DamageOutcome::Ignored(_) | DamageOutcome::Damaged { .. } => {}
        }
    }

    fn push_alert(&mut self, level: AlertLevel, message: String) {
        self.alerts.push(Alert {
            level,
            message,
            tick: self.time.tick,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;
        self.world.set_now(now);
        let target = self.world.player_position();

        // 1. Boss attack timers
        if let Some(boss) = self.boss.as_mut() {
            boss.update(now, &mut self.world, &mut self.rng, target, &mut self.events);
        }
        // 2. Homing steering
        systems::movement::steer_homing(self.world.ecs_mut(), target);
        // 3. Movement integration
        systems::movement::run(self.world.ecs_mut(), dt as f32);
        // 4. Collisions, routed like reported ones
        for (a, b) in systems::collision::detect(self.world.ecs()) {
            self.route_collision(a, b);
        }
        // 5. Cleanup (expired, out of bounds, delayed destruction)
        systems::cleanup::run(self.world.ecs_mut(), now, &mut self.despawn_buffer);
    }

    fn snapshot(&mut self) -> EncounterSnapshot {
        let progression = match self.progression.lock() {
            Ok(progression) => progression.view(),
            Err(_) => Default::default(),
        };
        let input = SnapshotInput {
            time: self.time,
            status: self.status,
            boss: self.boss.as_ref(),
            player_hits: self.player_hits,
            progression,
            events: std::mem::take(&mut self.events),
            alerts: std::mem::take(&mut self.alerts),
        };
        systems::snapshot::build_snapshot(&self.world, input)
    }
}
