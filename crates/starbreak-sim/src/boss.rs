//! Boss state machine: HP, phase selection, the minion shield and the
//! three attack timers.
//!
//! Lifecycle is `Active { phase }` → `Defeated`. Phases only move forward;
//! one damage application moves at most one step, though that step may skip
//! over intermediate phases.

use std::sync::Arc;

use glam::Vec2;
use rand::Rng;

use starbreak_core::config::EncounterConfig;
use starbreak_core::enums::{BossStatus, IgnoreReason, ProjectileTag};
use starbreak_core::events::EncounterEvent;
use starbreak_core::phase::{PhaseEntry, PhaseTable};
use starbreak_core::types::{EntityHandle, MinionId};
use starbreak_patterns::radial::radial_burst;
use starbreak_patterns::ring::ring_position;
use starbreak_patterns::spiral::{SpiralBurst, SpiralParams};
use starbreak_patterns::spread::aim_at;
use starbreak_patterns::Emission;

use crate::minions::{MinionDamage, MinionRegistry};
use crate::progression::{DefeatReport, EncounterListener};
use crate::world::SpatialWorld;

/// Encounter-wide tuning the boss reads alongside its phase table.
#[derive(Debug, Clone, PartialEq)]
pub struct BossSettings {
    pub max_hp: i32,
    pub ring_min: f32,
    pub ring_max: f32,
    pub jitter_degrees: f32,
    pub defeat_grace_secs: f64,
    /// Spiral cadence as a multiple of the phase's projectile interval.
    pub spiral_interval_factor: f64,
    pub homing_missile_speed: f32,
}

impl BossSettings {
    pub fn from_config(config: &EncounterConfig) -> Self {
        Self {
            max_hp: config.boss_max_hp,
            ring_min: config.minion_ring_min,
            ring_max: config.minion_ring_max,
            jitter_degrees: config.minion_jitter_degrees,
            defeat_grace_secs: config.defeat_grace_secs,
            spiral_interval_factor: config.spiral_interval_factor,
            homing_missile_speed: config.homing_missile_speed,
        }
    }
}

impl Default for BossSettings {
    fn default() -> Self {
        Self::from_config(&EncounterConfig::default())
    }
}

/// What a call to [`Boss::take_damage`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored(IgnoreReason),
    Damaged { hp: i32 },
    PhaseChanged { from: usize, to: usize, hp: i32 },
    Defeated,
}

pub struct Boss {
    phases: Arc<PhaseTable>,
    settings: BossSettings,
    hp: i32,
    status: BossStatus,
    last_phase: usize,
    position: Vec2,
    entity: Option<EntityHandle>,
    hp_bar_visible: bool,
    testing_invulnerable: bool,

    next_projectile_time: f64,
    next_spiral_time: f64,
    next_homing_time: f64,

    minions: MinionRegistry,
    minions_destroyed: u32,
    spirals: Vec<SpiralBurst>,
    listener: Box<dyn EncounterListener>,
    /// (phase, attack) pairs already reported as misconfigured.
    warned: Vec<(usize, &'static str)>,
}

impl Boss {
    /// Create a boss in phase 0 at full HP. Every attack is due at `now`.
    pub fn new(
        phases: Arc<PhaseTable>,
        settings: BossSettings,
        position: Vec2,
        entity: Option<EntityHandle>,
        now: f64,
        listener: Box<dyn EncounterListener>,
    ) -> Self {
        let hp = settings.max_hp.max(1);
        Self {
            phases,
            settings: BossSettings {
                max_hp: hp,
                ..settings
            },
            hp,
            status: BossStatus::Active { phase: 0 },
            last_phase: 0,
            position,
            entity,
            hp_bar_visible: true,
            testing_invulnerable: false,
            next_projectile_time: now,
            next_spiral_time: now,
            next_homing_time: now,
            minions: MinionRegistry::new(),
            minions_destroyed: 0,
            spirals: Vec::new(),
            listener,
            warned: Vec::new(),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.settings.max_hp
    }

    /// HP bar fill in `[0, 1]`.
    pub fn hp_fraction(&self) -> f32 {
        (self.hp.max(0) as f32 / self.settings.max_hp as f32).clamp(0.0, 1.0)
    }

    pub fn hp_bar_visible(&self) -> bool {
        self.hp_bar_visible
    }

    pub fn status(&self) -> BossStatus {
        self.status
    }

    pub fn is_defeated(&self) -> bool {
        self.status == BossStatus::Defeated
    }

    /// Current phase index. A defeated boss reports the phase it died in.
    pub fn phase_index(&self) -> usize {
        match self.status {
            BossStatus::Active { phase } => phase,
            BossStatus::Defeated => self.last_phase,
        }
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    /// Settings of the phase the boss is in, or `None` for an empty table.
    pub fn current_phase_settings(&self) -> Option<&PhaseEntry> {
        self.phases.get(self.phase_index())
    }

    /// True while at least one minion is registered.
    pub fn is_shielded(&self) -> bool {
        !self.minions.is_empty()
    }

    pub fn minions(&self) -> &MinionRegistry {
        &self.minions
    }

    pub fn minions_destroyed(&self) -> u32 {
        self.minions_destroyed
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn entity(&self) -> Option<EntityHandle> {
        self.entity
    }

    pub fn active_spirals(&self) -> usize {
        self.spirals.len()
    }

    pub fn set_testing_invulnerable(&mut self, enabled: bool) {
        self.testing_invulnerable = enabled;
    }

    pub fn testing_invulnerable(&self) -> bool {
        self.testing_invulnerable
    }

    /// Spawn the current phase's minion quota. Used once at encounter start.
    pub fn spawn_phase_minions<W, R>(
        &mut self,
        world: &mut W,
        rng: &mut R,
        now: f64,
        events: &mut Vec<EncounterEvent>,
    ) -> usize
    where
        W: SpatialWorld + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(phase) = self.current_phase_settings().cloned() else {
            return 0;
        };
        self.spawn_minions_for(&phase, world, rng, now, events)
    }

    /// Apply damage to the boss.
    ///
    /// Dropped entirely while defeated, while the testing flag is set, or
    /// while any minion lives. Otherwise HP drops and the highest eligible
    /// phase past the current one is entered.
    pub fn take_damage<W, R>(
        &mut self,
        amount: i32,
        world: &mut W,
        rng: &mut R,
        now: f64,
        events: &mut Vec<EncounterEvent>,
    ) -> DamageOutcome
    where
        W: SpatialWorld + ?Sized,
        R: Rng + ?Sized,
    {
        let current = match self.status {
            BossStatus::Defeated => return self.ignore(amount, IgnoreReason::Defeated, events),
            BossStatus::Active { phase } => phase,
        };
        if self.testing_invulnerable {
            return self.ignore(amount, IgnoreReason::TestingInvulnerable, events);
        }
        self.prune_stale_minions(&*world, events);
        if !self.minions.is_empty() {
            return self.ignore(amount, IgnoreReason::Shielded, events);
        }

        let amount = amount.max(0);
        self.hp = (self.hp - amount).max(0);
        events.push(EncounterEvent::BossDamaged {
            amount,
            hp: self.hp,
        });
        tracing::debug!(amount, hp = self.hp, "boss damaged");

        if self.hp == 0 {
            self.die(world, now, events);
            return DamageOutcome::Defeated;
        }

        let health_percent = self.hp as f32 / self.settings.max_hp as f32 * 100.0;
        match self.phases.next_phase_for(health_percent, current) {
            Some(next) => {
                self.enter_phase(current, next, world, rng, now, events);
                DamageOutcome::PhaseChanged {
                    from: current,
                    to: next,
                    hp: self.hp,
                }
            }
            None => DamageOutcome::Damaged { hp: self.hp },
        }
    }

    /// Damage one minion. Destroying the last one lowers the shield.
    pub fn damage_minion<W: SpatialWorld + ?Sized>(
        &mut self,
        minion: MinionId,
        amount: i32,
        world: &mut W,
        events: &mut Vec<EncounterEvent>,
    ) -> MinionDamage {
        let result = self.minions.take_damage(world, minion, amount);
        if matches!(result, MinionDamage::Destroyed | MinionDamage::Pruned) {
            self.on_minion_destroyed(minion, events);
        }
        result
    }

    /// Remove a minion without damage, e.g. when its body was destroyed
    /// elsewhere. Unknown ids are ignored.
    pub fn remove_minion<W: SpatialWorld + ?Sized>(
        &mut self,
        minion: MinionId,
        world: &mut W,
        events: &mut Vec<EncounterEvent>,
    ) -> bool {
        let removed = self.minions.remove(world, minion);
        if removed {
            self.on_minion_destroyed(minion, events);
        }
        removed
    }

    /// Run every attack timer that is due at `now`. Returns the number of
    /// projectiles spawned.
    pub fn update<W, R>(
        &mut self,
        now: f64,
        world: &mut W,
        rng: &mut R,
        target: Option<Vec2>,
        events: &mut Vec<EncounterEvent>,
    ) -> usize
    where
        W: SpatialWorld + ?Sized,
        R: Rng + ?Sized,
    {
        let BossStatus::Active { phase: index } = self.status else {
            return 0;
        };
        let phases = Arc::clone(&self.phases);
        let Some(phase) = phases.get(index) else {
            self.warn_skip(index, "all", "phase table is empty", events);
            return 0;
        };

        let mut spawned = 0;

        // Main radial burst.
        if now >= self.next_projectile_time {
            let burst = radial_burst(
                phase.projectile_count,
                phase.projectile_speed,
                self.position,
                ProjectileTag::BossBurst,
            );
            if burst.is_empty() {
                self.warn_skip(
                    index,
                    "radial",
                    "projectile count is not positive",
                    events,
                );
            } else {
                spawned += spawn_all(world, &burst);
                events.push(EncounterEvent::RadialBurst { count: burst.len() });
            }
            self.next_projectile_time += phase.projectile_interval;
        }

        // Minion spread fire.
        spawned += self.minions.fire_due(
            world,
            now,
            phase,
            target,
            self.settings.jitter_degrees,
            rng,
        );

        // Spiral launch.
        if phase.spiral_enabled && now >= self.next_spiral_time {
            if phase.spiral_projectile_count <= 0 {
                self.warn_skip(
                    index,
                    "spiral",
                    "spiral projectile count is not positive",
                    events,
                );
            } else {
                let params = SpiralParams {
                    count: phase.spiral_projectile_count,
                    angle_step: phase.spiral_angle_step,
                    shot_delay: phase.spiral_projectile_delay,
                    speed: phase.projectile_speed,
                };
                self.spirals.push(SpiralBurst::new(params, self.position, now));
                events.push(EncounterEvent::SpiralStarted {
                    shots: phase.spiral_projectile_count as usize,
                });
            }
            self.next_spiral_time +=
                self.settings.spiral_interval_factor * phase.projectile_interval;
        }

        // In-flight spirals, at most one shot each per tick.
        for spiral in self.spirals.iter_mut() {
            if let Some(shot) = spiral.poll(now) {
                world.spawn_projectile(&shot.emission);
                spawned += 1;
            }
        }
        self.spirals.retain(|s| !s.is_finished());

        // Homing missile.
        if let Some(interval) = phase.homing_missile_interval {
            if now >= self.next_homing_time {
                if let Some(target) = target {
                    let missile = Emission {
                        origin: self.position,
                        direction: aim_at(self.position, target),
                        speed: self.settings.homing_missile_speed,
                        tag: ProjectileTag::HomingMissile,
                    };
                    world.spawn_projectile(&missile);
                    events.push(EncounterEvent::HomingMissileLaunched);
                    spawned += 1;
                }
                self.next_homing_time += interval;
            }
        }

        spawned
    }

    fn ignore(
        &self,
        amount: i32,
        reason: IgnoreReason,
        events: &mut Vec<EncounterEvent>,
    ) -> DamageOutcome {
        tracing::debug!(amount, ?reason, "boss damage ignored");
        events.push(EncounterEvent::DamageIgnored { amount, reason });
        DamageOutcome::Ignored(reason)
    }

    fn enter_phase<W, R>(
        &mut self,
        from: usize,
        to: usize,
        world: &mut W,
        rng: &mut R,
        now: f64,
        events: &mut Vec<EncounterEvent>,
    ) where
        W: SpatialWorld + ?Sized,
        R: Rng + ?Sized,
    {
        self.status = BossStatus::Active { phase: to };
        self.last_phase = to;
        self.prune_stale_minions(&*world, events);
        self.next_projectile_time = now;
        self.next_spiral_time = now;
        self.next_homing_time = now;

        tracing::info!(from, to, hp = self.hp, "boss phase changed");
        events.push(EncounterEvent::PhaseChanged {
            from,
            to,
            hp: self.hp,
        });
        self.listener.on_phase_changed(from, to);

        if let Some(phase) = self.phases.get(to).cloned() {
            self.spawn_minions_for(&phase, world, rng, now, events);
        }
    }

    fn spawn_minions_for<W, R>(
        &mut self,
        phase: &PhaseEntry,
        world: &mut W,
        rng: &mut R,
        now: f64,
        events: &mut Vec<EncounterEvent>,
    ) -> usize
    where
        W: SpatialWorld + ?Sized,
        R: Rng + ?Sized,
    {
        let center = self.position;
        let (min, max) = (self.settings.ring_min, self.settings.ring_max);
        let spawned = self.minions.spawn(
            world,
            phase.immovable_asteroids_to_spawn,
            phase.immovable_asteroid_hp,
            now + phase.asteroid_bullet_interval,
            || ring_position(center, min, max, &mut *rng),
        );
        if !spawned.is_empty() {
            tracing::debug!(count = spawned.len(), "minions spawned");
            events.push(EncounterEvent::MinionsSpawned {
                count: spawned.len(),
            });
        }
        spawned.len()
    }

    /// Drop minions whose bodies were destroyed elsewhere, reporting each as
    /// destroyed.
    fn prune_stale_minions<W: SpatialWorld + ?Sized>(
        &mut self,
        world: &W,
        events: &mut Vec<EncounterEvent>,
    ) {
        let pruned = self.minions.prune_stale(world);
        if !pruned.is_empty() {
            tracing::debug!(pruned = pruned.len(), "stale minions pruned");
        }
        for minion in pruned {
            self.on_minion_destroyed(minion, events);
        }
    }

    fn on_minion_destroyed(&mut self, minion: MinionId, events: &mut Vec<EncounterEvent>) {
        self.minions_destroyed += 1;
        tracing::debug!(%minion, remaining = self.minions.len(), "minion destroyed");
        events.push(EncounterEvent::MinionDestroyed { minion });
        if self.minions.is_empty() && !self.is_defeated() {
            events.push(EncounterEvent::ShieldDown);
        }
    }

    fn die<W: SpatialWorld + ?Sized>(
        &mut self,
        world: &mut W,
        now: f64,
        events: &mut Vec<EncounterEvent>,
    ) {
        let final_phase = self.phase_index();
        self.status = BossStatus::Defeated;
        self.hp_bar_visible = false;

        for spiral in self.spirals.iter_mut() {
            let remaining = spiral.cancel();
            if remaining > 0 {
                tracing::debug!(remaining, "spiral cancelled");
                events.push(EncounterEvent::SpiralCancelled { remaining });
            }
        }
        self.spirals.clear();

        tracing::info!(final_phase, "boss defeated");
        events.push(EncounterEvent::BossDefeated);
        self.listener.on_boss_defeated(&DefeatReport {
            defeated_at: now,
            max_hp: self.settings.max_hp,
            final_phase,
            minions_destroyed: self.minions_destroyed,
        });

        if let Some(entity) = self.entity {
            world.destroy_entity(entity, Some(self.settings.defeat_grace_secs));
        }
    }

    fn warn_skip(
        &mut self,
        phase: usize,
        attack: &'static str,
        reason: &str,
        events: &mut Vec<EncounterEvent>,
    ) {
        if self.warned.contains(&(phase, attack)) {
            return;
        }
        self.warned.push((phase, attack));
        tracing::warn!(phase, attack, reason, "attack skipped");
        events.push(EncounterEvent::AttackSkipped {
            attack: attack.to_string(),
            reason: reason.to_string(),
        });
    }
}

fn spawn_all<W: SpatialWorld + ?Sized>(world: &mut W, shots: &[Emission]) -> usize {
    for shot in shots {
        world.spawn_projectile(shot);
    }
    shots.len()
}
