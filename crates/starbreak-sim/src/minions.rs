//! Minion registry: the immovable asteroids that shield the boss.
//!
//! Slots are addressed by generational `MinionId`s so a stale id from a
//! destroyed minion can never alias a newer one that reused its slot.

use glam::Vec2;
use rand::Rng;

use starbreak_core::phase::PhaseEntry;
use starbreak_core::types::{EntityHandle, MinionId};
use starbreak_patterns::spread::{aim_at, minion_spread};

use crate::world::SpatialWorld;

/// One live minion.
#[derive(Debug, Clone)]
pub struct Minion {
    pub id: MinionId,
    pub hp: i32,
    pub entity: EntityHandle,
    pub position: Vec2,
    pub next_fire_time: f64,
}

/// Result of damaging a minion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinionDamage {
    /// Id is stale or was never issued.
    Unknown,
    /// The minion's body was already gone; the entry has now been dropped.
    Pruned,
    Damaged { hp: i32 },
    Destroyed,
}

#[derive(Debug, Default)]
pub struct MinionRegistry {
    slots: Vec<Option<Minion>>,
    generations: Vec<u32>,
    free_indices: Vec<u32>,
    live: usize,
}

impl MinionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: MinionId) -> Option<&Minion> {
        self.slots
            .get(id.index as usize)
            .and_then(|slot| slot.as_ref())
            .filter(|m| m.id == id)
    }

    pub fn contains(&self, id: MinionId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Minion> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// Spawn `count` minions with `hp` each, placed by `place`. Every new
    /// minion first fires at `first_fire_at`.
    pub fn spawn<W: SpatialWorld + ?Sized>(
        &mut self,
        world: &mut W,
        count: i32,
        hp: i32,
        first_fire_at: f64,
        mut place: impl FnMut() -> Vec2,
    ) -> Vec<MinionId> {
        let count = count.max(0) as usize;
        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.allocate();
            let position = place();
            let entity = world.spawn_minion_entity(id, position);
            self.slots[id.index as usize] = Some(Minion {
                id,
                hp,
                entity,
                position,
                next_fire_time: first_fire_at,
            });
            self.live += 1;
            spawned.push(id);
        }
        spawned
    }

    /// Apply damage. At zero HP the minion leaves the registry and its
    /// entity is destroyed.
    pub fn take_damage<W: SpatialWorld + ?Sized>(
        &mut self,
        world: &mut W,
        id: MinionId,
        amount: i32,
    ) -> MinionDamage {
        let Some(minion) = self.get_mut(id) else {
            return MinionDamage::Unknown;
        };
        if !world.contains(minion.entity) {
            self.release(id);
            return MinionDamage::Pruned;
        }

        minion.hp -= amount.max(0);
        if minion.hp > 0 {
            return MinionDamage::Damaged { hp: minion.hp };
        }

        let entity = minion.entity;
        self.release(id);
        world.destroy_entity(entity, None);
        MinionDamage::Destroyed
    }

    /// Drop a minion from the registry, destroying its entity if it still
    /// exists. Returns false for unknown ids.
    pub fn remove<W: SpatialWorld + ?Sized>(&mut self, world: &mut W, id: MinionId) -> bool {
        let Some(minion) = self.release(id) else {
            return false;
        };
        if world.contains(minion.entity) {
            world.destroy_entity(minion.entity, None);
        }
        true
    }

    /// Forget minions whose entity was destroyed behind our back. Returns the
    /// ids that were dropped.
    pub fn prune_stale<W: SpatialWorld + ?Sized>(&mut self, world: &W) -> Vec<MinionId> {
        let stale: Vec<MinionId> = self
            .iter()
            .filter(|m| !world.contains(m.entity))
            .map(|m| m.id)
            .collect();
        for id in &stale {
            self.release(*id);
        }
        stale
    }

    /// Remove every minion and its entity.
    pub fn clear<W: SpatialWorld + ?Sized>(&mut self, world: &mut W) {
        let ids: Vec<MinionId> = self.iter().map(|m| m.id).collect();
        for id in ids {
            self.remove(world, id);
        }
    }

    /// Fire a spread volley from every minion that is due, aimed at `target`.
    /// Returns the number of projectiles spawned.
    pub fn fire_due<W: SpatialWorld + ?Sized, R: Rng + ?Sized>(
        &mut self,
        world: &mut W,
        now: f64,
        phase: &PhaseEntry,
        target: Option<Vec2>,
        jitter_degrees: f32,
        rng: &mut R,
    ) -> usize {
        let Some(target) = target else {
            return 0;
        };
        if phase.asteroid_bullet_interval <= 0.0 {
            return 0;
        }

        let mut fired = 0;
        for slot in self.slots.iter_mut() {
            let Some(minion) = slot.as_mut() else {
                continue;
            };
            if now < minion.next_fire_time {
                continue;
            }
            // Entity gone: the registry entry is pruned on the next damage check.
            let Some(origin) = world.position_of(minion.entity) else {
                continue;
            };
            minion.position = origin;

            let volley = minion_spread(
                phase.asteroid_bullet_count,
                aim_at(origin, target),
                jitter_degrees,
                phase.asteroid_bullet_speed,
                origin,
                rng,
            );
            for shot in &volley {
                world.spawn_projectile(shot);
            }
            fired += volley.len();
            minion.next_fire_time = now + phase.asteroid_bullet_interval;
        }
        fired
    }

    fn allocate(&mut self) -> MinionId {
        if let Some(index) = self.free_indices.pop() {
            MinionId::new(index, self.generations[index as usize])
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(None);
            self.generations.push(0);
            MinionId::new(index, 0)
        }
    }

    fn get_mut(&mut self, id: MinionId) -> Option<&mut Minion> {
        self.slots
            .get_mut(id.index as usize)
            .and_then(|slot| slot.as_mut())
            .filter(|m| m.id == id)
    }

    fn release(&mut self, id: MinionId) -> Option<Minion> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.as_ref().map(|m| m.id) != Some(id) {
            return None;
        }
        let minion = slot.take()?;
        self.generations[id.index as usize] += 1;
        self.free_indices.push(id.index);
        self.live -= 1;
        Some(minion)
    }
}
