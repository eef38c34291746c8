//! Spatial world: the entity container the boss spawns into.
//!
//! The boss never touches hecs directly. It talks to a `SpatialWorld`, which
//! the engine implements over a hecs `World` and tests implement with a
//! recording fake.

use glam::Vec2;
use hecs::{Entity, World};

use starbreak_core::components::*;
use starbreak_core::constants::*;
use starbreak_core::enums::{CollisionTag, ProjectileTag};
use starbreak_core::types::{EntityHandle, MinionId, Position, Velocity};
use starbreak_patterns::Emission;

/// Operations the encounter needs from the world it lives in.
pub trait SpatialWorld {
    /// Current simulation time in seconds.
    fn now(&self) -> f64;

    /// Spawn a projectile at its origin moving along its direction.
    fn spawn_projectile(&mut self, emission: &Emission) -> EntityHandle;

    /// Spawn the body of a minion at `position`.
    fn spawn_minion_entity(&mut self, minion: MinionId, position: Vec2) -> EntityHandle;

    /// Whether the handle still refers to a live entity.
    fn contains(&self, handle: EntityHandle) -> bool;

    fn position_of(&self, handle: EntityHandle) -> Option<Vec2>;

    /// Destroy now, or after `delay` seconds when given.
    fn destroy_entity(&mut self, handle: EntityHandle, delay: Option<f64>);
}

pub(crate) fn to_handle(entity: Entity) -> EntityHandle {
    EntityHandle(entity.to_bits().get())
}

pub(crate) fn to_entity(handle: EntityHandle) -> Option<Entity> {
    Entity::from_bits(handle.0)
}

/// hecs-backed world used by the engine.
pub struct HecsWorld {
    world: World,
    now: f64,
    projectile_lifetime: f64,
    player: Option<Entity>,
    hostile_fired: u32,
}

impl HecsWorld {
    pub fn new(projectile_lifetime: f64) -> Self {
        Self {
            world: World::new(),
            now: 0.0,
            projectile_lifetime,
            player: None,
            hostile_fired: 0,
        }
    }

    pub fn set_now(&mut self, now: f64) {
        self.now = now;
    }

    pub fn set_projectile_lifetime(&mut self, secs: f64) {
        self.projectile_lifetime = secs;
    }

    pub fn ecs(&self) -> &World {
        &self.world
    }

    pub fn ecs_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Total hostile projectiles spawned since creation.
    pub fn hostile_fired(&self) -> u32 {
        self.hostile_fired
    }

    pub fn spawn_boss(&mut self, position: Vec2) -> EntityHandle {
        let entity = self.world.spawn((
            BossBody,
            Position(position),
            Collider {
                tag: CollisionTag::Boss,
                radius: BOSS_RADIUS,
            },
        ));
        to_handle(entity)
    }

    /// Spawn the player ship, or return the existing one.
    pub fn ensure_player(&mut self, position: Vec2) -> EntityHandle {
        if let Some(entity) = self.player.filter(|e| self.world.contains(*e)) {
            return to_handle(entity);
        }
        let entity = self.world.spawn((
            PlayerShip,
            Position(position),
            Collider {
                tag: CollisionTag::Player,
                radius: PLAYER_RADIUS,
            },
        ));
        self.player = Some(entity);
        to_handle(entity)
    }

    pub fn player_handle(&self) -> Option<EntityHandle> {
        self.player.map(to_handle)
    }

    pub fn player_position(&self) -> Option<Vec2> {
        let entity = self.player?;
        self.world.get::<&Position>(entity).ok().map(|p| p.0)
    }

    pub fn set_player_position(&mut self, position: Vec2) {
        if let Some(entity) = self.player {
            if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
                pos.0 = position;
            }
        }
    }

    /// Fire a player bullet. A zero direction fires along +X.
    pub fn spawn_player_bullet(&mut self, origin: Vec2, direction: Vec2) -> EntityHandle {
        let emission = Emission {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec2::X),
            speed: PLAYER_BULLET_SPEED,
            tag: ProjectileTag::PlayerBullet,
        };
        self.spawn_projectile(&emission)
    }

    pub fn collider_of(&self, handle: EntityHandle) -> Option<Collider> {
        let entity = to_entity(handle)?;
        self.world.get::<&Collider>(entity).ok().map(|c| *c)
    }

    pub fn minion_of(&self, handle: EntityHandle) -> Option<MinionId> {
        let entity = to_entity(handle)?;
        self.world.get::<&MinionBody>(entity).ok().map(|m| m.minion)
    }

    pub fn projectile_of(&self, handle: EntityHandle) -> Option<Projectile> {
        let entity = to_entity(handle)?;
        self.world.get::<&Projectile>(entity).ok().map(|p| *p)
    }

    /// Remove every projectile and minion body. The player stays.
    pub fn clear_encounter_entities(&mut self) {
        let doomed: Vec<Entity> = self
            .world
            .iter()
            .map(|e| e.entity())
            .filter(|e| Some(*e) != self.player)
            .collect();
        for entity in doomed {
            let _ = self.world.despawn(entity);
        }
    }
}

impl SpatialWorld for HecsWorld {
    fn now(&self) -> f64 {
        self.now
    }

    fn spawn_projectile(&mut self, emission: &Emission) -> EntityHandle {
        let collider_tag = if emission.tag.is_hostile() {
            self.hostile_fired += 1;
            CollisionTag::Hostile
        } else {
            CollisionTag::Bullet
        };
        let projectile = Projectile {
            tag: emission.tag,
            speed: emission.speed,
            expires_at: self.now + self.projectile_lifetime,
        };
        let collider = Collider {
            tag: collider_tag,
            radius: PROJECTILE_RADIUS,
        };
        let pos = Position(emission.origin);
        let vel = Velocity(emission.velocity());

        let entity = if emission.tag == ProjectileTag::HomingMissile {
            self.world.spawn((projectile, pos, vel, collider, Homing))
        } else {
            self.world.spawn((projectile, pos, vel, collider))
        };
        to_handle(entity)
    }

    fn spawn_minion_entity(&mut self, minion: MinionId, position: Vec2) -> EntityHandle {
        let entity = self.world.spawn((
            MinionBody { minion },
            Position(position),
            Collider {
                tag: CollisionTag::Minion,
                radius: MINION_RADIUS,
            },
        ));
        to_handle(entity)
    }

    fn contains(&self, handle: EntityHandle) -> bool {
        to_entity(handle).is_some_and(|e| self.world.contains(e))
    }

    fn position_of(&self, handle: EntityHandle) -> Option<Vec2> {
        let entity = to_entity(handle)?;
        self.world.get::<&Position>(entity).ok().map(|p| p.0)
    }

    fn destroy_entity(&mut self, handle: EntityHandle, delay: Option<f64>) {
        let Some(entity) = to_entity(handle) else {
            return;
        };
        match delay {
            Some(delay) if delay > 0.0 => {
                let _ = self.world.insert_one(entity, DespawnAt { at: self.now + delay });
            }
            _ => {
                let _ = self.world.despawn(entity);
            }
        }
    }
}
