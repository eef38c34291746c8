//! Kinematic integration and homing steering.

use glam::Vec2;
use hecs::World;

use starbreak_core::components::{Homing, Projectile};
use starbreak_core::types::{Position, Velocity};
use starbreak_patterns::homing::steer;

/// position += velocity * dt for everything that moves.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * dt;
    }
}

/// Point every homing projectile at `target`, keeping its speed.
pub fn steer_homing(world: &mut World, target: Option<Vec2>) {
    let Some(target) = target else {
        return;
    };
    for (_entity, (pos, vel, projectile, _homing)) in
        world.query_mut::<(&Position, &mut Velocity, &Projectile, &Homing)>()
    {
        if let Some(v) = steer(pos.0, target, projectile.speed) {
            vel.0 = v;
        }
    }
}
