//! Homing missile steering.

use glam::Vec2;

/// Velocity that heads straight from `position` to `target` at `speed`.
/// `None` when the missile is already on top of its target.
pub fn steer(position: Vec2, target: Vec2, speed: f32) -> Option<Vec2> {
    (target - position).try_normalize().map(|dir| dir * speed)
}
