//! Projectile spawn descriptor shared by every pattern.

use glam::Vec2;

use starbreak_core::enums::ProjectileTag;

/// One projectile to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    pub origin: Vec2,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub tag: ProjectileTag,
}

impl Emission {
    /// Initial velocity: direction scaled to speed.
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}
