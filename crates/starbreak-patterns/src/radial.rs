//! Radial burst: projectiles emitted at once in evenly spaced directions.

use glam::Vec2;

use starbreak_core::enums::ProjectileTag;
use starbreak_core::types::direction_from_degrees;

use crate::emission::Emission;

/// `count` shots spaced `360 / count` degrees apart, the first at 0°.
/// A non-positive count yields no shots.
pub fn radial_burst(count: i32, speed: f32, origin: Vec2, tag: ProjectileTag) -> Vec<Emission> {
    if count <= 0 {
        return Vec::new();
    }

    let angle_step = 360.0 / count as f32;
    (0..count)
        .map(|i| Emission {
            origin,
            direction: direction_from_degrees(i as f32 * angle_step),
            speed,
            tag,
        })
        .collect()
}
