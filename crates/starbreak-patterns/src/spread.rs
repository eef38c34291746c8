//! Minion spread-fire: a volley aimed at the player with random jitter.

use glam::Vec2;
use rand::Rng;

use starbreak_core::enums::ProjectileTag;
use starbreak_core::types::rotate_degrees;

use crate::emission::Emission;

/// Unit vector from `origin` toward `target`. Falls back to +X when the two
/// points coincide.
pub fn aim_at(origin: Vec2, target: Vec2) -> Vec2 {
    (target - origin).try_normalize().unwrap_or(Vec2::X)
}

/// `count` shots along `base_direction`, each rotated by independent uniform
/// noise in `[-jitter_degrees, jitter_degrees]`.
///
/// A single shot is fired exactly along `base_direction` with no jitter, as
/// is every shot when the jitter is zero or not finite.
/// A non-positive count yields nothing.
pub fn minion_spread<R: Rng + ?Sized>(
    count: i32,
    base_direction: Vec2,
    jitter_degrees: f32,
    speed: f32,
    origin: Vec2,
    rng: &mut R,
) -> Vec<Emission> {
    if count <= 0 {
        return Vec::new();
    }

    let base = base_direction.try_normalize().unwrap_or(Vec2::X);
    // Beyond a half turn the noise covers every direction anyway.
    let jitter = jitter_degrees.abs().min(180.0);

    if count == 1 || !jitter.is_finite() || jitter == 0.0 {
        return (0..count)
            .map(|_| Emission {
                origin,
                direction: base,
                speed,
                tag: ProjectileTag::MinionBullet,
            })
            .collect();
    }

    (0..count)
        .map(|_| {
            let noise: f32 = rng.gen_range(-jitter..=jitter);
            Emission {
                origin,
                direction: rotate_degrees(base, noise),
                speed,
                tag: ProjectileTag::MinionBullet,
            }
        })
        .collect()
}
