//! Random placement on a ring around a center point.

use glam::Vec2;
use rand::Rng;

use starbreak_core::types::direction_from_degrees;

/// Point at a uniform angle in `[0, 360)` and a uniform distance in
/// `[min_distance, max_distance]` from `center`.
///
/// A non-finite or inverted ring collapses to `min_distance`, or to the
/// center when that is not finite either.
pub fn ring_position<R: Rng + ?Sized>(
    center: Vec2,
    min_distance: f32,
    max_distance: f32,
    rng: &mut R,
) -> Vec2 {
    let angle: f32 = rng.gen_range(0.0..360.0);
    let min_distance = if min_distance.is_finite() {
        min_distance.max(0.0)
    } else {
        0.0
    };
    let distance = if max_distance.is_finite() && max_distance > min_distance {
        rng.gen_range(min_distance..=max_distance)
    } else {
        min_distance
    };
    center + direction_from_degrees(angle) * distance
}
