#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use starbreak_core::enums::ProjectileTag;
    use starbreak_core::types::degrees_of;

    use crate::homing::steer;
    use crate::radial::radial_burst;
    use crate::ring::ring_position;
    use crate::spiral::{SpiralBurst, SpiralParams};
    use crate::spread::{aim_at, minion_spread};

    fn assert_angle(direction: Vec2, expected: f32) {
        let actual = degrees_of(direction);
        let diff = (actual - expected).abs();
        let diff = diff.min(360.0 - diff);
        assert!(diff < 1e-3, "expected {expected}°, got {actual}°");
    }

    // ---- Radial ----

    #[test]
    fn test_radial_four_way() {
        let shots = radial_burst(4, 10.0, Vec2::ZERO, ProjectileTag::BossBurst);
        assert_eq!(shots.len(), 4);
        for (shot, expected) in shots.iter().zip([0.0, 90.0, 180.0, 270.0]) {
            assert_angle(shot.direction, expected);
            assert!((shot.velocity().length() - 10.0).abs() < 1e-4);
            assert_eq!(shot.tag, ProjectileTag::BossBurst);
        }
    }

    #[test]
    fn test_radial_non_positive_count_is_empty() {
        assert!(radial_burst(0, 10.0, Vec2::ZERO, ProjectileTag::BossBurst).is_empty());
        assert!(radial_burst(-3, 10.0, Vec2::ZERO, ProjectileTag::BossBurst).is_empty());
    }

    #[test]
    fn test_radial_single_shot_points_right() {
        let origin = Vec2::new(3.0, -2.0);
        let shots = radial_burst(1, 5.0, origin, ProjectileTag::BossBurst);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].origin, origin);
        assert_angle(shots[0].direction, 0.0);
    }

    // ---- Spiral ----

    fn spiral(count: i32) -> SpiralBurst {
        SpiralBurst::new(
            SpiralParams {
                count,
                angle_step: 20.0,
                shot_delay: 0.05,
                speed: 7.0,
            },
            Vec2::ZERO,
            1.0,
        )
    }

    /// Poll at a fine step until the spiral finishes or `until` passes.
    fn drain(burst: &mut SpiralBurst, until: f64) -> Vec<crate::spiral::SpiralShot> {
        let mut shots = Vec::new();
        let mut now = 1.0;
        while now <= until && !burst.is_finished() {
            if let Some(shot) = burst.poll(now) {
                shots.push(shot);
            }
            now += 0.001;
        }
        shots
    }

    #[test]
    fn test_spiral_five_shots() {
        let mut burst = spiral(5);
        let shots = drain(&mut burst, 2.0);
        assert_eq!(shots.len(), 5);
        for (i, shot) in shots.iter().enumerate() {
            assert_angle(shot.emission.direction, i as f32 * 20.0);
            let expected_due = 1.0 + i as f64 * 0.05;
            assert!((shot.due_at - expected_due).abs() < 1e-9);
            assert_eq!(shot.emission.tag, ProjectileTag::Spiral);
        }
        assert!(burst.is_finished());
        assert!(burst.poll(10.0).is_none());
    }

    #[test]
    fn test_spiral_at_most_one_shot_per_poll() {
        let mut burst = spiral(5);
        // Far in the future: everything is overdue, still one per poll.
        assert!(burst.poll(5.0).is_some());
        assert_eq!(burst.emitted(), 1);
        assert!(burst.poll(5.0).is_some());
        assert_eq!(burst.emitted(), 2);
    }

    #[test]
    fn test_spiral_not_due_yet() {
        let mut burst = spiral(5);
        assert!(burst.poll(1.0).is_some());
        assert!(burst.poll(1.01).is_none());
        assert!(burst.poll(1.06).is_some());
    }

    #[test]
    fn test_spiral_cancel_after_two() {
        let mut burst = spiral(5);
        assert!(burst.poll(1.0).is_some());
        assert!(burst.poll(1.06).is_some());
        assert_eq!(burst.cancel(), 3);
        assert!(burst.is_cancelled());
        assert!(burst.poll(2.0).is_none());
        assert_eq!(burst.emitted(), 2);
        assert_eq!(burst.remaining(), 0);
    }

    #[test]
    fn test_spiral_non_positive_count_is_finished() {
        let mut burst = spiral(0);
        assert!(burst.is_finished());
        assert!(burst.poll(1.0).is_none());
        assert!(spiral(-4).is_finished());
    }

    #[test]
    fn test_spirals_are_independent() {
        let mut first = spiral(3);
        let mut second = spiral(3);
        first.poll(1.0);
        first.cancel();
        assert!(second.poll(1.0).is_some());
        assert_eq!(second.remaining(), 2);
    }

    // ---- Spread ----

    #[test]
    fn test_spread_single_shot_has_no_jitter() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let base = Vec2::new(0.0, 1.0);
        let shots = minion_spread(1, base, 15.0, 6.0, Vec2::ZERO, &mut rng);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].direction, base);
        assert_eq!(shots[0].tag, ProjectileTag::MinionBullet);
    }

    #[test]
    fn test_spread_jitter_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let shots = minion_spread(200, Vec2::X, 15.0, 6.0, Vec2::ZERO, &mut rng);
        assert_eq!(shots.len(), 200);
        let mut any_rotated = false;
        for shot in &shots {
            let angle = degrees_of(shot.direction);
            let offset = if angle > 180.0 { angle - 360.0 } else { angle };
            assert!(offset.abs() <= 15.0 + 1e-3, "offset {offset} out of range");
            assert!((shot.direction.length() - 1.0).abs() < 1e-4);
            any_rotated |= offset.abs() > 0.01;
        }
        assert!(any_rotated, "jitter should rotate at least one shot");
    }

    #[test]
    fn test_spread_non_finite_jitter_fires_straight() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for jitter in [f32::INFINITY, f32::NAN] {
            let shots = minion_spread(3, Vec2::Y, jitter, 6.0, Vec2::ZERO, &mut rng);
            assert_eq!(shots.len(), 3);
            assert!(shots.iter().all(|s| s.direction == Vec2::Y));
        }
    }

    #[test]
    fn test_spread_huge_jitter_is_a_half_turn() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let shots = minion_spread(50, Vec2::X, f32::MAX, 6.0, Vec2::ZERO, &mut rng);
        assert_eq!(shots.len(), 50);
        assert!(shots
            .iter()
            .all(|s| (s.direction.length() - 1.0).abs() < 1e-4));
    }

    #[test]
    fn test_spread_non_positive_count_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(minion_spread(0, Vec2::X, 15.0, 6.0, Vec2::ZERO, &mut rng).is_empty());
        assert!(minion_spread(-1, Vec2::X, 15.0, 6.0, Vec2::ZERO, &mut rng).is_empty());
    }

    #[test]
    fn test_spread_zero_base_direction_falls_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let shots = minion_spread(1, Vec2::ZERO, 15.0, 6.0, Vec2::ZERO, &mut rng);
        assert_eq!(shots[0].direction, Vec2::X);
    }

    #[test]
    fn test_aim_at() {
        let dir = aim_at(Vec2::new(1.0, 1.0), Vec2::new(1.0, 5.0));
        assert!((dir - Vec2::Y).length() < 1e-6);
        assert_eq!(aim_at(Vec2::ONE, Vec2::ONE), Vec2::X);
    }

    // ---- Ring / homing ----

    #[test]
    fn test_ring_position_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let center = Vec2::new(10.0, -4.0);
        for _ in 0..500 {
            let p = ring_position(center, 8.0, 15.0, &mut rng);
            let d = p.distance(center);
            assert!((8.0 - 1e-3..=15.0 + 1e-3).contains(&d), "distance {d}");
        }
    }

    #[test]
    fn test_ring_degenerate_width() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let p = ring_position(Vec2::ZERO, 5.0, 5.0, &mut rng);
        assert!((p.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ring_non_finite_bounds_collapse() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let p = ring_position(Vec2::ZERO, 8.0, f32::INFINITY, &mut rng);
        assert!((p.length() - 8.0).abs() < 1e-4);

        let p = ring_position(Vec2::new(2.0, 3.0), f32::NAN, f32::NAN, &mut rng);
        assert_eq!(p, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_steer_toward_target() {
        let v = steer(Vec2::ZERO, Vec2::new(0.0, 10.0), 5.0).unwrap();
        assert!((v - Vec2::new(0.0, 5.0)).length() < 1e-5);
        assert!(steer(Vec2::ONE, Vec2::ONE, 5.0).is_none());
    }
}
