use proptest::prelude::*;
use showcase::core::math::angle::{advance_angle, shortest_angle_diff};
use showcase::scene::smoother::RotationSmoother;
use std::f32::consts::{PI, TAU};

proptest! {
    #[test]
    fn diff_is_the_short_way_around(current in -100.0f32..100.0, target in -100.0f32..100.0) {
        let diff = shortest_angle_diff(current, target);
        prop_assert!(diff > -PI - 1e-4 && diff <= PI + 1e-4, "diff {}", diff);

        let turns = (current + diff - target) / TAU;
        prop_assert!((turns - turns.round()).abs() < 1e-3, "turns {}", turns);
    }

    #[test]
    fn each_frame_closes_part_of_the_gap(
        current in -20.0f32..20.0,
        target in -20.0f32..20.0,
        damping in 0.01f32..0.99,
    ) {
        let before = shortest_angle_diff(current, target);
        prop_assume!(before.abs() > 1e-3);

        let next = advance_angle(current, target, damping, 1.0 / 60.0);
        let after = shortest_angle_diff(next, target);
        prop_assert!(after.abs() <= before.abs() + 1e-5);
        prop_assert!(after * before >= 0.0, "overshot: {} -> {}", before, after);
    }

    #[test]
    fn retargeting_never_jumps(
        start in -10.0f32..10.0,
        first in -10.0f32..10.0,
        second in -10.0f32..10.0,
        frames in 0usize..30,
    ) {
        let damping = 0.1;
        let mut smoother = RotationSmoother::with_angle(start, damping);
        for _ in 0..frames {
            smoother.advance(first, 1.0 / 60.0);
        }
        let before = smoother.current_angle();
        let after = smoother.advance(second, 1.0 / 60.0);
        prop_assert!((after - before).abs() <= PI * damping + 1e-4);
    }

    #[test]
    fn settles_on_target(start in -10.0f32..10.0, target in -10.0f32..10.0) {
        let mut smoother = RotationSmoother::with_angle(start, 0.1);
        for _ in 0..400 {
            smoother.advance(target, 1.0 / 60.0);
        }
        prop_assert!(shortest_angle_diff(smoother.current_angle(), target).abs() < 1e-3);
    }
}

#[test]
fn frame_delta_does_not_change_the_step() {
    let slow = advance_angle(0.0, 1.0, 0.1, 1.0 / 15.0);
    let fast = advance_angle(0.0, 1.0, 0.1, 1.0 / 240.0);
    assert_eq!(slow, fast);
}
