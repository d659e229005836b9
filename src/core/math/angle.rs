use std::f32::consts::{PI, TAU};

/// Signed difference `target - current` folded into `(-PI, PI]`.
///
/// A difference of exactly half a turn always resolves to `+PI`, so a
/// rotation that could go either way is deterministic.
#[inline]
pub fn shortest_angle_diff(current: f32, target: f32) -> f32 {
    // fmod is exact and a no-op within one turn
    let mut diff = (target - current) % TAU;
    if diff > PI {
        diff -= TAU;
    }
    if diff <= -PI {
        diff += TAU;
    }
    diff
}

/// Moves `current` toward `target` by `damping` of the shortest remaining arc.
///
/// `frame_delta` is accepted so callers can hand over the frame tick as is,
/// but the step is a fixed fraction per call: the motion speed follows the
/// frame rate.
#[inline]
pub fn advance_angle(current: f32, target: f32, damping: f32, _frame_delta: f32) -> f32 {
    current + shortest_angle_diff(current, target) * damping
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn half_turn_resolves_positive() {
        assert!((shortest_angle_diff(0.0, PI) - PI).abs() < EPS);
        assert!((shortest_angle_diff(PI, 0.0) - PI).abs() < EPS);
    }

    #[test]
    fn long_way_around_is_folded() {
        // 0 -> 270deg is a quarter turn backwards
        let d = shortest_angle_diff(0.0, 3.0 * FRAC_PI_2);
        assert!((d + FRAC_PI_2).abs() < EPS);

        // -270deg -> 0 via the cabinet's last face
        let d = shortest_angle_diff(-3.0 * FRAC_PI_2, 0.0);
        assert!((d + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn several_turns_apart() {
        let d = shortest_angle_diff(0.0, 5.0 * TAU + 0.25);
        assert!((d - 0.25).abs() < 1e-4);
    }

    #[test]
    fn first_step_from_zero_to_pi() {
        let next = advance_angle(0.0, PI, 0.1, 1.0 / 60.0);
        assert!((next - 0.1 * PI).abs() < EPS);
    }

    #[test]
    fn first_step_from_quarter_back() {
        let next = advance_angle(-FRAC_PI_2, 0.0, 0.1, 1.0 / 60.0);
        assert!((next - (-FRAC_PI_2 + 0.05 * PI)).abs() < EPS);
        assert!((next + 1.4137).abs() < 1e-3);
    }

    #[test]
    fn frame_delta_does_not_change_the_step() {
        let a = advance_angle(0.3, 1.0, 0.1, 1.0 / 30.0);
        let b = advance_angle(0.3, 1.0, 0.1, 1.0 / 144.0);
        assert_eq!(a, b);
    }
}
