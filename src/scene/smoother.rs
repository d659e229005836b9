use crate::core::math::angle::advance_angle;

/// Per-frame rotation state of a turning container (cabinet, perfume stand).
///
/// The angle is unbounded; it accumulates across turns and is never wrapped,
/// so the container's rotation never jumps.
#[derive(Debug, Clone, Copy)]
pub struct RotationSmoother {
    current_angle: f32,
    /// Fraction of the remaining arc closed per frame, in (0, 1).
    pub damping: f32,
}

impl RotationSmoother {
    pub fn new(damping: f32) -> Self {
        Self::with_angle(0.0, damping)
    }

    pub fn with_angle(current_angle: f32, damping: f32) -> Self {
        Self {
            current_angle,
            damping,
        }
    }

    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    /// One frame step toward `target`. Returns the new angle.
    pub fn advance(&mut self, target: f32, frame_delta: f32) -> f32 {
        self.current_angle = advance_angle(self.current_angle, target, self.damping, frame_delta);
        self.current_angle
    }
}
