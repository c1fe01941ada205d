use glam::Vec2;

/// Camera lag behind the pointer.
///
/// Each tick moves the camera a fixed fraction of the remaining distance to its
/// target. The time constant therefore depends on the frame rate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Parallax {
    /// Fraction of the remaining distance covered per tick, in `(0, 1]`.
    pub smoothing: f32,
}

impl Default for Parallax {
    fn default() -> Self {
        Self { smoothing: 0.05 }
    }
}

impl Parallax {
    pub fn new(smoothing: f32) -> Self {
        debug_assert!(smoothing > 0.0 && smoothing <= 1.0);
        Self { smoothing }
    }

    /// Camera x/y the pointer offset pulls towards.
    ///
    /// Screen space grows downwards, world space upwards.
    #[inline]
    pub fn target(pointer_offset: Vec2) -> Vec2 {
        Vec2::new(pointer_offset.x, -pointer_offset.y)
    }

    /// One smoothing step from `camera_xy` towards the target for `pointer_offset`.
    #[inline]
    pub fn step(&self, camera_xy: Vec2, pointer_offset: Vec2) -> Vec2 {
        camera_xy + (Self::target(pointer_offset) - camera_xy) * self.smoothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_flips_screen_y() {
        assert_eq!(Parallax::target(Vec2::new(10.0, 20.0)), Vec2::new(10.0, -20.0));
    }

    #[test]
    fn step_covers_smoothing_fraction() {
        let p = Parallax::default();
        let next = p.step(Vec2::ZERO, Vec2::new(100.0, -40.0));
        assert!((next - Vec2::new(5.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn step_at_target_is_fixed_point() {
        let p = Parallax::default();
        let offset = Vec2::new(30.0, 30.0);
        let at = Parallax::target(offset);
        assert_eq!(p.step(at, offset), at);
    }

    #[test]
    fn repeated_steps_decay_geometrically() {
        let p = Parallax::default();
        let offset = Vec2::new(200.0, -120.0);
        let target = Parallax::target(offset);

        let mut cam = Vec2::new(-50.0, 10.0);
        let mut dist = (target - cam).length();
        for _ in 0..200 {
            cam = p.step(cam, offset);
            let next = (target - cam).length();
            assert!(next < dist);
            assert!((next - dist * 0.95).abs() < 1e-3);
            dist = next;
        }
        assert!(dist < 0.05);
    }

    #[test]
    fn full_smoothing_snaps() {
        let p = Parallax::new(1.0);
        assert_eq!(p.step(Vec2::ZERO, Vec2::new(3.0, 4.0)), Vec2::new(3.0, -4.0));
    }
}
