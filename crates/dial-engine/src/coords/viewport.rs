use glam::Vec2;

/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.size() * 0.5
    }

    /// Width over height. Degenerate viewports report `1.0`.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_size() {
        assert_eq!(Viewport::new(1280.0, 720.0).center(), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn aspect_of_valid_viewport() {
        assert!((Viewport::new(1600.0, 800.0).aspect() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn aspect_of_minimised_window_falls_back() {
        assert_eq!(Viewport::new(0.0, 0.0).aspect(), 1.0);
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), 1.0);
        assert!(!Viewport::new(f32::NAN, 10.0).is_valid());
    }
}
