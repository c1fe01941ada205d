//! Perspective camera.

use glam::{Mat4, Vec3};

/// Right-handed perspective camera looking at a target point.
///
/// Depth maps to `[0, 1]` as wgpu expects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Width over height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_y_deg: 15.0,
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: 10_000.0,
            position: Vec3::new(0.0, 0.0, 1_700.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near,
            far,
            ..Self::default()
        }
    }

    /// Updates the aspect ratio. Non-finite or non-positive values are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Distance from the camera along its view direction. Larger is further away.
    pub fn view_depth(&self, world: Vec3) -> f32 {
        -self.view_matrix().transform_point3(world).z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_screen_centre() {
        let cam = PerspectiveCamera::default();
        let clip = cam.view_projection().project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }

    #[test]
    fn plus_y_is_up_on_screen() {
        let cam = PerspectiveCamera::default();
        let clip = cam.view_projection().project_point3(Vec3::new(0.0, 50.0, 0.0));
        assert!(clip.y > 0.0);
    }

    #[test]
    fn view_depth_grows_away_from_camera() {
        let cam = PerspectiveCamera::default();
        assert!((cam.view_depth(Vec3::ZERO) - 1_700.0).abs() < 1e-2);
        assert!(cam.view_depth(Vec3::new(0.0, 0.0, -8.0)) > cam.view_depth(Vec3::new(0.0, 0.0, 8.0)));
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = PerspectiveCamera::default();
        cam.set_aspect(2.0);
        cam.set_aspect(0.0);
        cam.set_aspect(f32::INFINITY);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn look_at_keeps_target_centred_after_move() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(120.0, -40.0, 1_700.0);
        cam.look_at(Vec3::ZERO);
        let clip = cam.view_projection().project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-4 && clip.y.abs() < 1e-4);
    }
}
