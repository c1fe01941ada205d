use glam::Vec3;

use crate::angle::Needle;

/// Rendering side of the clock loop.
///
/// Implementors own the scene, the camera and the needle handles. The loop only
/// writes rotations and camera positions through this trait and asks for a
/// frame to be drawn; it never inspects the scene.
pub trait ClockStage {
    /// Result of drawing one frame, handed back to the host unchanged.
    type Frame;

    /// Arms the next tick. Called first thing in every tick.
    fn request_next_tick(&mut self);

    /// Sets the rotation of `needle` about the face normal, in radians.
    fn set_needle_angle(&mut self, needle: Needle, radians: f32);

    fn camera_position(&self) -> Vec3;

    fn set_camera_position(&mut self, position: Vec3);

    /// Re-aims the camera at the scene origin.
    fn look_at_origin(&mut self);

    /// Submits the scene for one rendered frame.
    fn draw(&mut self) -> Self::Frame;
}
