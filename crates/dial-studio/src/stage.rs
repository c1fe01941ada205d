use glam::{Quat, Vec3};

use dial_clock::{ClockStage, Needle};
use dial_engine::camera::PerspectiveCamera;
use dial_engine::core::{AppControl, FrameCtx};
use dial_engine::render::MeshRenderer;
use dial_engine::scene::{DrawList, Scene};

use crate::config::FaceConfig;
use crate::face::{build_face, NeedleHandles};

/// CPU-side state of the dial: scene, camera and needle handles.
pub struct DialScene {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub needles: NeedleHandles,
    draw_list: DrawList,
}

impl DialScene {
    pub fn new(face: &FaceConfig, camera: PerspectiveCamera) -> Self {
        let mut scene = Scene::default();
        let needles = build_face(&mut scene, face);
        Self {
            scene,
            camera,
            needles,
            draw_list: DrawList::new(),
        }
    }

    pub fn set_needle_angle(&mut self, needle: Needle, radians: f32) {
        self.scene
            .set_rotation(self.needles.get(needle), Quat::from_rotation_z(radians));
    }

    /// Rebuilds the draw list for the current camera.
    pub fn prepare(&mut self) -> &DrawList {
        self.draw_list.build(&self.scene, &self.camera);
        &self.draw_list
    }
}

/// One frame's view of the dial, handed to the clock loop.
pub struct FrameStage<'s, 'f, 'a, 'w> {
    dial: &'s mut DialScene,
    renderer: &'s mut MeshRenderer,
    frame: &'f mut FrameCtx<'a, 'w>,
}

impl<'s, 'f, 'a, 'w> FrameStage<'s, 'f, 'a, 'w> {
    pub fn new(
        dial: &'s mut DialScene,
        renderer: &'s mut MeshRenderer,
        frame: &'f mut FrameCtx<'a, 'w>,
    ) -> Self {
        Self { dial, renderer, frame }
    }
}

impl ClockStage for FrameStage<'_, '_, '_, '_> {
    type Frame = AppControl;

    fn request_next_tick(&mut self) {
        self.frame.request_redraw();
    }

    fn set_needle_angle(&mut self, needle: Needle, radians: f32) {
        self.dial.set_needle_angle(needle, radians);
    }

    fn camera_position(&self) -> Vec3 {
        self.dial.camera.position
    }

    fn set_camera_position(&mut self, position: Vec3) {
        self.dial.camera.position = position;
    }

    fn look_at_origin(&mut self) {
        self.dial.camera.look_at(Vec3::ZERO);
    }

    fn draw(&mut self) -> AppControl {
        let background = self.dial.scene.background;
        self.dial.prepare();

        let dial = &*self.dial;
        let renderer = &mut *self.renderer;
        self.frame.render(background, |rctx, target| {
            renderer.render(rctx, target, &dial.scene, &dial.camera, &dial.draw_list);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dial_clock::{ClockReading, WallTime};

    fn dial() -> DialScene {
        DialScene::new(&FaceConfig::default(), PerspectiveCamera::default())
    }

    #[test]
    fn needle_angle_rotates_only_that_needle() {
        let mut d = dial();
        d.set_needle_angle(Needle::Minutes, -1.0);

        assert_eq!(d.scene.rotation(d.needles.minutes), Quat::from_rotation_z(-1.0));
        assert_eq!(d.scene.rotation(d.needles.seconds), Quat::IDENTITY);
        assert_eq!(d.scene.rotation(d.needles.hours), Quat::IDENTITY);
    }

    #[test]
    fn quarter_past_points_minute_needle_at_three() {
        let mut d = dial();
        let reading = ClockReading::at(WallTime::from_unix_secs(15.0 * 60.0));
        for needle in Needle::ALL {
            d.set_needle_angle(needle, reading.angle(needle));
        }

        // Tip direction in face space: +Y rotated by the needle angle.
        let tip = d.scene.rotation(d.needles.minutes) * Vec3::Y;
        assert!((tip - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn prepare_orders_blended_parts_last() {
        let mut d = dial();
        let list = d.prepare();
        let items = list.items();

        // 61 markers, 3 needles opaque; rim and cover blended
        assert_eq!(items.len(), 66);
        let first_blend = items
            .iter()
            .position(|i| i.key.pass == dial_engine::scene::Pass::Transparent)
            .unwrap();
        assert_eq!(first_blend, 64);
    }
}
