//! Clock face geometry.
//!
//! Hierarchy built into the scene:
//!
//! ```text
//! whole (offset)
//! ├── clock
//! │   ├── rim    (cylinder turned to face the camera)
//! │   └── cover  (rainbow disc, behind)
//! └── dial (in front)
//!     ├── markers
//!     └── seconds / minutes / hours needles
//! ```

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use dial_clock::Needle;
use dial_engine::paint::Color;
use dial_engine::scene::{Mesh, NodeId, Scene, Transform};

use crate::config::{FaceConfig, NeedleStyle};

/// Nodes whose rotation the clock loop drives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NeedleHandles {
    pub seconds: NodeId,
    pub minutes: NodeId,
    pub hours: NodeId,
}

impl NeedleHandles {
    #[inline]
    pub fn get(&self, needle: Needle) -> NodeId {
        match needle {
            Needle::Seconds => self.seconds,
            Needle::Minutes => self.minutes,
            Needle::Hours => self.hours,
        }
    }
}

/// Adds the clock to `scene` and returns the needle handles.
///
/// Needles start at rest, pointing at twelve.
pub fn build_face(scene: &mut Scene, face: &FaceConfig) -> NeedleHandles {
    scene.background = face.background;

    let whole = scene.add_group(None, Transform::from_translation(face.offset));

    let clock = scene.add_group(Some(whole), Transform::IDENTITY);
    add_rim(scene, clock, face);
    add_cover(scene, clock, face);

    let dial = scene.add_group(
        Some(whole),
        Transform::from_translation(Vec3::new(0.0, 0.0, face.dial_z)),
    );
    add_markers(scene, dial, face);

    let handles = NeedleHandles {
        seconds: add_needle(scene, dial, face, &face.seconds),
        minutes: add_needle(scene, dial, face, &face.minutes),
        hours: add_needle(scene, dial, face, &face.hours),
    };

    log::debug!(
        "clock face built: {} nodes, {} meshes",
        scene.node_count(),
        scene.meshes().len()
    );
    handles
}

fn add_rim(scene: &mut Scene, parent: NodeId, face: &FaceConfig) {
    let rim = &face.rim;
    let mesh = Mesh::cylinder_wireframe(
        face.radius,
        face.radius,
        rim.height,
        rim.segments,
        rim.color,
    );
    scene.add_mesh(
        Some(parent),
        mesh,
        Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    );
}

fn add_cover(scene: &mut Scene, parent: NodeId, face: &FaceConfig) {
    let cover = &face.cover;
    let mesh = Mesh::circle_fan(face.radius, cover.segments, |i, n| {
        Color::from_hsl(i as f32 / n as f32, 1.0, 0.5).with_opacity(cover.opacity)
    });
    scene.add_mesh(
        Some(parent),
        mesh,
        Transform::from_translation(Vec3::new(0.0, 0.0, cover.z)),
    );
}

fn add_markers(scene: &mut Scene, parent: NodeId, face: &FaceConfig) {
    let m = &face.markers;
    let r = face.radius;
    let top = Vec3::new(0.0, r, 0.0);

    let major = scene.add_mesh_data(Mesh::segment(
        top,
        Vec3::new(0.0, r - m.major_length, 0.0),
        m.major_width * face.stroke_scale,
        m.color,
    ));
    let minor = scene.add_mesh_data(Mesh::segment(
        top,
        Vec3::new(0.0, r - m.minor_length, 0.0),
        m.minor_width * face.stroke_scale,
        m.color,
    ));

    let step = (360.0 / m.count.max(1) as f32).to_radians();
    for i in 0..=m.count {
        let mesh = if i % m.major_every.max(1) == 0 { major } else { minor };
        scene.add_instance(Some(parent), mesh, Transform::from_rotation_z(step * i as f32));
    }
}

fn add_needle(
    scene: &mut Scene,
    parent: NodeId,
    face: &FaceConfig,
    style: &NeedleStyle,
) -> NodeId {
    let tip = Vec3::new(0.0, face.radius - style.inset, 0.0);
    let mesh = Mesh::segment(Vec3::ZERO, tip, style.width * face.stroke_scale, style.color);
    scene.add_mesh(Some(parent), mesh, Transform::IDENTITY)
}
