//! Shared GPU types and utilities for renderers.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::camera::PerspectiveCamera;
use crate::scene::{Pass, Topology, Vertex};

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── camera uniform ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub(super) fn from_camera(camera: &PerspectiveCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
        }
    }
}

/// Returns the `wgpu` minimum binding size for the camera uniform buffer.
pub(super) fn camera_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
        .expect("CameraUniform has non-zero size by construction")
}

// ── mesh vertex ───────────────────────────────────────────────────────────

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x4  // premultiplied color
];

pub(super) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

// ── pipeline variants ─────────────────────────────────────────────────────

/// One pipeline per topology and pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) struct Variant {
    pub topology: Topology,
    pub pass: Pass,
}

impl Variant {
    pub(super) const COUNT: usize = 4;

    pub(super) const ALL: [Variant; Self::COUNT] = [
        Variant { topology: Topology::Triangles, pass: Pass::Opaque },
        Variant { topology: Topology::Lines, pass: Pass::Opaque },
        Variant { topology: Topology::Triangles, pass: Pass::Transparent },
        Variant { topology: Topology::Lines, pass: Pass::Transparent },
    ];

    pub(super) fn index(self) -> usize {
        let t = match self.topology {
            Topology::Triangles => 0,
            Topology::Lines => 1,
        };
        let p = match self.pass {
            Pass::Opaque => 0,
            Pass::Transparent => 2,
        };
        t + p
    }

    pub(super) fn primitive_topology(self) -> wgpu::PrimitiveTopology {
        match self.topology {
            Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Topology::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }

    /// Translucent draws test against depth but leave it untouched.
    pub(super) fn writes_depth(self) -> bool {
        self.pass == Pass::Opaque
    }

    pub(super) fn label(self) -> &'static str {
        match (self.topology, self.pass) {
            (Topology::Triangles, Pass::Opaque) => "dial mesh fill opaque",
            (Topology::Lines, Pass::Opaque) => "dial mesh line opaque",
            (Topology::Triangles, Pass::Transparent) => "dial mesh fill blend",
            (Topology::Lines, Pass::Transparent) => "dial mesh line blend",
        }
    }
}

// ── instance ──────────────────────────────────────────────────────────────

/// Per-draw model matrix, column-major (64 bytes, locations 2..=5).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ModelInstance {
    pub model: [[f32; 4]; 4],
}

impl ModelInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4
    ];

    pub(super) fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ModelInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_struct_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
        assert_eq!(std::mem::size_of::<ModelInstance>(), 64);
        assert_eq!(camera_ubo_min_binding_size().get(), 64);
    }

    #[test]
    fn variant_indices_are_distinct() {
        let mut seen = [false; Variant::COUNT];
        for v in Variant::ALL {
            assert!(!seen[v.index()]);
            seen[v.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn only_opaque_variants_write_depth() {
        for v in Variant::ALL {
            assert_eq!(v.writes_depth(), v.pass == Pass::Opaque);
        }
    }

    #[test]
    fn vertex_stride_matches_scene_vertex() {
        assert_eq!(vertex_layout().array_stride, 28);
    }

    #[test]
    fn instance_columns_match_glam_layout() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let inst = ModelInstance::new(m);
        assert_eq!(inst.model[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
