//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw lists and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in world units (right-handed, +Y up).
//! - Vertex shader applies the model matrix per instance and the camera
//!   view-projection from a uniform.

mod common;
mod ctx;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
