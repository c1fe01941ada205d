//! Scene graph types.
//!
//! Responsibilities:
//! - node hierarchy with local transforms and stable handles
//! - mesh data and geometry builders
//! - per-frame draw list in paint order (opaque, then translucent back-to-front)
//!
//! World space is right-handed, +Y up, +Z towards the default camera.

mod graph;
mod key;
mod list;
mod mesh;
mod transform;

pub use graph::{MeshId, Node, NodeId, Scene};
pub use key::{Pass, SortKey};
pub use list::{DrawItem, DrawList};
pub use mesh::{Mesh, Topology, Vertex};
pub use transform::Transform;
