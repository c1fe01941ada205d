use glam::{Mat4, Quat, Vec3};

use crate::paint::Color;

use super::{Mesh, Transform};

/// Handle to a node in the [`Scene`] that created it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(u32);

/// Handle to mesh data owned by a [`Scene`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MeshId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A transform in the hierarchy, optionally carrying a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub transform: Transform,
    parent: Option<NodeId>,
    mesh: Option<MeshId>,
}

impl Node {
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn mesh(&self) -> Option<MeshId> {
        self.mesh
    }
}

/// Node hierarchy plus the mesh data it references.
///
/// Nodes and meshes are append-only, so handles stay valid for the life of
/// the scene and a parent always precedes its children.
///
/// # Panics
/// Methods taking a handle panic if it came from a different scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    nodes: Vec<Node>,
    meshes: Vec<Mesh>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            nodes: Vec::new(),
            meshes: Vec::new(),
        }
    }

    /// Stores mesh data so several nodes can share it.
    pub fn add_mesh_data(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(mesh);
        id
    }

    /// Adds an empty node used to group children.
    pub fn add_group(&mut self, parent: Option<NodeId>, transform: Transform) -> NodeId {
        self.push_node(parent, None, transform)
    }

    /// Adds a node drawing `mesh`.
    pub fn add_mesh(&mut self, parent: Option<NodeId>, mesh: Mesh, transform: Transform) -> NodeId {
        let mesh = self.add_mesh_data(mesh);
        self.add_instance(parent, mesh, transform)
    }

    /// Adds a node drawing mesh data already in the scene.
    pub fn add_instance(
        &mut self,
        parent: Option<NodeId>,
        mesh: MeshId,
        transform: Transform,
    ) -> NodeId {
        assert!(mesh.index() < self.meshes.len(), "mesh handle from another scene");
        self.push_node(parent, Some(mesh), transform)
    }

    fn push_node(
        &mut self,
        parent: Option<NodeId>,
        mesh: Option<MeshId>,
        transform: Transform,
    ) -> NodeId {
        if let Some(p) = parent {
            assert!(p.index() < self.nodes.len(), "parent handle from another scene");
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            transform,
            parent,
            mesh,
        });
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn mesh(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.index()]
    }

    #[inline]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Replaces the local rotation of `id`.
    #[inline]
    pub fn set_rotation(&mut self, id: NodeId, rotation: Quat) {
        self.node_mut(id).transform.rotation = rotation;
    }

    #[inline]
    pub fn rotation(&self, id: NodeId) -> Quat {
        self.node(id).transform.rotation
    }

    /// Local-to-world matrix of `id`.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.to_mat4();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// World-space position of the node origin.
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// Nodes carrying a mesh, in insertion order.
    pub fn drawables(&self) -> impl Iterator<Item = (NodeId, MeshId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.mesh.map(|m| (NodeId(i as u32), m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke() -> Mesh {
        Mesh::segment(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), 1.0, Color::BLACK)
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut scene = Scene::default();
        let root = scene.add_group(None, Transform::from_translation(Vec3::new(0.0, -50.0, 0.0)));
        let mid = scene.add_group(Some(root), Transform::from_translation(Vec3::new(0.0, 0.0, 8.0)));
        let leaf = scene.add_mesh(Some(mid), stroke(), Transform::IDENTITY);

        let p = scene.world_position(leaf);
        assert!((p - Vec3::new(0.0, -50.0, 8.0)).length() < 1e-5);
    }

    #[test]
    fn parent_rotation_applies_to_children() {
        let mut scene = Scene::default();
        let root = scene.add_group(None, Transform::from_rotation_z(-core::f32::consts::FRAC_PI_2));
        let child = scene.add_group(Some(root), Transform::from_translation(Vec3::new(0.0, 10.0, 0.0)));

        // A quarter turn clockwise moves +Y onto +X.
        let p = scene.world_position(child);
        assert!((p - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn set_rotation_replaces_local_rotation() {
        let mut scene = Scene::default();
        let n = scene.add_mesh(None, stroke(), Transform::IDENTITY);
        let q = Quat::from_rotation_z(1.0);
        scene.set_rotation(n, q);
        scene.set_rotation(n, q);
        assert_eq!(scene.rotation(n), q);
    }

    #[test]
    fn drawables_skip_groups_and_share_meshes() {
        let mut scene = Scene::default();
        let g = scene.add_group(None, Transform::IDENTITY);
        let mesh = scene.add_mesh_data(stroke());
        let a = scene.add_instance(Some(g), mesh, Transform::IDENTITY);
        let b = scene.add_instance(Some(g), mesh, Transform::from_rotation_z(0.5));

        let d: Vec<_> = scene.drawables().collect();
        assert_eq!(d, vec![(a, mesh), (b, mesh)]);
        assert_eq!(scene.meshes().len(), 1);
        assert_eq!(scene.node_count(), 3);
    }

    #[test]
    #[should_panic]
    fn foreign_parent_panics() {
        let mut other = Scene::default();
        other.add_group(None, Transform::IDENTITY);
        let foreign = other.add_group(None, Transform::IDENTITY);

        let mut scene = Scene::default();
        scene.add_group(Some(foreign), Transform::IDENTITY);
    }
}
