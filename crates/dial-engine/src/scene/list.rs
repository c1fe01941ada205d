use glam::Mat4;

use crate::camera::PerspectiveCamera;

use super::{MeshId, NodeId, Pass, Scene, SortKey};

/// A single draw: which mesh, where, and in what order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub node: NodeId,
    pub mesh: MeshId,
    /// Local-to-world matrix resolved at build time.
    pub model: Mat4,
}

/// Draw stream for one frame, in paint order.
///
/// Rebuilt each frame from the scene and camera; the item buffer is reused,
/// so there is no per-frame allocation once warmed.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Collects every non-empty mesh node of `scene` and sorts them:
    /// opaque first in scene order, then translucent back-to-front as seen from `camera`.
    pub fn build(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.items.clear();

        for (order, (node, mesh)) in scene.drawables().enumerate() {
            let data = scene.mesh(mesh);
            if data.is_empty() {
                continue;
            }

            let model = scene.world_matrix(node);
            let (pass, depth) = if data.is_transparent() {
                let origin = model.transform_point3(glam::Vec3::ZERO);
                (Pass::Transparent, camera.view_depth(origin))
            } else {
                (Pass::Opaque, 0.0)
            };

            self.items.push(DrawItem {
                key: SortKey::new(pass, depth, order as u32),
                node,
                mesh,
                model,
            });
        }

        // Stable ordering is ensured by SortKey including insertion order.
        self.items.sort_by(|a, b| a.key.cmp(&b.key));
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::paint::Color;
    use crate::scene::{Mesh, Transform};

    fn stroke(opacity: f32) -> Mesh {
        Mesh::segment(Vec3::ZERO, Vec3::Y, 1.0, Color::BLACK.with_opacity(opacity))
    }

    #[test]
    fn opaque_first_then_far_to_near() {
        let mut scene = Scene::default();
        let near = scene.add_mesh(None, stroke(0.5), Transform::from_translation(Vec3::new(0.0, 0.0, 8.0)));
        let solid = scene.add_mesh(None, stroke(1.0), Transform::IDENTITY);
        let far = scene.add_mesh(None, stroke(0.1), Transform::from_translation(Vec3::new(0.0, 0.0, -8.0)));

        let mut list = DrawList::new();
        list.build(&scene, &PerspectiveCamera::default());

        let order: Vec<NodeId> = list.items().iter().map(|i| i.node).collect();
        assert_eq!(order, vec![solid, far, near]);
    }

    #[test]
    fn empty_meshes_and_groups_are_skipped() {
        let mut scene = Scene::default();
        let g = scene.add_group(None, Transform::IDENTITY);
        scene.add_mesh(Some(g), Mesh::segment(Vec3::ONE, Vec3::ONE, 1.0, Color::BLACK), Transform::IDENTITY);
        let kept = scene.add_mesh(Some(g), stroke(1.0), Transform::IDENTITY);

        let mut list = DrawList::new();
        list.build(&scene, &PerspectiveCamera::default());
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].node, kept);
    }

    #[test]
    fn rebuild_replaces_previous_items() {
        let mut scene = Scene::default();
        scene.add_mesh(None, stroke(1.0), Transform::IDENTITY);

        let mut list = DrawList::new();
        let cam = PerspectiveCamera::default();
        list.build(&scene, &cam);
        list.build(&scene, &cam);
        assert_eq!(list.len(), 1);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn model_matrix_includes_parents() {
        let mut scene = Scene::default();
        let g = scene.add_group(None, Transform::from_translation(Vec3::new(0.0, -50.0, 0.0)));
        scene.add_mesh(Some(g), stroke(1.0), Transform::IDENTITY);

        let mut list = DrawList::new();
        list.build(&scene, &PerspectiveCamera::default());
        let p = list.items()[0].model.transform_point3(Vec3::ZERO);
        assert!((p.y + 50.0).abs() < 1e-5);
    }
}
