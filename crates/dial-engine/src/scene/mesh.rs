use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::paint::Color;

/// Vertex layout shared by every mesh (28 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Premultiplied linear RGBA.
    pub color: [f32; 4],
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    /// Every three vertices form a triangle.
    Triangles,
    /// Every two vertices form a one-pixel line.
    Lines,
}

/// Non-indexed vertex soup with a single topology.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    topology: Topology,
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(topology: Topology, vertices: Vec<Vertex>) -> Self {
        debug_assert!(match topology {
            Topology::Triangles => vertices.len() % 3 == 0,
            Topology::Lines => vertices.len() % 2 == 0,
        });
        Self { topology, vertices }
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when any vertex is translucent; such meshes are blended and sorted.
    pub fn is_transparent(&self) -> bool {
        self.vertices.iter().any(|v| v.color[3] < 1.0)
    }

    /// Straight stroke from `from` to `to` in the XY plane.
    ///
    /// With `width > 0` the stroke is a flat ribbon `width` world units wide;
    /// otherwise it is a one-pixel line. A zero-length stroke yields an empty mesh.
    pub fn segment(from: Vec3, to: Vec3, width: f32, color: Color) -> Self {
        if width <= 0.0 {
            return Self::new(
                Topology::Lines,
                vec![Vertex::new(from, color), Vertex::new(to, color)],
            );
        }

        let dir = (to - from).truncate();
        if dir.length_squared() <= f32::EPSILON {
            return Self::new(Topology::Triangles, Vec::new());
        }

        let n = dir.perp().normalize().extend(0.0) * (width * 0.5);
        let (a, b, c, d) = (from + n, from - n, to - n, to + n);

        Self::new(
            Topology::Triangles,
            [a, b, c, a, c, d]
                .into_iter()
                .map(|p| Vertex::new(p, color))
                .collect(),
        )
    }

    /// Flat disc in the XY plane as a fan of `segments` triangles.
    ///
    /// Triangle `i` spans angles `i/segments` to `(i+1)/segments` of a full turn,
    /// starting on +X and winding counter-clockwise. `color_of(i, segments)`
    /// colours the whole triangle.
    pub fn circle_fan<F>(radius: f32, segments: usize, color_of: F) -> Self
    where
        F: Fn(usize, usize) -> Color,
    {
        let segments = segments.max(3);
        let rim = |i: usize| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
        };

        let mut vertices = Vec::with_capacity(segments * 3);
        for i in 0..segments {
            let color = color_of(i, segments);
            vertices.push(Vertex::new(Vec3::ZERO, color));
            vertices.push(Vertex::new(rim(i), color));
            vertices.push(Vertex::new(rim(i + 1), color));
        }

        Self::new(Topology::Triangles, vertices)
    }

    /// Edges of a capped cylinder around +Y, centred on the origin.
    ///
    /// Mirrors the triangulation of a one-ring cylinder: both rims, the
    /// vertical and diagonal edges of each side quad, and the spokes of both
    /// cap fans.
    pub fn cylinder_wireframe(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: usize,
        color: Color,
    ) -> Self {
        let segments = radial_segments.max(3);
        let half = height * 0.5;
        let at = |r: f32, y: f32, i: usize| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec3::new(r * theta.sin(), y, r * theta.cos())
        };

        let top_center = Vec3::new(0.0, half, 0.0);
        let bottom_center = Vec3::new(0.0, -half, 0.0);

        let mut vertices = Vec::with_capacity(segments * 12);
        let mut edge = |a: Vec3, b: Vec3| {
            vertices.push(Vertex::new(a, color));
            vertices.push(Vertex::new(b, color));
        };

        for i in 0..segments {
            let top = at(radius_top, half, i);
            let top_next = at(radius_top, half, i + 1);
            let bottom = at(radius_bottom, -half, i);
            let bottom_next = at(radius_bottom, -half, i + 1);

            edge(top, top_next);
            edge(bottom, bottom_next);
            edge(top, bottom);
            edge(bottom, top_next);
            edge(top_center, top);
            edge(bottom_center, bottom);
        }

        Self::new(Topology::Lines, vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_ribbon_has_requested_width() {
        let m = Mesh::segment(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), 2.0, Color::BLACK);
        assert_eq!(m.topology(), Topology::Triangles);
        assert_eq!(m.vertex_count(), 6);

        let xs: Vec<f32> = m.vertices().iter().map(|v| v.position[0]).collect();
        let min = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((max - min - 2.0).abs() < 1e-5);
    }

    #[test]
    fn segment_without_width_is_a_line() {
        let m = Mesh::segment(Vec3::ZERO, Vec3::X, 0.0, Color::BLACK);
        assert_eq!(m.topology(), Topology::Lines);
        assert_eq!(m.vertex_count(), 2);
    }

    #[test]
    fn zero_length_segment_is_empty() {
        let m = Mesh::segment(Vec3::ONE, Vec3::ONE, 1.0, Color::BLACK);
        assert!(m.is_empty());
    }

    #[test]
    fn fan_colours_each_segment() {
        let m = Mesh::circle_fan(75.0, 4, |i, n| Color::from_hsl(i as f32 / n as f32, 1.0, 0.5));
        assert_eq!(m.vertex_count(), 12);

        let first = m.vertices()[0].color;
        let second = m.vertices()[3].color;
        assert_eq!(first, m.vertices()[2].color);
        assert_ne!(first, second);
    }

    #[test]
    fn fan_rim_lies_on_radius() {
        let m = Mesh::circle_fan(75.0, 220, |_, _| Color::WHITE);
        for (i, v) in m.vertices().iter().enumerate() {
            let r = v.position().length();
            if i % 3 == 0 {
                assert_eq!(r, 0.0);
            } else {
                assert!((r - 75.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn cylinder_edge_count() {
        let m = Mesh::cylinder_wireframe(75.0, 75.0, 15.0, 12, Color::BLACK);
        assert_eq!(m.topology(), Topology::Lines);
        assert_eq!(m.vertex_count(), 12 * 6 * 2);
        for v in m.vertices() {
            assert!(v.position[1].abs() <= 7.5 + 1e-5);
        }
    }

    #[test]
    fn transparency_follows_vertex_alpha() {
        let solid = Mesh::segment(Vec3::ZERO, Vec3::Y, 1.0, Color::BLACK);
        let faint = Mesh::segment(Vec3::ZERO, Vec3::Y, 1.0, Color::BLACK.with_opacity(0.1));
        assert!(!solid.is_transparent());
        assert!(faint.is_transparent());
    }
}
