//! Point membership tests against oriented boxes and their footprints.
//!
//! Both tests pick the reference corner, project the point offset onto the
//! box's own edges and compare against the squared edge length. Boundary
//! points count as inside and no tolerance is applied.

use glam::{Vec2, Vec3};

use crate::geometry::oriented_box::corner;
use crate::types::Point4;

/// Edges of an oriented box, precomputed for repeated 3D membership tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxAxes {
    origin: Vec3,
    edges: [Vec3; 3],
    limits: [f32; 3],
}

impl BoxAxes {
    pub fn new(corners: &[Vec3; corner::COUNT]) -> Self {
        let origin = corners[corner::REFERENCE];
        let edges = [
            corners[corner::LENGTH_END] - origin,
            corners[corner::WIDTH_END] - origin,
            corners[corner::HEIGHT_END] - origin,
        ];
        Self {
            origin,
            edges,
            limits: edges.map(|e| e.dot(e)),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        let v = p - self.origin;
        self.edges
            .iter()
            .zip(self.limits)
            .all(|(edge, limit)| (0.0..=limit).contains(&edge.dot(v)))
    }
}

/// Edges of a footprint quad, precomputed for repeated 2D membership tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadAxes {
    origin: Vec2,
    edges: [Vec2; 2],
    limits: [f32; 2],
}

impl QuadAxes {
    pub fn new(quad: &[Vec2; 4]) -> Self {
        let origin = quad[0];
        let edges = [quad[1] - origin, quad[3] - origin];
        Self {
            origin,
            edges,
            limits: edges.map(|e| e.dot(e)),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let v = p - self.origin;
        self.edges
            .iter()
            .zip(self.limits)
            .all(|(edge, limit)| (0.0..=limit).contains(&edge.dot(v)))
    }
}

/// One flag per point, true when the point lies inside the box.
pub fn points_in_box(corners: &[Vec3; corner::COUNT], points: &[Point4]) -> Vec<bool> {
    let axes = BoxAxes::new(corners);
    points.iter().map(|p| axes.contains(p.position)).collect()
}

pub fn count_points_in_box(corners: &[Vec3; corner::COUNT], points: &[Point4]) -> usize {
    let axes = BoxAxes::new(corners);
    points.iter().filter(|p| axes.contains(p.position)).count()
}

/// Whether `p` lies inside the rectangle spanned by `quad[0]`, `quad[1]` and `quad[3]`.
pub fn point_in_quad(quad: &[Vec2; 4], p: Vec2) -> bool {
    QuadAxes::new(quad).contains(p)
}
