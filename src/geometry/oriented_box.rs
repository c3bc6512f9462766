//! Annotated 3D object boxes.
//!
//! Corners follow a fixed index convention that the membership tests and the
//! footprint projection rely on. See [`corner`].

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::geometry::membership::point_in_quad;
use crate::types::{Bounds, LabelGridError};

/// Corner index convention.
///
/// `REFERENCE` is connected by one box edge to each of `LENGTH_END`,
/// `WIDTH_END` and `HEIGHT_END`, and those three edges are mutually orthogonal.
pub mod corner {
    pub const COUNT: usize = 8;
    pub const REFERENCE: usize = 0;
    /// End of the edge along the box's local x axis (length).
    pub const LENGTH_END: usize = 4;
    /// End of the edge along the box's local y axis (width).
    pub const WIDTH_END: usize = 1;
    /// End of the edge along the box's local z axis (height).
    pub const HEIGHT_END: usize = 3;
    /// Bottom-face corners forming the top-down rectangle. Entry 0 is the
    /// reference corner of the quad, entries 1 and 3 are its edge neighbours.
    pub const FOOTPRINT: [usize; 4] = [2, 3, 7, 6];

    pub(crate) const X_SIGNS: [f32; COUNT] = [1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0];
    pub(crate) const Y_SIGNS: [f32; COUNT] = [1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0];
    pub(crate) const Z_SIGNS: [f32; COUNT] = [1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0];
}

/// Relative tolerance for the edge orthogonality check in [`OrientedBox3::from_corners`].
const ORTHOGONALITY_TOLERANCE: f32 = 1e-3;

/// One annotated object.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedBox3 {
    corners: [Vec3; corner::COUNT],
    orientation: Quat,
    category: String,
}

impl OrientedBox3 {
    /// Build a box from its center, size `(width, length, height)` and orientation.
    pub fn new(center: Vec3, size: Vec3, orientation: Quat, category: impl Into<String>) -> Self {
        let half_width = 0.5 * size.x;
        let half_length = 0.5 * size.y;
        let half_height = 0.5 * size.z;

        let corners = std::array::from_fn(|i| {
            let local = Vec3::new(
                corner::X_SIGNS[i] * half_length,
                corner::Y_SIGNS[i] * half_width,
                corner::Z_SIGNS[i] * half_height,
            );
            center + orientation * local
        });

        Self {
            corners,
            orientation,
            category: category.into(),
        }
    }

    /// Build a box from explicit corners, checking the corner convention.
    pub fn from_corners(
        corners: [Vec3; corner::COUNT],
        orientation: Quat,
        category: impl Into<String>,
    ) -> Result<Self, LabelGridError> {
        let origin = corners[corner::REFERENCE];
        let edges = [
            corners[corner::LENGTH_END] - origin,
            corners[corner::WIDTH_END] - origin,
            corners[corner::HEIGHT_END] - origin,
        ];

        if corners.iter().any(|c| !c.is_finite()) {
            return Err(LabelGridError::InvalidBox(
                "corners must be finite".to_string(),
            ));
        }

        for (i, edge) in edges.iter().enumerate() {
            if edge.length_squared() == 0.0 {
                return Err(LabelGridError::InvalidBox(format!(
                    "edge {i} from the reference corner has zero length"
                )));
            }
        }

        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            let cos = edges[a].dot(edges[b]) / (edges[a].length() * edges[b].length());
            if cos.abs() > ORTHOGONALITY_TOLERANCE {
                return Err(LabelGridError::InvalidBox(format!(
                    "edges {a} and {b} are not orthogonal (cos = {cos})"
                )));
            }
        }

        Ok(Self {
            corners,
            orientation,
            category: category.into(),
        })
    }

    #[inline]
    pub fn corners(&self) -> &[Vec3; corner::COUNT] {
        &self.corners
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn center(&self) -> Vec3 {
        self.corners.iter().copied().sum::<Vec3>() / corner::COUNT as f32
    }

    /// `(yaw, pitch, roll)` in radians.
    pub fn yaw_pitch_roll(&self) -> (f32, f32, f32) {
        self.orientation.to_euler(EulerRot::ZYX)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw_pitch_roll().0
    }

    /// Length of the vertical edge from the reference corner.
    pub fn height(&self) -> f32 {
        self.corners[corner::REFERENCE].distance(self.corners[corner::HEIGHT_END])
    }

    pub fn footprint(&self) -> Footprint2 {
        Footprint2 {
            points: corner::FOOTPRINT.map(|i| self.corners[i].truncate()),
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        for c in &mut self.corners {
            *c += offset;
        }
    }

    /// Rotate about the world origin.
    pub fn rotate(&mut self, rotation: Quat) {
        for c in &mut self.corners {
            *c = rotation * *c;
        }
        self.orientation = (rotation * self.orientation).normalize();
    }
}

/// Top-down rectangle of a box, in the winding [`point_in_quad`] expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint2 {
    pub points: [Vec2; 4],
}

impl Footprint2 {
    pub fn center(&self) -> Vec2 {
        self.points.iter().copied().sum::<Vec2>() / 4.0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.points)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        point_in_quad(&self.points, p)
    }
}
