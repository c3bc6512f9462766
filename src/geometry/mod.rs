//! Oriented box geometry and point membership tests.

pub mod membership;
pub mod oriented_box;

pub use membership::{BoxAxes, QuadAxes, count_points_in_box, point_in_quad, points_in_box};
pub use oriented_box::{Footprint2, OrientedBox3, corner};
