//! Conversion between continuous world coordinates and discrete cell indices.
//!
//! The grid covers `(-range, +range]` on each horizontal axis and is laid out
//! *reversed*: cell 0 sits at `+range` and indices grow towards `-range`. Any
//! consumer decoding the targets has to use the same convention.

use glam::{IVec2, Vec2};

use crate::types::GridInfo;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridIndexer {
    range: f32,
    size: u32,
    inv_resolution: f32,
    resolution: f32,
}

impl GridIndexer {
    pub fn new(info: &GridInfo) -> Self {
        Self {
            range: info.range,
            size: info.size,
            inv_resolution: info.inv_resolution(),
            resolution: info.resolution(),
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Cell index of a world coordinate on one axis.
    ///
    /// May return indices outside `[0, size)`; callers bounds-check.
    #[inline]
    pub fn world_to_cell(&self, value: f32) -> i32 {
        self.world_to_cell_from(value, self.range)
    }

    /// Same as [`world_to_cell`](Self::world_to_cell) with an explicit axis origin.
    #[inline]
    pub fn world_to_cell_from(&self, value: f32, axis_origin: f32) -> i32 {
        ((axis_origin - value) * self.inv_resolution).floor() as i32
    }

    /// World coordinate of the center of cell `index` on one axis.
    #[inline]
    pub fn cell_to_world(&self, index: i32) -> f32 {
        self.range - (index as f32 + 0.5) * self.resolution
    }

    /// World-space center of a 2D cell.
    #[inline]
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        Vec2::new(self.cell_to_world(cell.x), self.cell_to_world(cell.y))
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        // equivalent to (0 <= c && c < size) for signed c
        (cell.x as u32) < self.size && (cell.y as u32) < self.size
    }
}
