//! Geometric and spatial types shared by the box, grid and rasterizer APIs.

use glam::{IVec2, UVec2, Vec2, Vec3};

/// One lidar return: position in meters plus reflectance.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Point4 {
    pub position: Vec3,
    pub intensity: f32,
}

impl Point4 {
    pub fn new(x: f32, y: f32, z: f32, intensity: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            intensity,
        }
    }
}

/// World-axis-aligned rectangle in meters.
/// Convention: [min.x, max.x] x [min.y, max.y] in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounds that contain nothing yet; grow them with `expand_to_include`.
    pub fn empty() -> Self {
        Self {
            min: Vec2::new(f32::INFINITY, f32::INFINITY),
            max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand_to_include(*p);
        }
        bounds
    }

    /// Returns true if nothing has been included (min > max in either axis).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand this bounds to include the point (in place).
    pub fn expand_to_include(&mut self, p: Vec2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }
}

/// Window in (possibly negative) cell indices. Region is [min.x, max.x) x [min.y, max.y).
///
/// An inverted region (`min >= max` on an axis) holds no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRegion {
    pub min: IVec2,
    pub max: IVec2,
}

impl CellRegion {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Intersect with `[0, size)` on both axes.
    pub fn clip(&self, size: u32) -> Self {
        let upper = IVec2::splat(size.min(i32::MAX as u32) as i32);
        Self {
            min: self.min.max(IVec2::ZERO),
            max: self.max.min(upper),
        }
    }

    /// Cells of the region, `x` as the outer loop.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + use<> {
        let (min, max) = (self.min, self.max);
        (min.x..max.x).flat_map(move |x| (min.y..max.y).map(move |y| IVec2::new(x, y)))
    }

    /// Cells that also lie inside a `size` x `size` grid.
    pub fn grid_cells(&self, size: u32) -> impl Iterator<Item = UVec2> + use<> {
        self.clip(size).cells().map(|c| c.as_uvec2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_points() {
        let b = Bounds::from_points(&[
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(-1.0, 1.0),
        ]);
        assert!(!b.is_empty());
        assert_eq!(b.left(), -1.0);
        assert_eq!(b.right(), 3.0);
        assert_eq!(b.top(), 2.0);
        assert_eq!(b.bottom(), 0.0);
        assert!(Bounds::empty().is_empty());
    }

    #[test]
    fn inverted_region_is_empty() {
        let region = CellRegion::new(IVec2::new(5, 5), IVec2::new(3, 8));
        assert!(region.is_empty());
        assert_eq!(region.cells().count(), 0);
    }

    #[test]
    fn grid_cells_clip_to_grid() {
        let region = CellRegion::new(IVec2::new(-2, 14), IVec2::new(2, 20));
        let cells: Vec<UVec2> = region.grid_cells(16).collect();
        assert_eq!(cells.len(), 2 * 2);
        assert!(cells.iter().all(|c| c.x < 16 && c.y < 16));
        assert_eq!(cells[0], UVec2::new(0, 14));
    }
}
