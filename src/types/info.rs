//! Grid metadata.

use crate::types::{DEFAULT_GRID_RANGE, DEFAULT_GRID_SIZE, LabelGridError, MAX_OFFSET_CELLS};

/// Square grid covering the world domain `(-range, +range]` on both horizontal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridInfo {
    /// Cells per axis.
    pub size: u32,
    /// Half extent of the covered area in meters.
    pub range: f32,
}

impl Default for GridInfo {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            range: DEFAULT_GRID_RANGE,
        }
    }
}

impl GridInfo {
    /// Build grid metadata from separate width and height, rejecting non-square grids.
    pub fn new(width: u32, height: u32, range: f32) -> Result<Self, LabelGridError> {
        if width != height {
            return Err(LabelGridError::NonSquareGrid { width, height });
        }
        Self::square(width, range)
    }

    pub fn square(size: u32, range: f32) -> Result<Self, LabelGridError> {
        if size == 0 {
            return Err(LabelGridError::InvalidConfig(
                "grid size must be non-zero".to_string(),
            ));
        }
        if !(range > 0.0 && range.is_finite()) {
            return Err(LabelGridError::InvalidConfig(format!(
                "grid range must be positive and finite, got {range}"
            )));
        }
        Ok(Self { size, range })
    }

    /// Edge length of one cell in meters.
    #[inline]
    pub fn resolution(&self) -> f32 {
        2.0 * self.range / self.size as f32
    }

    /// Cells per meter.
    #[inline]
    pub fn inv_resolution(&self) -> f32 {
        0.5 * self.size as f32 / self.range
    }

    /// Longest instance offset written before clamping kicks in.
    #[inline]
    pub fn max_offset_length(&self) -> f32 {
        (MAX_OFFSET_CELLS * self.resolution()).abs()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_square_grid() {
        let err = GridInfo::new(672, 640, 70.0).unwrap_err();
        assert!(matches!(
            err,
            LabelGridError::NonSquareGrid {
                width: 672,
                height: 640
            }
        ));
    }

    #[test]
    fn rejects_non_positive_range() {
        assert!(GridInfo::square(16, 0.0).is_err());
        assert!(GridInfo::square(16, -3.0).is_err());
        assert!(GridInfo::square(0, 70.0).is_err());
    }

    #[test]
    fn resolution_and_offset_limit() {
        let info = GridInfo::new(16, 16, 70.0).unwrap();
        assert!((info.resolution() - 8.75).abs() < 1e-6);
        assert!((info.inv_resolution() * info.resolution() - 1.0).abs() < 1e-6);
        assert!((info.max_offset_length() - 17.5).abs() < 1e-5);
    }
}
