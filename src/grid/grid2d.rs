use glam::UVec2;

use crate::grid::GridIndexer;
use crate::types::{GridInfo, LabelGridError};

/// Dense square grid of cells.
///
/// Storage is `x`-major: cell `(x, y)` lives at `x * size + y`, so a grid of
/// `[f32; C]` flattens to a `(size, size, C)` row-major array.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    info: GridInfo,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(info: GridInfo, data: Vec<T>) -> Result<Self, LabelGridError> {
        let expected_len = info.cell_count();
        if data.len() != expected_len {
            return Err(LabelGridError::InvalidConfig(format!(
                "data length {} does not match grid size {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Self { info, data })
    }

    pub fn filled(info: GridInfo, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: vec![value; info.cell_count()],
            info,
        }
    }

    pub fn info(&self) -> &GridInfo {
        &self.info
    }

    pub fn size(&self) -> u32 {
        self.info.size
    }

    pub fn indexer(&self) -> GridIndexer {
        GridIndexer::new(&self.info)
    }

    pub fn get(&self, pos: UVec2) -> Option<&T> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        Some(&self.data[idx])
    }

    pub fn get_mut(&mut self, pos: UVec2) -> Option<&mut T> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        Some(&mut self.data[idx])
    }

    pub fn set(&mut self, pos: UVec2, value: T) -> Result<(), LabelGridError> {
        if !self.in_bounds(pos) {
            return Err(LabelGridError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for grid {}x{}",
                pos.x, pos.y, self.info.size, self.info.size
            )));
        }
        let idx = self.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    #[inline]
    fn in_bounds(&self, pos: UVec2) -> bool {
        pos.x < self.info.size && pos.y < self.info.size
    }

    #[inline]
    fn index(&self, pos: UVec2) -> usize {
        (pos.x as usize) * (self.info.size as usize) + (pos.y as usize)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Iterate over `(cell, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (UVec2, &T)> {
        let size = self.info.size as usize;
        self.data.iter().enumerate().map(move |(idx, value)| {
            let cell = UVec2::new((idx / size) as u32, (idx % size) as u32);
            (cell, value)
        })
    }
}

impl<T, const C: usize> Grid2d<[T; C]> {
    /// Shape of the flattened buffer, `(size, size, C)`.
    pub fn shape(&self) -> [usize; 3] {
        let size = self.info.size as usize;
        [size, size, C]
    }

    pub fn as_flat(&self) -> &[T] {
        self.data.as_flattened()
    }

    /// Hand the flattened buffer over by value.
    pub fn into_vec(self) -> Vec<T> {
        self.data.into_flattened()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(size: u32) -> GridInfo {
        GridInfo::square(size, 10.0).unwrap()
    }

    #[test]
    fn new_checks_data_length() {
        assert!(Grid2d::new(info(4), vec![0u8; 16]).is_ok());
        assert!(Grid2d::new(info(4), vec![0u8; 15]).is_err());
    }

    #[test]
    fn set_and_get_respect_bounds() {
        let mut grid = Grid2d::filled(info(4), 0u8);
        grid.set(UVec2::new(1, 3), 7).unwrap();
        assert_eq!(grid.get(UVec2::new(1, 3)), Some(&7));
        assert_eq!(grid.get(UVec2::new(4, 0)), None);
        assert!(grid.set(UVec2::new(0, 4), 1).is_err());
    }

    #[test]
    fn flat_layout_is_x_major() {
        let mut grid = Grid2d::filled(info(3), [0.0f32; 2]);
        grid.set(UVec2::new(2, 1), [5.0, 6.0]).unwrap();
        assert_eq!(grid.shape(), [3, 3, 2]);
        let flat = grid.as_flat();
        assert_eq!(flat.len(), 18);
        // ((x * size) + y) * C + c
        assert_eq!(flat[(2 * 3 + 1) * 2], 5.0);
        assert_eq!(flat[(2 * 3 + 1) * 2 + 1], 6.0);

        let owned = grid.clone().into_vec();
        assert_eq!(owned.as_slice(), grid.as_flat());
    }

    #[test]
    fn iter_reports_cells_in_storage_order() {
        let grid = Grid2d::filled(info(2), 0u8);
        let cells: Vec<UVec2> = grid.iter().map(|(c, _)| c).collect();
        assert_eq!(
            cells,
            vec![
                UVec2::new(0, 0),
                UVec2::new(0, 1),
                UVec2::new(1, 0),
                UVec2::new(1, 1)
            ]
        );
    }
}
