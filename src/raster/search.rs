use glam::IVec2;

use crate::grid::GridIndexer;
use crate::types::{Bounds, CellRegion};

/// Candidate cells for a footprint with world bounds `bounds`.
///
/// The indexer reverses both axes, so the cell of `right` is the lower x
/// bound and the cell of `top` the lower y bound. The bounds are used as
/// computed, never re-sorted; `padding` widens the lower side and turns the
/// upper side inclusive. With the default padding of one cell this yields
/// `[right - 1, left]` x `[top - 1, bottom]`.
pub fn search_region(indexer: &GridIndexer, bounds: &Bounds, padding: i32) -> CellRegion {
    let left = indexer.world_to_cell(bounds.left());
    let right = indexer.world_to_cell(bounds.right());
    let top = indexer.world_to_cell(bounds.top());
    let bottom = indexer.world_to_cell(bounds.bottom());

    // Far-off boxes saturate the indices, so the padding must not overflow.
    CellRegion::new(
        IVec2::new(right.saturating_sub(padding), top.saturating_sub(padding)),
        IVec2::new(left.saturating_add(padding), bottom.saturating_add(padding)),
    )
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::types::GridInfo;

    fn indexer() -> GridIndexer {
        GridIndexer::new(&GridInfo::square(16, 70.0).unwrap())
    }

    #[test]
    fn box_at_origin() {
        let bounds = Bounds::from_points(&[Vec2::new(-2.0, -2.0), Vec2::new(2.0, 2.0)]);
        let region = search_region(&indexer(), &bounds, 1);
        // left/bottom -> cell 8, right/top -> cell 7
        assert_eq!(region.min, IVec2::new(6, 6));
        assert_eq!(region.max, IVec2::new(9, 9));
        assert_eq!(region.cells().count(), 9);
    }

    #[test]
    fn saturated_indices_do_not_overflow() {
        let bounds = Bounds::from_points(&[
            Vec2::new(-5.0e10, 1.0e11),
            Vec2::new(-4.0e10, 2.0e11),
        ]);
        let region = search_region(&indexer(), &bounds, 1);
        assert_eq!(region.max.x, i32::MAX);
        assert_eq!(region.min.y, i32::MIN);
        assert_eq!(region.grid_cells(16).count(), 0);
    }

    #[test]
    fn box_outside_range_clips_to_nothing() {
        let bounds = Bounds::from_points(&[Vec2::new(100.0, 100.0), Vec2::new(104.0, 102.0)]);
        let region = search_region(&indexer(), &bounds, 1);
        assert_eq!(region.grid_cells(16).count(), 0);
    }
}
