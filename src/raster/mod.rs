//! Rasterization of annotated boxes into the target grid.
//!
//! Boxes are written in the order given; a later box overwrites every
//! channel of the cells it covers, earlier values are never blended.

pub mod heading;
pub mod search;

use glam::Vec2;
use log::{debug, trace};

use crate::geometry::{BoxAxes, OrientedBox3, QuadAxes};
use crate::grid::{CellTargets, LabelGrid};
use crate::label::ObjectClass;
use crate::types::{DEFAULT_MIN_POINTS_IN_BOX, DEFAULT_SEARCH_PADDING, GridInfo, Point4};

pub use heading::{decode_heading, encode_heading, normalize_yaw};
pub use search::search_region;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterConfig {
    pub info: GridInfo,
    /// Boxes enclosing fewer lidar points are skipped.
    pub min_points_in_box: usize,
    /// Cells added around the search rectangle, see [`search_region`].
    pub search_padding: i32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            info: GridInfo::default(),
            min_points_in_box: DEFAULT_MIN_POINTS_IN_BOX,
            search_padding: DEFAULT_SEARCH_PADDING,
        }
    }
}

impl RasterConfig {
    pub fn new(info: GridInfo) -> Self {
        Self {
            info,
            ..Default::default()
        }
    }
}

/// What happened to a single box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxOutcome {
    /// Category outside the known taxonomy.
    Unclassified,
    /// Too few lidar points inside the box.
    Sparse { points: usize },
    /// Box was rasterized; `cells` may be zero when it lies off the grid.
    Written { cells: usize },
}

/// Per-frame tally of box outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RasterStats {
    pub boxes: usize,
    pub unclassified: usize,
    pub sparse: usize,
    pub written: usize,
    pub cells_written: usize,
}

impl RasterStats {
    fn record(&mut self, outcome: BoxOutcome) {
        self.boxes += 1;
        match outcome {
            BoxOutcome::Unclassified => self.unclassified += 1,
            BoxOutcome::Sparse { .. } => self.sparse += 1,
            BoxOutcome::Written { cells } => {
                self.written += 1;
                self.cells_written += cells;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TargetRasterizer {
    config: RasterConfig,
}

impl TargetRasterizer {
    pub fn new(config: RasterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Rasterize one frame into a freshly zeroed grid.
    pub fn rasterize_frame(&self, points: &[Point4], boxes: &[OrientedBox3]) -> LabelGrid {
        self.rasterize_frame_with_stats(points, boxes).0
    }

    pub fn rasterize_frame_with_stats(
        &self,
        points: &[Point4],
        boxes: &[OrientedBox3],
    ) -> (LabelGrid, RasterStats) {
        let mut grid = LabelGrid::zeros(self.config.info);
        let stats = self.rasterize_into(&mut grid, points, boxes);
        (grid, stats)
    }

    /// Rasterize `boxes` in order on top of whatever `grid` already holds.
    pub fn rasterize_into(
        &self,
        grid: &mut LabelGrid,
        points: &[Point4],
        boxes: &[OrientedBox3],
    ) -> RasterStats {
        let mut stats = RasterStats::default();
        for (box_idx, object) in boxes.iter().enumerate() {
            let outcome = self.rasterize_box(grid, object, points);
            match outcome {
                BoxOutcome::Unclassified => {
                    debug!("box {box_idx}: skipping category '{}'", object.category());
                }
                BoxOutcome::Sparse { points } => {
                    debug!(
                        "box {box_idx}: only {points} points inside '{}', skipping",
                        object.category()
                    );
                }
                BoxOutcome::Written { cells } => {
                    trace!("box {box_idx}: wrote {cells} cells");
                }
            }
            stats.record(outcome);
        }
        stats
    }

    /// Rasterize a single box. Uses the range and size `grid` was built with.
    pub fn rasterize_box(
        &self,
        grid: &mut LabelGrid,
        object: &OrientedBox3,
        points: &[Point4],
    ) -> BoxOutcome {
        let Some(class) = ObjectClass::from_category(object.category()) else {
            return BoxOutcome::Unclassified;
        };

        let footprint = object.footprint();
        let bounds = footprint.bounds();
        let center = footprint.center();
        let height = object.height();
        let heading = encode_heading(object.yaw());

        let axes = BoxAxes::new(object.corners());
        let enclosed = points.iter().filter(|p| axes.contains(p.position)).count();
        if enclosed < self.config.min_points_in_box {
            return BoxOutcome::Sparse { points: enclosed };
        }

        let info = *grid.info();
        let indexer = grid.indexer();
        let max_length = info.max_offset_length();
        let quad = QuadAxes::new(&footprint.points);
        let region = search_region(&indexer, &bounds, self.config.search_padding);

        let mut cells = 0;
        for cell in region.grid_cells(info.size) {
            let cell_center = indexer.cell_center(cell.as_ivec2());
            if !quad.contains(cell_center) {
                continue;
            }

            let scale = offset_scale(center - cell_center, max_length);
            let targets = CellTargets {
                category: 1.0,
                instance: (center - cell_center) * -1.0 * scale,
                confidence: 1.0,
                class_id: f32::from(class.id()),
                heading,
                height,
            };
            if let Some(slot) = grid.get_mut(cell) {
                *slot = targets.to_channels();
                cells += 1;
            }
        }

        BoxOutcome::Written { cells }
    }
}

/// Shrink factor keeping each offset component within `max_length`.
fn offset_scale(delta: Vec2, max_length: f32) -> f32 {
    let axis_scale = |d: f32| {
        let d = d.abs();
        if max_length < d { max_length / d } else { 1.0 }
    };
    axis_scale(delta.x).min(axis_scale(delta.y))
}
