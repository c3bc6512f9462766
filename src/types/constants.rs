/// Number of channels in every target cell.
pub const TARGET_CHANNELS: usize = 8;

pub const CH_CATEGORY: usize = 0;
pub const CH_INSTANCE_X: usize = 1;
pub const CH_INSTANCE_Y: usize = 2;
pub const CH_CONFIDENCE: usize = 3;
pub const CH_CLASS: usize = 4;
pub const CH_HEADING_COS: usize = 5;
pub const CH_HEADING_SIN: usize = 6;
pub const CH_HEIGHT: usize = 7;

pub const DEFAULT_GRID_RANGE: f32 = 70.0;
pub const DEFAULT_GRID_SIZE: u32 = 672;

/// Boxes enclosing fewer lidar points than this are not rasterized.
pub const DEFAULT_MIN_POINTS_IN_BOX: usize = 4;

/// Extra cells added to the search rectangle on the side nearer the grid origin.
pub const DEFAULT_SEARCH_PADDING: i32 = 1;

/// Instance offsets are clamped to this many cells from the box center.
pub const MAX_OFFSET_CELLS: f32 = 2.0;
