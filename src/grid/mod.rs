pub mod grid2d;
pub mod indexer;
pub mod targets;

pub use grid2d::Grid2d;
pub use indexer::GridIndexer;
pub use targets::{CellTargets, Channels, LabelGrid};
