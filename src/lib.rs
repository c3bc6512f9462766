pub mod augment;
pub mod config;
pub mod features;
pub mod geometry;
pub mod grid;
pub mod label;
pub mod loaders;
pub mod pipeline;
pub mod raster;
pub mod types;
pub mod visualization;

pub use config::DatasetConfig;
pub use geometry::{Footprint2, OrientedBox3};
pub use grid::{CellTargets, Grid2d, GridIndexer, LabelGrid};
pub use label::{ObjectClass, classify};
pub use pipeline::{DatasetBuilder, Frame};
pub use raster::{RasterConfig, TargetRasterizer};
pub use types::{GridInfo, LabelGridError, Point4};
