pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;

pub use constants::*;
pub use error::LabelGridError;
pub use geometry::{Bounds, CellRegion, Point4};
pub use info::GridInfo;
