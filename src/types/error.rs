use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelGridError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("grid must be square, got {width}x{height}")]
    NonSquareGrid { width: u32, height: u32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid box: {0}")]
    InvalidBox(String),
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
    #[error("input tensor shape {actual:?} does not match expected {expected:?}")]
    InputShapeMismatch {
        expected: [usize; 3],
        actual: [usize; 3],
    },
    #[error("frame source error: {0}")]
    Source(String),
}
