//! Image error types

use thiserror::Error;

/// Errors raised while converting or compositing rasters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Tensor data has {actual} values but shape {shape:?} needs {expected}")]
    ShapeMismatch {
        shape: [usize; 4],
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported channel count {0}, expected 3 (RGB)")]
    UnsupportedChannels(usize),

    #[error("Invalid image dimensions: {0}")]
    InvalidDimensions(String),
}

pub type Result<T> = std::result::Result<T, ImageError>;
