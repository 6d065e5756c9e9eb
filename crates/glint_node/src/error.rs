//! Node error types

use thiserror::Error;

/// Errors raised by the text overlay node.
///
/// Any error aborts the whole batch.
#[derive(Error, Debug)]
pub enum NodeError {
    #[error(transparent)]
    Color(#[from] glint_paint::ColorError),

    #[error(transparent)]
    Text(#[from] glint_text::TextError),

    #[error(transparent)]
    Image(#[from] glint_image::ImageError),

    #[error("Parameter `{name}` = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid node configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NodeError>;
