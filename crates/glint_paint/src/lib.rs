//! Glint Paint
//!
//! Color values shared by the text and overlay crates.
//!
//! # Features
//!
//! - `#RRGGBB` hex color strings
//! - `"R,G,B"` decimal color strings
//! - RGBA ink construction from an RGB color plus alpha

pub mod color;

pub use color::{parse_color, Color};

use thiserror::Error;

/// Color parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid hexadecimal color value: {0}")]
    InvalidHex(String),

    #[error("Invalid RGB color value: {0}")]
    InvalidRgb(String),
}

pub type Result<T> = std::result::Result<T, ColorError>;
