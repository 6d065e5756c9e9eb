//! Text rendering for Glint overlays
//!
//! This crate provides:
//! - Font directory listing and font path resolution
//! - Font loading and parsing (TTF/TTC via ttf-parser)
//! - Text shaping (HarfBuzz via rustybuzz)
//! - Glyph rasterization (swash)
//! - Painting shaped text onto RGBA layers

pub mod font;
pub mod layout;
pub mod painter;
pub mod rasterizer;
pub mod registry;

pub use font::{FontFace, FontMetrics};
pub use layout::{LayoutLine, PositionedGlyph, TextLayout, TextLayoutEngine, LINE_SPACING};
pub use painter::{blend_coverage, FontPainter, TextExtent, TextPainter};
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
pub use registry::{resolve_font_path, FontDirectory, CUSTOM_FONT_FAMILY, FONT_EXTENSIONS};

use std::path::PathBuf;
use thiserror::Error;

/// Text rendering errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Font file not found: {}", .0.display())]
    FontNotFound(PathBuf),

    #[error("The custom font path does not exist: {0}")]
    CustomFontNotFound(String),

    #[error("Failed to load font: {0}")]
    FontLoadError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid font data")]
    InvalidFontData,
}

pub type Result<T> = std::result::Result<T, TextError>;
