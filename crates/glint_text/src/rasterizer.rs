//! Glyph rasterization using swash
//!
//! Converts font glyph outlines to 8-bit coverage bitmaps.

use crate::font::FontFace;
use crate::{Result, TextError};
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;

/// Rasterized glyph coverage bitmap with placement
#[derive(Debug, Clone, Default)]
pub struct RasterizedGlyph {
    /// Row-major coverage (0..=255), `width * height` bytes
    pub bitmap: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Horizontal bearing (offset from pen position to left edge)
    pub bearing_x: i32,
    /// Vertical bearing (offset from baseline up to top edge)
    pub bearing_y: i32,
}

impl RasterizedGlyph {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at (x, y) within the bitmap
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.bitmap
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// Glyph rasterizer using swash
pub struct GlyphRasterizer {
    /// Swash scale context (caches scaling state)
    scale_context: ScaleContext,
}

impl GlyphRasterizer {
    pub fn new() -> Self {
        Self {
            scale_context: ScaleContext::new(),
        }
    }

    /// Rasterize a glyph as an alpha mask at the given font size
    pub fn rasterize(
        &mut self,
        font: &FontFace,
        glyph_id: u16,
        font_size: f32,
    ) -> Result<RasterizedGlyph> {
        let swash_font = swash::FontRef::from_index(font.data(), font.face_index() as usize)
            .ok_or(TextError::InvalidFontData)?;

        let mut scaler = self
            .scale_context
            .builder(swash_font)
            .size(font_size)
            .build();

        // Outlines only; color sources would yield RGBA data
        let mut render = Render::new(&[Source::Outline]);
        render.format(Format::Alpha);

        // Empty glyphs (like space) render nothing
        let Some(image) = render.render(&mut scaler, glyph_id) else {
            return Ok(RasterizedGlyph::default());
        };

        Ok(RasterizedGlyph {
            bitmap: image.data,
            width: image.placement.width,
            height: image.placement.height,
            bearing_x: image.placement.left,
            bearing_y: image.placement.top,
        })
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}
