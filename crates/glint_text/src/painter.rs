//! Painting text onto RGBA layers
//!
//! [`TextPainter`] is what overlay code draws through. [`FontPainter`] is the
//! font-backed implementation: layout with rustybuzz, glyph masks from swash.

use crate::font::FontFace;
use crate::layout::TextLayoutEngine;
use crate::rasterizer::{GlyphRasterizer, RasterizedGlyph};
use crate::Result;
use image::{GrayImage, Rgba, RgbaImage};

/// Pixel size of a piece of rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

/// Measures and draws text onto RGBA layers
pub trait TextPainter {
    /// Pixel size `text` occupies when painted at origin (0, 0)
    fn measure(&mut self, text: &str) -> Result<TextExtent>;

    /// Paint `text` with its top-left at `origin`.
    ///
    /// Each covered layer pixel is blended toward `ink` with
    /// [`blend_coverage`], so translucent ink replaces what is underneath
    /// rather than stacking on it. Pixels outside the layer are skipped.
    fn paint(
        &mut self,
        layer: &mut RgbaImage,
        origin: (i32, i32),
        text: &str,
        ink: [u8; 4],
    ) -> Result<()>;
}

/// Move `pixel` toward `ink` by `coverage` / 255.
///
/// Alpha always moves by `coverage`. Color moves by `coverage` over an opaque
/// pixel and all the way to the ink over a transparent one, so anti-aliased
/// edges keep the ink color instead of fading toward the layer's empty black.
pub fn blend_coverage(pixel: &mut Rgba<u8>, ink: [u8; 4], coverage: u8) {
    if coverage == 0 {
        return;
    }

    let c = coverage as u32;
    let color_c = 255 - (255 - c) * pixel[3] as u32 / 255;
    for (channel, (dst, src)) in pixel.0.iter_mut().zip(ink).enumerate() {
        let weight = if channel == 3 { c } else { color_c };
        *dst = ((*dst as u32 * (255 - weight) + src as u32 * weight + 127) / 255) as u8;
    }
}

/// Merge a glyph's coverage into `mask` at (`left`, `top`), keeping the
/// larger value where glyphs overlap
fn stamp_glyph(mask: &mut GrayImage, raster: &RasterizedGlyph, left: i64, top: i64) {
    let (mask_w, mask_h) = (mask.width() as i64, mask.height() as i64);

    for gy in 0..raster.height {
        let py = top + gy as i64;
        if py < 0 || py >= mask_h {
            continue;
        }
        for gx in 0..raster.width {
            let px = left + gx as i64;
            if px < 0 || px >= mask_w {
                continue;
            }
            let dst = &mut mask.get_pixel_mut(px as u32, py as u32)[0];
            *dst = (*dst).max(raster.coverage(gx, gy));
        }
    }
}

/// Text painter backed by a font face at a fixed pixel size
pub struct FontPainter {
    font: FontFace,
    font_size: f32,
    rasterizer: GlyphRasterizer,
}

impl FontPainter {
    pub fn new(font: FontFace, font_size: f32) -> Self {
        Self {
            font,
            font_size,
            rasterizer: GlyphRasterizer::new(),
        }
    }

    pub fn font(&self) -> &FontFace {
        &self.font
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl TextPainter for FontPainter {
    fn measure(&mut self, text: &str) -> Result<TextExtent> {
        if self.font_size <= 0.0 {
            return Ok(TextExtent::default());
        }

        let layout = TextLayoutEngine::new(&self.font, self.font_size).layout(text)?;
        let (width, height) = layout.pixel_size();
        Ok(TextExtent { width, height })
    }

    fn paint(
        &mut self,
        layer: &mut RgbaImage,
        origin: (i32, i32),
        text: &str,
        ink: [u8; 4],
    ) -> Result<()> {
        if self.font_size <= 0.0 {
            return Ok(());
        }

        let layout = TextLayoutEngine::new(&self.font, self.font_size).layout(text)?;

        // The whole string becomes one mask before it touches the layer
        let mut mask = GrayImage::new(layer.width(), layer.height());
        for glyph in layout.glyphs() {
            let raster = self
                .rasterizer
                .rasterize(&self.font, glyph.glyph_id, self.font_size)?;
            if raster.is_empty() {
                continue;
            }

            let left = origin.0 as i64 + glyph.x.round() as i64 + raster.bearing_x as i64;
            let top = origin.1 as i64 + glyph.y.round() as i64 - raster.bearing_y as i64;
            stamp_glyph(&mut mask, &raster, left, top);
        }

        for (pixel, coverage) in layer.pixels_mut().zip(mask.pixels()) {
            blend_coverage(pixel, ink, coverage[0]);
        }

        tracing::trace!(
            "Painted {} glyphs of {:?} at {:?}",
            layout.glyph_count(),
            self.font.family_name(),
            origin
        );
        Ok(())
    }
}
