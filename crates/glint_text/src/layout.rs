//! Text layout engine
//!
//! Shapes each line of a (possibly multi-line) string with rustybuzz and
//! positions the glyphs in pixel space. Lines are left aligned and stacked
//! top to bottom; the layout origin is the top-left of the first line's
//! ascender.

use crate::font::FontFace;
use crate::{Result, TextError};

/// Extra vertical space between consecutive lines, in pixels
pub const LINE_SPACING: f32 = 4.0;

/// A positioned glyph ready for rasterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// X position of the pen in pixels
    pub x: f32,
    /// Y position in pixels (baseline)
    pub y: f32,
}

/// A line of positioned glyphs
#[derive(Debug, Clone, Default)]
pub struct LayoutLine {
    pub glyphs: Vec<PositionedGlyph>,
    /// Line width in pixels (sum of advances)
    pub width: f32,
    /// Baseline Y position
    pub baseline_y: f32,
}

/// Result of laying out text
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    pub lines: Vec<LayoutLine>,
    /// Total width (widest line)
    pub width: f32,
    /// Total height, first ascender to last descender
    pub height: f32,
}

impl TextLayout {
    /// Get all glyphs as a flat iterator
    pub fn glyphs(&self) -> impl Iterator<Item = &PositionedGlyph> {
        self.lines.iter().flat_map(|line| line.glyphs.iter())
    }

    pub fn glyph_count(&self) -> usize {
        self.lines.iter().map(|l| l.glyphs.len()).sum()
    }

    /// Pixel extent rounded up to whole pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.max(0.0).ceil() as u32,
            self.height.max(0.0).ceil() as u32,
        )
    }
}

/// Lays out text for a single font face and size
pub struct TextLayoutEngine<'a> {
    font: &'a FontFace,
    font_size: f32,
}

impl<'a> TextLayoutEngine<'a> {
    pub fn new(font: &'a FontFace, font_size: f32) -> Self {
        Self { font, font_size }
    }

    /// Lay out `text`, breaking lines only at `\n`
    pub fn layout(&self, text: &str) -> Result<TextLayout> {
        let face = rustybuzz::Face::from_slice(self.font.data(), self.font.face_index())
            .ok_or(TextError::InvalidFontData)?;

        let metrics = self.font.metrics();
        let scale = metrics.scale(self.font_size);
        let ascender = metrics.ascender_px(self.font_size);
        let line_height = metrics.line_height_px(self.font_size);
        let line_advance = line_height + LINE_SPACING;

        let mut lines = Vec::new();
        for (index, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let baseline_y = ascender + index as f32 * line_advance;
            lines.push(self.shape_line(&face, line, scale, baseline_y));
        }

        let width = lines.iter().map(|l| l.width).fold(0.0f32, f32::max);
        let height = if lines.is_empty() {
            0.0
        } else {
            lines.len() as f32 * line_height + (lines.len() - 1) as f32 * LINE_SPACING
        };

        Ok(TextLayout {
            lines,
            width,
            height,
        })
    }

    fn shape_line(
        &self,
        face: &rustybuzz::Face<'_>,
        line: &str,
        scale: f32,
        baseline_y: f32,
    ) -> LayoutLine {
        if line.is_empty() {
            return LayoutLine {
                glyphs: Vec::new(),
                width: 0.0,
                baseline_y,
            };
        }

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(line);
        buffer.guess_segment_properties();
        let shaped = rustybuzz::shape(face, &[], buffer);

        let mut pen_x = 0.0f32;
        let mut glyphs = Vec::with_capacity(shaped.len());
        for (info, pos) in shaped.glyph_infos().iter().zip(shaped.glyph_positions()) {
            glyphs.push(PositionedGlyph {
                glyph_id: info.glyph_id as u16,
                x: pen_x + pos.x_offset as f32 * scale,
                y: baseline_y - pos.y_offset as f32 * scale,
            });
            pen_x += pos.x_advance as f32 * scale;
        }

        LayoutLine {
            glyphs,
            width: pen_x,
            baseline_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size_rounds_up() {
        let layout = TextLayout {
            lines: Vec::new(),
            width: 10.2,
            height: 3.0,
        };
        assert_eq!(layout.pixel_size(), (11, 3));
        assert_eq!(TextLayout::default().pixel_size(), (0, 0));
    }
}
