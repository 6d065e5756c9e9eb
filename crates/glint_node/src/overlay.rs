//! The text overlay operator
//!
//! Per image: measure the text, place it, paint shadow and text onto a
//! transparent layer, rotate the layer, paste it onto a full-size transparent
//! layer and alpha-composite that over the image.

use crate::params::TextOverlayParams;
use crate::schema::{NodeRegistry, NodeSchema};
use crate::{Result, NODE_CLASS, NODE_DISPLAY_NAME};
use glint_image::{alpha_composite, new_layer, paste, rotate_expand, ImageBatch};
use glint_paint::parse_color;
use glint_text::{FontDirectory, FontFace, FontPainter, TextPainter};
use image::RgbImage;
use std::path::PathBuf;

/// Extra transparent rows below the text so descenders and the shadow fit
pub const TEXT_LAYER_MARGIN: u32 = 30;

/// Distance of auto-placed text from the bottom edge, in pixels
pub const BOTTOM_OFFSET: i64 = 50;

/// Top-left corner of the text layer on the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
}

/// Where text of width `text_width` goes on a `width` x `height` image.
///
/// The requested position is clamped into the image. If it ends up at the
/// origin the text is centered horizontally and set [`BOTTOM_OFFSET`] pixels
/// above the bottom edge; the result may then be negative.
pub fn place_text(width: u32, height: u32, x: u32, y: u32, text_width: u32) -> Placement {
    let x = (x as i64).min(width as i64 - 1).max(0);
    let y = (y as i64).min(height as i64 - 1).max(0);

    if x == 0 && y == 0 {
        return Placement {
            x: (width as i64 - text_width as i64).div_euclid(2),
            y: height as i64 - BOTTOM_OFFSET,
        };
    }

    Placement { x, y }
}

/// Colors and transform resolved from the parameters once per batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub fill: [u8; 4],
    pub shadow: [u8; 4],
    pub shadow_offset: (u32, u32),
    pub rotation: f32,
}

impl OverlayStyle {
    pub fn from_params(params: &TextOverlayParams) -> Result<Self> {
        Ok(Self {
            fill: parse_color(&params.font_color)?.with_alpha(params.alpha()),
            shadow: parse_color(&params.shadow_color)?.to_rgba8(),
            shadow_offset: (params.font_shadow_x, params.font_shadow_y),
            rotation: params.rotation as f32,
        })
    }

    /// The shadow is drawn only when both offsets are positive
    pub fn draws_shadow(&self) -> bool {
        self.shadow_offset.0 > 0 && self.shadow_offset.1 > 0
    }
}

/// Overlay text onto one image
pub fn overlay_image<P: TextPainter>(
    image: &RgbImage,
    text: &str,
    (x, y): (u32, u32),
    style: &OverlayStyle,
    painter: &mut P,
) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Ok(image.clone());
    }

    let extent = painter.measure(text)?;
    let placement = place_text(width, height, x, y, extent.width);

    let (shadow_x, shadow_y) = style.shadow_offset;
    let mut text_layer = new_layer(extent.width, extent.height + shadow_y + TEXT_LAYER_MARGIN);
    if style.draws_shadow() {
        painter.paint(
            &mut text_layer,
            (shadow_x as i32, shadow_y as i32),
            text,
            style.shadow,
        )?;
    }
    painter.paint(&mut text_layer, (0, 0), text, style.fill)?;

    let text_layer = rotate_expand(&text_layer, style.rotation);

    tracing::debug!(
        "Placing {}x{} text layer at ({}, {}) on {}x{} image",
        text_layer.width(),
        text_layer.height(),
        placement.x,
        placement.y,
        width,
        height
    );

    let mut overlay = new_layer(width, height);
    paste(&mut overlay, &text_layer, placement.x, placement.y);
    Ok(alpha_composite(image, &overlay)?)
}

/// Overlay text onto every image of a batch with the given painter.
///
/// Images are processed in order; the first error aborts the batch.
pub fn overlay_batch<P: TextPainter>(
    batch: &ImageBatch,
    params: &TextOverlayParams,
    painter: &mut P,
) -> Result<ImageBatch> {
    params.validate()?;
    let style = OverlayStyle::from_params(params)?;

    if batch.is_empty() {
        return Ok(batch.clone());
    }

    let rasters = batch.to_rasters()?;
    let mut processed = Vec::with_capacity(rasters.len());
    for (index, image) in rasters.iter().enumerate() {
        tracing::debug!("Processing image {}/{}", index + 1, rasters.len());
        processed.push(overlay_image(
            image,
            &params.text,
            (params.x, params.y),
            &style,
            &mut *painter,
        )?);
    }

    Ok(ImageBatch::from_rasters(batch.layout(), &processed)?)
}

/// The text overlay node: a font directory plus the `add_text` entry point
#[derive(Debug, Clone)]
pub struct TextOverlayNode {
    fonts: FontDirectory,
}

impl TextOverlayNode {
    /// Node reading fonts from `font_dir`
    pub fn new(font_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts: FontDirectory::new(font_dir),
        }
    }

    /// Node reading fonts from this crate's `fonts/` directory
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/fonts"))
    }

    pub fn fonts(&self) -> &FontDirectory {
        &self.fonts
    }

    /// Input/output description with the current font directory listing
    pub fn schema(&self) -> NodeSchema {
        NodeSchema::text_overlay(self.fonts.families())
    }

    /// Register this node under its class and display name
    pub fn register<'r>(&self, registry: &'r mut NodeRegistry) -> &'r mut NodeRegistry {
        registry.register(NODE_CLASS, NODE_DISPLAY_NAME, self.schema())
    }

    /// Overlay text onto every image of `batch`.
    ///
    /// Resolves and loads the font, parses both colors, then processes the
    /// images in order. The output has the input's shape and layout.
    pub fn add_text(&self, batch: &ImageBatch, params: &TextOverlayParams) -> Result<ImageBatch> {
        params.validate()?;

        let font_path = self
            .fonts
            .resolve(&params.font_family, params.custom_font_path.as_deref())?;
        let font = FontFace::from_file(&font_path)?;

        tracing::info!(
            "Adding text to {} image(s) with {:?} ({}) at {}px",
            batch.len(),
            font.family_name(),
            font_path.display(),
            params.font_size
        );

        let mut painter = FontPainter::new(font, params.font_size as f32);
        overlay_batch(batch, params, &mut painter)
    }
}
