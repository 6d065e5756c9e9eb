//! Transparent overlay layers
//!
//! Layers are straight-alpha `RgbaImage`s. They are rotated as a whole,
//! pasted onto a full-size layer and finally composited over an opaque image.

use crate::{ImageError, Result};
use image::{imageops, Rgb, RgbImage, Rgba, RgbaImage};

/// Slack absorbed before rounding rotated extents outward
const EXTENT_EPSILON: f64 = 1e-6;

/// A fully transparent layer
pub fn new_layer(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width, height)
}

/// Rotate a layer counter-clockwise by `degrees` about its center.
///
/// The canvas grows to the bounding box of the rotated layer; uncovered
/// pixels are transparent. Sampling is nearest-neighbour, and quarter turns
/// are exact.
pub fn rotate_expand(layer: &RgbaImage, degrees: f32) -> RgbaImage {
    let degrees = (degrees as f64).rem_euclid(360.0);
    let (src_w, src_h) = layer.dimensions();

    if src_w == 0 || src_h == 0 || degrees == 0.0 {
        return layer.clone();
    }
    if degrees == 90.0 {
        return imageops::rotate270(layer);
    }
    if degrees == 180.0 {
        return imageops::rotate180(layer);
    }
    if degrees == 270.0 {
        return imageops::rotate90(layer);
    }

    let (sin, cos) = degrees.to_radians().sin_cos();
    let (w, h) = (src_w as f64, src_h as f64);

    // Forward map of the corners (relative to center), y pointing down
    let corners = [(-w, -h), (w, -h), (w, h), (-w, h)].map(|(x, y)| {
        let (x, y) = (x / 2.0, y / 2.0);
        (x * cos + y * sin, -x * sin + y * cos)
    });
    let span = |values: [f64; 4]| {
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        ((max - EXTENT_EPSILON).ceil() - (min + EXTENT_EPSILON).floor()).max(1.0)
    };
    let dst_w = span(corners.map(|c| c.0));
    let dst_h = span(corners.map(|c| c.1));

    RgbaImage::from_fn(dst_w as u32, dst_h as u32, |dx, dy| {
        let rx = dx as f64 + 0.5 - dst_w / 2.0;
        let ry = dy as f64 + 0.5 - dst_h / 2.0;

        // Inverse rotation back into the source layer
        let sx = rx * cos - ry * sin + w / 2.0;
        let sy = rx * sin + ry * cos + h / 2.0;

        if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
            *layer.get_pixel(sx as u32, sy as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Replace the pixels of `dst` with `src` placed at `(x, y)`.
///
/// No blending happens; `src` may hang off any edge and is clipped.
pub fn paste(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    imageops::replace(dst, src, x, y);
}

/// Composite a straight-alpha overlay over an opaque image of the same size
pub fn alpha_composite(base: &RgbImage, overlay: &RgbaImage) -> Result<RgbImage> {
    if base.dimensions() != overlay.dimensions() {
        return Err(ImageError::InvalidDimensions(format!(
            "overlay is {}x{} but image is {}x{}",
            overlay.width(),
            overlay.height(),
            base.width(),
            base.height()
        )));
    }

    Ok(RgbImage::from_fn(base.width(), base.height(), |x, y| {
        let Rgb([br, bg, bb]) = *base.get_pixel(x, y);
        let Rgba([r, g, b, a]) = *overlay.get_pixel(x, y);
        let a = a as u32;
        let over =
            |fg: u8, under: u8| ((fg as u32 * a + under as u32 * (255 - a) + 127) / 255) as u8;
        Rgb([over(r, br), over(g, bg), over(b, bb)])
    }))
}
