//! Host tensor batches
//!
//! The host hands images over as one flat `f32` buffer in `[0, 1]` with a
//! four-dimensional shape. This module is the only place that knows about
//! that convention: everything downstream works on `image::RgbImage`.

use crate::{ImageError, Result};
use image::RgbImage;

/// Channel count of every image in a batch
pub const CHANNELS: usize = 3;

/// Dimension order of a batch tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TensorLayout {
    /// `[batch, height, width, channels]`
    #[default]
    ChannelsLast,
    /// `[batch, channels, height, width]`
    ChannelsFirst,
}

impl TensorLayout {
    /// Split a shape into `(batch, height, width, channels)`
    pub fn dims(self, shape: [usize; 4]) -> (usize, usize, usize, usize) {
        match self {
            Self::ChannelsLast => (shape[0], shape[1], shape[2], shape[3]),
            Self::ChannelsFirst => (shape[0], shape[2], shape[3], shape[1]),
        }
    }

    /// Build a shape from `(batch, height, width, channels)`
    pub fn shape(self, batch: usize, height: usize, width: usize, channels: usize) -> [usize; 4] {
        match self {
            Self::ChannelsLast => [batch, height, width, channels],
            Self::ChannelsFirst => [batch, channels, height, width],
        }
    }

    /// Offset of `(n, y, x, c)` in a flat buffer of the given image size
    fn offset(
        self,
        (height, width, channels): (usize, usize, usize),
        n: usize,
        y: usize,
        x: usize,
        c: usize,
    ) -> usize {
        match self {
            Self::ChannelsLast => ((n * height + y) * width + x) * channels + c,
            Self::ChannelsFirst => ((n * channels + c) * height + y) * width + x,
        }
    }
}

/// A batch of equally sized RGB images as a normalized float tensor
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBatch {
    shape: [usize; 4],
    layout: TensorLayout,
    data: Vec<f32>,
}

impl ImageBatch {
    /// Wrap a flat tensor buffer; `data.len()` must equal the shape's product
    pub fn new(shape: [usize; 4], layout: TensorLayout, data: Vec<f32>) -> Result<Self> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| ImageError::InvalidDimensions(format!("{shape:?} overflows")))?;

        if expected != data.len() {
            return Err(ImageError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            shape,
            layout,
            data,
        })
    }

    /// Pack rasters into a tensor. All rasters must share one size.
    pub fn from_rasters(layout: TensorLayout, rasters: &[RgbImage]) -> Result<Self> {
        let (width, height) = rasters.first().map(|r| r.dimensions()).unwrap_or((0, 0));
        if let Some(odd) = rasters.iter().find(|r| r.dimensions() != (width, height)) {
            return Err(ImageError::InvalidDimensions(format!(
                "batch mixes {}x{} and {}x{} images",
                width,
                height,
                odd.width(),
                odd.height()
            )));
        }

        let (h, w) = (height as usize, width as usize);
        let shape = layout.shape(rasters.len(), h, w, CHANNELS);
        let mut data = vec![0.0f32; rasters.len() * h * w * CHANNELS];

        for (n, raster) in rasters.iter().enumerate() {
            for (x, y, pixel) in raster.enumerate_pixels() {
                for (c, value) in pixel.0.iter().enumerate() {
                    let i = layout.offset((h, w, CHANNELS), n, y as usize, x as usize, c);
                    data[i] = *value as f32 / 255.0;
                }
            }
        }

        Self::new(shape, layout, data)
    }

    /// Unpack into one raster per image, clamping values into `[0, 1]`
    pub fn to_rasters(&self) -> Result<Vec<RgbImage>> {
        let (batch, h, w, channels) = self.layout.dims(self.shape);
        if channels != CHANNELS {
            return Err(ImageError::UnsupportedChannels(channels));
        }

        let width = u32::try_from(w)
            .map_err(|_| ImageError::InvalidDimensions(format!("width {w} too large")))?;
        let height = u32::try_from(h)
            .map_err(|_| ImageError::InvalidDimensions(format!("height {h} too large")))?;

        tracing::trace!(
            "Unpacking {} {}x{} image(s) from {:?} tensor",
            batch,
            width,
            height,
            self.layout
        );

        let rasters = (0..batch)
            .map(|n| {
                RgbImage::from_fn(width, height, |x, y| {
                    let channel = |c| {
                        let i = self
                            .layout
                            .offset((h, w, channels), n, y as usize, x as usize, c);
                        to_u8(self.data[i])
                    };
                    image::Rgb([channel(0), channel(1), channel(2)])
                })
            })
            .collect();

        Ok(rasters)
    }

    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Number of images
    pub fn len(&self) -> usize {
        self.layout.dims(self.shape).0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self) -> usize {
        self.layout.dims(self.shape).1
    }

    pub fn width(&self) -> usize {
        self.layout.dims(self.shape).2
    }

    pub fn channels(&self) -> usize {
        self.layout.dims(self.shape).3
    }
}

fn to_u8(value: f32) -> u8 {
    // NaN saturates to 0
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
