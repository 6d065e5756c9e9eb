//! Glint Image
//!
//! Rasters for the text overlay node.
//!
//! # Features
//!
//! - Host tensor batches (`[0, 1]` floats, channels-last or channels-first)
//!   converted to and from `image::RgbImage` rasters at one explicit boundary
//! - Transparent overlay layers: rotate with canvas expansion, paste, and
//!   alpha composite onto an opaque image
//!
//! # Example
//!
//! ```ignore
//! use glint_image::{alpha_composite, new_layer, paste, rotate_expand, ImageBatch};
//!
//! let rasters = batch.to_rasters()?;
//! let mut overlay = new_layer(rasters[0].width(), rasters[0].height());
//! paste(&mut overlay, &rotate_expand(&text_layer, 45.0), 10, 20);
//! let out = alpha_composite(&rasters[0], &overlay)?;
//! ```

mod error;
mod layer;
mod tensor;

pub use error::{ImageError, Result};
pub use layer::{alpha_composite, new_layer, paste, rotate_expand};
pub use tensor::{ImageBatch, TensorLayout, CHANNELS};
