//! Glint Text Overlay Node
//!
//! A leaf operator for node-based image pipelines: renders styled text
//! (font, color, drop shadow, opacity, rotation) onto every image of a batch
//! and returns a batch of the same shape.
//!
//! # Example
//!
//! ```ignore
//! use glint_node::{TextOverlayNode, TextOverlayParams};
//!
//! let node = TextOverlayNode::new("fonts");
//! let params = TextOverlayParams {
//!     text: "Hello".to_string(),
//!     font_family: "Roboto".to_string(),
//!     ..Default::default()
//! };
//! let output = node.add_text(&batch, &params)?;
//! assert_eq!(output.shape(), batch.shape());
//! ```

pub mod error;
pub mod overlay;
pub mod params;
pub mod schema;

pub use error::{NodeError, Result};
pub use overlay::{
    overlay_batch, overlay_image, place_text, OverlayStyle, Placement, TextOverlayNode,
    BOTTOM_OFFSET, TEXT_LAYER_MARGIN,
};
pub use params::TextOverlayParams;
pub use schema::{InputKind, InputSpec, NodeRegistry, NodeSchema, VisibleIf};

/// Class name the node registers under
pub const NODE_CLASS: &str = "AddText";

/// Human-readable node name
pub const NODE_DISPLAY_NAME: &str = "AddTextToImage";

/// Menu category
pub const NODE_CATEGORY: &str = "AI_Boy";

/// Entry point the host invokes
pub const NODE_FUNCTION: &str = "add_text";
