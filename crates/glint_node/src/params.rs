//! Text overlay parameters
//!
//! One invocation's worth of node inputs. Field names match the node's input
//! names so a TOML document (or the host's keyword arguments) maps 1:1.

use crate::{NodeError, Result};
use glint_text::CUSTOM_FONT_FAMILY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Allowed range of `x` and `y`
pub const POSITION_RANGE: (u32, u32) = (0, 4096);
/// Allowed range of `font_size`
pub const FONT_SIZE_RANGE: (u32, u32) = (0, 1000);
/// Allowed range of `font_shadow_x` and `font_shadow_y`
pub const SHADOW_RANGE: (u32, u32) = (0, 20);
/// Allowed range of `opacity`
pub const OPACITY_RANGE: (f32, f32) = (0.0, 1.0);
/// Allowed range of `rotation`, in degrees
pub const ROTATION_RANGE: (u32, u32) = (0, 360);

/// Inputs of the text overlay node (everything except the image batch)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextOverlayParams {
    #[serde(default = "default_text")]
    pub text: String,
    /// Requested left edge; `(0, 0)` means bottom-center placement
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Font file stem in the font directory, or `"Custom"`
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default)]
    pub font_shadow_x: u32,
    #[serde(default)]
    pub font_shadow_y: u32,
    #[serde(default = "default_shadow_color")]
    pub shadow_color: String,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Counter-clockwise, in degrees
    #[serde(default)]
    pub rotation: u32,
    /// Only consulted when `font_family` is `"Custom"`
    #[serde(default)]
    pub custom_font_path: Option<String>,
}

fn default_text() -> String {
    "A cute puppy".to_string()
}

fn default_font_size() -> u32 {
    38
}

fn default_font_family() -> String {
    CUSTOM_FONT_FAMILY.to_string()
}

fn default_font_color() -> String {
    "#ffffff".to_string()
}

fn default_shadow_color() -> String {
    "#000000".to_string()
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for TextOverlayParams {
    fn default() -> Self {
        Self {
            text: default_text(),
            x: 0,
            y: 0,
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_color: default_font_color(),
            font_shadow_x: 0,
            font_shadow_y: 0,
            shadow_color: default_shadow_color(),
            opacity: default_opacity(),
            rotation: 0,
            custom_font_path: None,
        }
    }
}

impl TextOverlayParams {
    /// Load parameters from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NodeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse parameters from a TOML document; omitted fields take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let params: Self = toml::from_str(content)
            .map_err(|e| NodeError::Config(format!("Failed to parse parameters: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| NodeError::Config(format!("Failed to serialize parameters: {e}")))
    }

    /// Check every numeric input against its advertised range
    pub fn validate(&self) -> Result<()> {
        check_range("x", self.x, POSITION_RANGE)?;
        check_range("y", self.y, POSITION_RANGE)?;
        check_range("font_size", self.font_size, FONT_SIZE_RANGE)?;
        check_range("font_shadow_x", self.font_shadow_x, SHADOW_RANGE)?;
        check_range("font_shadow_y", self.font_shadow_y, SHADOW_RANGE)?;
        check_range("opacity", self.opacity, OPACITY_RANGE)?;
        check_range("rotation", self.rotation, ROTATION_RANGE)?;
        Ok(())
    }

    /// Text alpha: `opacity * 255`, truncated
    pub fn alpha(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 255.0) as u8
    }

    /// Whether a drop shadow is drawn (both offsets positive)
    pub fn has_shadow(&self) -> bool {
        self.font_shadow_x > 0 && self.font_shadow_y > 0
    }
}

fn check_range<T>(name: &'static str, value: T, (min, max): (T, T)) -> Result<()>
where
    T: PartialOrd + Into<f64> + Copy,
{
    if value >= min && value <= max {
        return Ok(());
    }
    Err(NodeError::OutOfRange {
        name,
        value: value.into(),
        min: min.into(),
        max: max.into(),
    })
}
