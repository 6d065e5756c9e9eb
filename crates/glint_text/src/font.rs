//! Font face loading and metrics

use crate::{Result, TextError};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Vertical font metrics in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    /// Distance from baseline to the top of the em box (positive)
    pub ascender: i16,
    /// Distance from baseline to the bottom of the em box (typically negative)
    pub descender: i16,
}

impl FontMetrics {
    /// Font units to pixels at `font_size`
    pub fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em.max(1) as f32
    }

    pub fn ascender_px(&self, font_size: f32) -> f32 {
        self.ascender as f32 * self.scale(font_size)
    }

    pub fn descender_px(&self, font_size: f32) -> f32 {
        self.descender as f32 * self.scale(font_size)
    }

    /// Height of one line from ascender to descender, in pixels
    pub fn line_height_px(&self, font_size: f32) -> f32 {
        self.ascender_px(font_size) - self.descender_px(font_size)
    }
}

/// A parsed font face backed by its raw file data
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    face_index: u32,
    metrics: FontMetrics,
    family_name: String,
}

impl FontFace {
    /// Load the first face of a font file (`.ttf` or `.ttc` collection)
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            TextError::FontLoadError(format!("Failed to read font file {:?}: {}", path, e))
        })?;
        Self::from_data(data)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_with_index(data, 0)
    }

    /// Parse face `face_index` from font or collection data
    pub fn from_data_with_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, face_index)
            .map_err(|e| TextError::FontParseError(e.to_string()))?;

        let metrics = FontMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
        };

        let family_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
            .find_map(|name| name.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Self {
            data: Arc::new(data),
            face_index,
            metrics,
            family_name,
        })
    }

    /// Raw font file data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within a collection (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .field("face_index", &self.face_index)
            .field("metrics", &self.metrics)
            .field("bytes", &self.data.len())
            .finish()
    }
}
