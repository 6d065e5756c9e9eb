//! Font directory listing and font path resolution
//!
//! Fonts are plain files in a single directory, addressed by file stem:
//! `fonts/Roboto.ttf` is the family `"Roboto"`. The sentinel family
//! [`CUSTOM_FONT_FAMILY`] selects a caller-supplied file instead.

use crate::{Result, TextError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Family name that selects a custom font file path
pub const CUSTOM_FONT_FAMILY: &str = "Custom";

/// Font file extensions, in resolution order
pub const FONT_EXTENSIONS: [&str; 4] = ["ttf", "TTF", "ttc", "TTC"];

/// A directory of font files addressed by family (file stem)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDirectory {
    root: PathBuf,
}

impl FontDirectory {
    /// Create a font directory rooted at `root`.
    ///
    /// The directory is not read until [`families`](Self::families) or
    /// [`resolve`](Self::resolve) is called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// List the selectable font families.
    ///
    /// [`CUSTOM_FONT_FAMILY`] always comes first, followed by the sorted,
    /// de-duplicated stems of every font file in the directory. An unreadable
    /// directory lists only the custom entry.
    pub fn families(&self) -> Vec<String> {
        let mut stems = BTreeSet::new();

        match std::fs::read_dir(&self.root) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if let Some(stem) = font_stem(&path) {
                        stems.insert(stem.to_string());
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read font directory {:?}: {}", self.root, e);
            }
        }

        stems.remove(CUSTOM_FONT_FAMILY);

        let mut families = Vec::with_capacity(stems.len() + 1);
        families.push(CUSTOM_FONT_FAMILY.to_string());
        families.extend(stems);
        families
    }

    /// Resolve a family (or custom path) to a font file in this directory
    pub fn resolve(&self, family: &str, custom_path: Option<&str>) -> Result<PathBuf> {
        resolve_font_path(family, custom_path, &self.root)
    }
}

/// Resolve a font family to a font file path.
///
/// With `family == "Custom"` the custom path must exist and is returned
/// unchanged. Otherwise `<font_dir>/<family>.{ttf,TTF,ttc,TTC}` are probed in
/// that order and the first existing file wins.
pub fn resolve_font_path(
    family: &str,
    custom_path: Option<&str>,
    font_dir: &Path,
) -> Result<PathBuf> {
    if family == CUSTOM_FONT_FAMILY {
        let custom = custom_path.unwrap_or_default();
        let path = PathBuf::from(custom);
        if custom.is_empty() || !path.exists() {
            return Err(TextError::CustomFontNotFound(custom.to_string()));
        }
        tracing::debug!("Using custom font {:?}", path);
        return Ok(path);
    }

    let mut last_probed = None;
    for ext in FONT_EXTENSIONS {
        let candidate = font_dir.join(format!("{family}.{ext}"));
        if candidate.exists() {
            tracing::debug!("Resolved font family {:?} to {:?}", family, candidate);
            return Ok(candidate);
        }
        last_probed = Some(candidate);
    }

    Err(TextError::FontNotFound(
        last_probed.unwrap_or_else(|| font_dir.join(family)),
    ))
}

fn font_stem(path: &Path) -> Option<&str> {
    let ext = path.extension()?.to_str()?;
    if !FONT_EXTENSIONS.contains(&ext) {
        return None;
    }
    path.file_stem()?.to_str()
}
