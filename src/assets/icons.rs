use std::collections::HashMap;
use std::path::PathBuf;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

/// Stock icon artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    /// Check mark.
    #[default]
    Check,
    /// Full-width exclamation mark.
    Exclamation,
    /// Full-width exclamation + question mark.
    Interrobang,
}

impl IconKind {
    /// Every icon in display order.
    pub const ALL: [IconKind; 3] = [IconKind::Check, IconKind::Exclamation, IconKind::Interrobang];

    /// Asset file name inside an icon directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Check => "check.png",
            Self::Exclamation => "！.png",
            Self::Interrobang => "！？.png",
        }
    }

    /// Short ASCII label for naming outputs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Exclamation => "exclamation",
            Self::Interrobang => "interrobang",
        }
    }
}

/// A square icon at a target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconRequest {
    /// Which artwork.
    pub icon: IconKind,
    /// Edge length in pixels.
    pub size: u32,
}

impl IconRequest {
    /// Construct a request.
    pub fn new(icon: IconKind, size: u32) -> Self {
        Self { icon, size }
    }
}

/// Where icon bitmaps come from.
///
/// `None` means "draw nothing"; a missing icon is never an error.
pub trait IconSource: Send + Sync {
    /// Load `req.icon` as RGBA resampled to `req.size × req.size`.
    fn load_icon(&self, req: IconRequest) -> Option<RgbaImage>;
}

/// Loads icon files from a directory.
#[derive(Debug, Clone)]
pub struct DirIconSource {
    root: PathBuf,
}

impl DirIconSource {
    /// Serve icons from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl IconSource for DirIconSource {
    fn load_icon(&self, req: IconRequest) -> Option<RgbaImage> {
        if req.size == 0 {
            return None;
        }
        let path = self.root.join(req.icon.file_name());
        match image::open(&path) {
            Ok(img) => Some(resample_square(&img.to_rgba8(), req.size)),
            Err(e) => {
                tracing::debug!(path = %path.display(), "icon not loaded: {e}");
                None
            }
        }
    }
}

/// Icons held in memory, resampled on request.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIcons {
    icons: HashMap<IconKind, RgbaImage>,
}

impl InMemoryIcons {
    /// Create an empty set; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register artwork for `icon`.
    pub fn with_icon(mut self, icon: IconKind, bitmap: RgbaImage) -> Self {
        self.icons.insert(icon, bitmap);
        self
    }
}

impl IconSource for InMemoryIcons {
    fn load_icon(&self, req: IconRequest) -> Option<RgbaImage> {
        if req.size == 0 {
            return None;
        }
        self.icons
            .get(&req.icon)
            .map(|bitmap| resample_square(bitmap, req.size))
    }
}

fn resample_square(src: &RgbaImage, size: u32) -> RgbaImage {
    if src.dimensions() == (size, size) {
        return src.clone();
    }
    imageops::resize(src, size, size, FilterType::Lanczos3)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/icons.rs"]
mod tests;
