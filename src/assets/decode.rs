use std::path::Path;

use image::RgbaImage;

use crate::foundation::error::{ApngenError, ApngenResult};

/// An uploaded bitmap, already decoded.
///
/// `has_alpha` records whether the source format carried an alpha channel; only then is alpha
/// used as a paste mask.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Pixels as straight-alpha RGBA8.
    pub bitmap: RgbaImage,
    /// Source had an alpha channel.
    pub has_alpha: bool,
}

impl SourceImage {
    /// Wrap an RGBA bitmap that should be pasted with its alpha mask.
    pub fn from_rgba(bitmap: RgbaImage) -> Self {
        Self {
            bitmap,
            has_alpha: true,
        }
    }

    /// Wrap a bitmap whose alpha channel should be ignored.
    pub fn opaque(bitmap: RgbaImage) -> Self {
        Self {
            bitmap,
            has_alpha: false,
        }
    }

    /// Decode PNG/JPEG/WebP bytes.
    pub fn decode(bytes: &[u8]) -> ApngenResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| ApngenError::decode(format!("decode image from memory: {e}")))?;
        Ok(Self::from_dynamic(dyn_img))
    }

    /// Decode an image file.
    pub fn open(path: impl AsRef<Path>) -> ApngenResult<Self> {
        let path = path.as_ref();
        let dyn_img = image::open(path)
            .map_err(|e| ApngenError::decode(format!("open image '{}': {e}", path.display())))?;
        Ok(Self::from_dynamic(dyn_img))
    }

    fn from_dynamic(dyn_img: image::DynamicImage) -> Self {
        let has_alpha = dyn_img.color().has_alpha();
        Self {
            bitmap: dyn_img.to_rgba8(),
            has_alpha,
        }
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
