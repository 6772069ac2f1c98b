use image::RgbaImage;

use crate::encode::apng::encode_png;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ApngenError, ApngenResult};

/// Ordered frames of one template run, all sized to the same canvas.
///
/// Frames are stored 0-based; the first frame shown is index 0.
#[derive(Clone, Debug)]
pub struct FrameSet {
    canvas: Canvas,
    frames: Vec<RgbaImage>,
}

impl FrameSet {
    /// Wrap `frames`, checking each matches `canvas`.
    pub fn new(canvas: Canvas, frames: Vec<RgbaImage>) -> ApngenResult<Self> {
        if let Some(pos) = frames
            .iter()
            .position(|f| f.dimensions() != (canvas.width, canvas.height))
        {
            return Err(ApngenError::validation(format!(
                "frame {pos} does not match the {}x{} canvas",
                canvas.width, canvas.height
            )));
        }
        Ok(Self { canvas, frames })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at 0-based `idx`: index 0 is displayed frame 1.
    pub fn get(&self, idx: usize) -> Option<&RgbaImage> {
        self.frames.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RgbaImage> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[RgbaImage] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<RgbaImage> {
        self.frames
    }

    /// Encode every frame as a standalone PNG, in order.
    pub fn to_png_frames(&self) -> ApngenResult<Vec<Vec<u8>>> {
        self.frames.iter().map(encode_png).collect()
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = &'a RgbaImage;
    type IntoIter = std::slice::Iter<'a, RgbaImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
