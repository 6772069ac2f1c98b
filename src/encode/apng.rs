use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{ApngenError, ApngenResult};
use crate::render::frame::FrameSet;

/// Per-frame display time used unless a request says otherwise.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;
/// Replay count used unless a template request says otherwise.
pub const DEFAULT_LOOP_COUNT: u32 = 4;

/// How the per-frame delay is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameDelay {
    /// Fixed delay for every frame.
    Millis(u32),
    /// One second spread evenly over the frames (`1000 / frame_count`).
    SpreadOverSecond,
}

impl FrameDelay {
    /// Delay in milliseconds for an animation of `frame_count` frames.
    pub fn resolve(self, frame_count: usize) -> u32 {
        match self {
            Self::Millis(ms) => ms,
            Self::SpreadOverSecond => 1000 / (frame_count.max(1) as u32),
        }
    }
}

impl Default for FrameDelay {
    fn default() -> Self {
        Self::Millis(DEFAULT_FRAME_DELAY_MS)
    }
}

/// Frames plus the timing metadata stored in the container.
#[derive(Clone, Debug)]
pub struct AnimationSpec {
    pub frames: FrameSet,
    pub delay_ms: u32,
    /// `0` repeats forever.
    pub loop_count: u32,
}

impl AnimationSpec {
    pub fn new(frames: FrameSet, delay: FrameDelay, loop_count: u32) -> Self {
        let delay_ms = delay.resolve(frames.len());
        Self {
            frames,
            delay_ms,
            loop_count,
        }
    }

    /// Stream every frame, in order, through `sink`.
    pub fn write_to(&self, sink: &mut dyn FrameSink) -> ApngenResult<()> {
        let canvas = self.frames.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            delay_ms: self.delay_ms,
            loop_count: self.loop_count,
        })?;
        for (idx, frame) in self.frames.iter().enumerate() {
            sink.push_frame(idx, frame)?;
        }
        sink.end()
    }

    /// Encode as an animated PNG byte stream.
    pub fn encode(&self) -> ApngenResult<Vec<u8>> {
        encode_apng(self.frames.as_slice(), self.delay_ms, self.loop_count)
    }
}

/// Encode `frames` as an APNG with a uniform delay.
///
/// Every frame is written in full (no dispose/blend deltas) so any APNG reader shows exactly the
/// pixels given.
pub fn encode_apng(frames: &[RgbaImage], delay_ms: u32, loop_count: u32) -> ApngenResult<Vec<u8>> {
    let first = frames
        .first()
        .ok_or_else(|| ApngenError::encode("animation needs at least one frame"))?;
    let (width, height) = first.dimensions();
    if let Some(pos) = frames.iter().position(|f| f.dimensions() != (width, height)) {
        let (w, h) = frames[pos].dimensions();
        return Err(ApngenError::encode(format!(
            "frame {pos} is {w}x{h}, expected {width}x{height}"
        )));
    }
    let num_frames = u32::try_from(frames.len())
        .map_err(|_| ApngenError::encode("too many frames for an APNG"))?;
    let delay = u16::try_from(delay_ms)
        .map_err(|_| ApngenError::encode(format!("frame delay {delay_ms}ms exceeds 65535ms")))?;

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_animated(num_frames, loop_count)?;
        encoder.set_frame_delay(delay, 1000)?;
        encoder.set_dispose_op(png::DisposeOp::None)?;
        encoder.set_blend_op(png::BlendOp::Source)?;

        let mut writer = encoder.write_header()?;
        for frame in frames {
            writer.write_image_data(&rgb_bytes(frame))?;
        }
        writer.finish()?;
    }
    Ok(out)
}

/// Encode one frame as a standalone PNG.
pub fn encode_png(frame: &RgbaImage) -> ApngenResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, frame.width(), frame.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgb_bytes(frame))?;
        writer.finish()?;
    }
    Ok(out)
}

// Frames are composed over an opaque background; alpha carries no information.
fn rgb_bytes(frame: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.width() as usize * frame.height() as usize * 3);
    for px in frame.pixels() {
        out.extend_from_slice(&px.0[..3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/apng.rs"]
mod tests;
