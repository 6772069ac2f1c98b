use image::RgbaImage;

use crate::encode::apng::encode_apng;
use crate::foundation::error::{ApngenError, ApngenResult};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Display time of each frame.
    pub delay_ms: u32,
    /// Container replay count; `0` is infinite.
    pub loop_count: u32,
}

/// Sink contract for consuming composed frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at 0.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ApngenResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: usize, frame: &RgbaImage) -> ApngenResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ApngenResult<()>;
}

/// Collects frames and encodes them as one APNG when the stream ends.
#[derive(Debug, Default)]
pub struct ApngSink {
    cfg: Option<SinkConfig>,
    frames: Vec<RgbaImage>,
    bytes: Option<Vec<u8>>,
}

impl ApngSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded artifact, available after [`FrameSink::end`].
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Take the encoded artifact.
    pub fn into_bytes(self) -> ApngenResult<Vec<u8>> {
        self.bytes
            .ok_or_else(|| ApngenError::encode("APNG sink was not finished"))
    }
}

impl FrameSink for ApngSink {
    fn begin(&mut self, cfg: SinkConfig) -> ApngenResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.bytes = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &RgbaImage) -> ApngenResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ApngenError::encode("push_frame called before begin"))?;
        if idx != self.frames.len() {
            return Err(ApngenError::encode(format!(
                "frame {idx} pushed out of order, expected {}",
                self.frames.len()
            )));
        }
        if frame.dimensions() != (cfg.width, cfg.height) {
            return Err(ApngenError::encode(format!(
                "frame {idx} is {}x{}, sink expects {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> ApngenResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ApngenError::encode("end called before begin"))?;
        let frames = std::mem::take(&mut self.frames);
        self.bytes = Some(encode_apng(&frames, cfg.delay_ms, cfg.loop_count)?);
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in push order.
    pub(crate) frames: Vec<(usize, RgbaImage)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(usize, RgbaImage)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ApngenResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &RgbaImage) -> ApngenResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ApngenResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
