//! Animated container encoding.
//!
//! Frames leave the compositor as RGBA bitmaps and are packed into an APNG, either directly via
//! [`encode_apng`] or streamed through a [`FrameSink`].

/// APNG/PNG writers and timing types.
pub mod apng;
/// Read-back of encoded artifacts.
pub mod probe;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

pub use apng::{
    AnimationSpec, DEFAULT_FRAME_DELAY_MS, DEFAULT_LOOP_COUNT, FrameDelay, encode_apng, encode_png,
};
pub use probe::{AnimationInfo, probe_apng};
pub use sink::{ApngSink, FrameSink, InMemorySink, SinkConfig};
