//! Frame composition: layer z-order, frame sets and scaled previews.

/// Layer compositor.
pub mod composite;
/// Ordered frame collections.
pub mod frame;
/// Scaled-down single-frame previews.
pub mod preview;

pub use composite::{Compositor, Layers, blank_surface, draw_image_layer};
pub use frame::FrameSet;
pub use preview::{DEFAULT_PREVIEW_SCALE, MAX_PREVIEW_SCALE, render_preview};
