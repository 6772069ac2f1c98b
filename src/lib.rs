//! apngen composes short looping banner animations and encodes them as animated PNGs.
//!
//! A [`GenerationRequest`] describes text, annotation and image layers plus the templates to
//! run. Each template engine composes its frames through the shared [`Compositor`], and the
//! frames are packed into an APNG:
//!
//! - Load and validate a [`GenerationRequest`]
//! - Build a [`RenderEnv`] from a [`FontResolver`] and an [`IconSource`]
//! - Call [`generate_batch`] for every variant, or [`render_preview`] for a scaled still
#![forbid(unsafe_code)]

mod assets;
mod foundation;

/// Animated container encoding.
pub mod encode;
/// Batch generation entry points.
pub mod generate;
/// Layer compositing and previews.
pub mod render;
/// Layer model and generation requests.
pub mod scene;
/// Template engines.
pub mod template;
/// Glyph rendering.
pub mod text;

pub use crate::foundation::core::{Canvas, Position, Rgba8};
pub use crate::foundation::error::{ApngenError, ApngenResult};

pub use crate::assets::color::{BorderColor, TextColor};
pub use crate::assets::decode::SourceImage;
pub use crate::assets::fonts::{
    FontCandidate, FontFamily, FontHandle, FontResolver, FontWeight, InkBounds,
    needs_synthetic_bold, platform_candidates,
};
pub use crate::assets::icons::{DirIconSource, IconKind, IconRequest, IconSource, InMemoryIcons};
pub use crate::encode::{
    AnimationInfo, AnimationSpec, ApngSink, FrameDelay, FrameSink, InMemorySink, SinkConfig,
    encode_apng, probe_apng,
};
pub use crate::generate::{BatchOpts, GeneratedVariant, generate_animation, generate_batch};
pub use crate::render::{Compositor, FrameSet, Layers, render_preview};
pub use crate::scene::{
    AnnotationLayer, AspectRatio, GenerationRequest, IconListStyle, ImageLayer, TemplateRequest,
    TextLayer,
};
pub use crate::template::{
    BlinkingBorder, CornerIcons, IconAnchorPolicy, IconList, RenderEnv, TemplateEngine,
    TemplateKind, TemplateParams, generate_frames, icon_list_rows,
};
