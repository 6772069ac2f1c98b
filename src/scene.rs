//! Layer descriptions and the generation request that carries them.

/// Text, annotation and image layers.
pub mod model;
/// JSON generation requests.
pub mod request;

pub use model::{AnnotationLayer, AspectRatio, IconListStyle, ImageLayer, TextLayer};
pub use request::{
    BorderRequest, CornerIconsRequest, GenerationRequest, IconListRequest, TemplateRequest,
};
