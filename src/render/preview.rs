use image::RgbaImage;

use crate::foundation::error::{ApngenError, ApngenResult};
use crate::render::composite::Layers;
use crate::scene::model::{AnnotationLayer, TextLayer};
use crate::template::{RenderEnv, TemplateParams};

/// Preview scale used when none is given.
pub const DEFAULT_PREVIEW_SCALE: f32 = 0.5;
/// Largest accepted preview scale.
pub const MAX_PREVIEW_SCALE: f32 = 4.0;

/// Render one representative frame of `params` on a canvas scaled by `scale`.
///
/// Pass the layers of a single output (see `GenerationRequest::variant_layers`); at scale 1.0
/// the result matches that output's preview frame exactly.
///
/// Canvas, coordinates, font sizes, spacings, border width, icon sizes and margins are all
/// scaled by the same factor. Blinking templates show their decorated frame; the icon list shows
/// a fixed number of rows.
#[tracing::instrument(skip(env, layers), fields(kind = ?params.kind()))]
pub fn render_preview(
    env: &RenderEnv<'_>,
    layers: Layers<'_>,
    params: &TemplateParams,
    scale: f32,
) -> ApngenResult<RgbaImage> {
    if !(scale > 0.0 && scale <= MAX_PREVIEW_SCALE) {
        return Err(ApngenError::validation(format!(
            "preview scale must be in (0, {MAX_PREVIEW_SCALE}], got {scale}"
        )));
    }
    let texts: Vec<TextLayer> = layers.texts.iter().map(|t| t.scaled(scale)).collect();
    let annotations: Vec<AnnotationLayer> =
        layers.annotations.iter().map(|a| a.scaled(scale)).collect();
    let image = layers.image.scaled(scale);
    let scaled_layers = Layers::new(layers.canvas.scaled(scale), &image, &texts, &annotations);

    let params = params.scaled(scale);
    let engine = params.engine();
    let ctx = engine.prepare(env, scaled_layers);
    Ok(engine.render_frame(&ctx, engine.preview_frame()))
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
