use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::assets::fonts::FontResolver;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::math::paste;
use crate::scene::model::{AnnotationLayer, ImageLayer, TextLayer};
use crate::text::{Anchor, TextPaint, draw_text, draw_text_with_spacing};

/// Read-only view of everything placed on one frame.
#[derive(Clone, Copy, Debug)]
pub struct Layers<'a> {
    pub canvas: Canvas,
    pub image: &'a ImageLayer,
    pub texts: &'a [TextLayer],
    pub annotations: &'a [AnnotationLayer],
}

impl<'a> Layers<'a> {
    pub fn new(
        canvas: Canvas,
        image: &'a ImageLayer,
        texts: &'a [TextLayer],
        annotations: &'a [AnnotationLayer],
    ) -> Self {
        Self {
            canvas,
            image,
            texts,
            annotations,
        }
    }

    /// Same layers without any text layers.
    pub fn without_texts(self) -> Self {
        Self { texts: &[], ..self }
    }

    /// First text layer that is enabled.
    pub fn first_enabled_text(&self) -> Option<&'a TextLayer> {
        self.texts.iter().find(|t| t.enabled)
    }
}

/// Draws layers in z-order: white background, image, decoration, text layers, annotations.
#[derive(Clone, Copy, Debug)]
pub struct Compositor<'a> {
    fonts: &'a FontResolver,
}

impl<'a> Compositor<'a> {
    pub fn new(fonts: &'a FontResolver) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &'a FontResolver {
        self.fonts
    }

    /// Compose one frame with no template decoration.
    pub fn composite_frame(&self, layers: &Layers<'_>) -> RgbaImage {
        self.composite_with(layers, |_| {})
    }

    /// Compose one frame, calling `decorate` after the image layer and before any text.
    pub fn composite_with(
        &self,
        layers: &Layers<'_>,
        decorate: impl FnOnce(&mut RgbaImage),
    ) -> RgbaImage {
        let mut surface = blank_surface(layers.canvas);
        draw_image_layer(&mut surface, layers.image);
        decorate(&mut surface);
        for text in layers.texts.iter().filter(|t| t.enabled) {
            self.draw_text_layer(&mut surface, text);
        }
        for annotation in layers.annotations.iter().filter(|a| a.enabled) {
            self.draw_annotation(&mut surface, annotation);
        }
        surface
    }

    fn draw_text_layer(&self, surface: &mut RgbaImage, layer: &TextLayer) {
        let font = self
            .fonts
            .resolve(layer.family, layer.weight, layer.clamped_size());
        let paint = TextPaint::new(&font, layer.color.0, layer.synthetic_bold());
        let origin = (layer.position.x as f32, layer.position.y as f32);
        draw_text_with_spacing(surface, &layer.text, origin, &paint, layer.spacing());
    }

    fn draw_annotation(&self, surface: &mut RgbaImage, layer: &AnnotationLayer) {
        let font = self
            .fonts
            .resolve(layer.family, layer.weight, layer.clamped_size());
        let paint = TextPaint::new(&font, layer.color.0, layer.synthetic_bold());
        let origin = (layer.position.x as f32, layer.position.y as f32);
        draw_text(
            surface,
            origin,
            &layer.single_line_text(),
            &paint,
            Anchor::LeftMiddle,
        );
    }
}

/// Opaque white surface of the canvas size.
pub fn blank_surface(canvas: Canvas) -> RgbaImage {
    RgbaImage::from_pixel(canvas.width, canvas.height, Rgba(Rgba8::WHITE.to_array()))
}

/// Resample the image to its scaled size and paste it centred on its position.
///
/// Sources with an alpha channel paste through their alpha; others overwrite.
pub fn draw_image_layer(surface: &mut RgbaImage, layer: &ImageLayer) {
    let Some(source) = &layer.source else {
        return;
    };
    let (w, h) = layer.scaled_size();
    if w == 0 || h == 0 {
        return;
    }
    let resized;
    let bitmap = if source.bitmap.dimensions() == (w, h) {
        &source.bitmap
    } else {
        resized = imageops::resize(&source.bitmap, w, h, FilterType::Lanczos3);
        &resized
    };
    let left = layer.position.x - (w / 2) as i32;
    let top = layer.position.y - (h / 2) as i32;
    paste(surface, bitmap, left, top, source.has_alpha);
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
