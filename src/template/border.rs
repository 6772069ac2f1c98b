use image::{Rgba, RgbaImage};

use crate::assets::color::BorderColor;
use crate::foundation::math::scale_px;
use crate::render::composite::Layers;
use crate::template::{FrameContext, RenderEnv, TemplateEngine, TemplateKind, blink_on};

/// Border band flush with the canvas edges, shown on even frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkingBorder {
    /// Band thickness in pixels, measured inward from each edge.
    pub width: u32,
    pub color: BorderColor,
}

impl Default for BlinkingBorder {
    fn default() -> Self {
        Self {
            width: 13,
            color: BorderColor::Red,
        }
    }
}

impl BlinkingBorder {
    pub fn new(width: u32, color: BorderColor) -> Self {
        Self { width, color }
    }

    /// Scaled copy; a visible border never shrinks below one pixel.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            width: scale_px(self.width as i32, factor).max(1) as u32,
            color: self.color,
        }
    }
}

impl TemplateEngine for BlinkingBorder {
    fn kind(&self) -> TemplateKind {
        TemplateKind::BlinkingBorder
    }

    fn prepare<'a>(&self, env: &RenderEnv<'a>, layers: Layers<'a>) -> FrameContext<'a> {
        FrameContext::new(env, layers, None)
    }

    fn render_frame(&self, ctx: &FrameContext<'_>, idx: usize) -> RgbaImage {
        ctx.compositor.composite_with(&ctx.layers, |surface| {
            if blink_on(idx) {
                draw_border(surface, self.width, Rgba(self.color.rgba().to_array()));
            }
        })
    }
}

/// Fill a band `width` pixels wide along all four edges.
pub fn draw_border(surface: &mut RgbaImage, width: u32, color: Rgba<u8>) {
    let (w, h) = surface.dimensions();
    let band = width.min(w.div_ceil(2)).min(h.div_ceil(2));
    if band == 0 {
        return;
    }
    for (x, y, px) in surface.enumerate_pixels_mut() {
        if x < band || y < band || x >= w - band || y >= h - band {
            *px = color;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/border.rs"]
mod tests;
