use image::RgbaImage;

use crate::assets::icons::{IconKind, IconRequest};
use crate::foundation::math::{paste, scale_px};
use crate::render::composite::Layers;
use crate::template::{FrameContext, RenderEnv, TemplateEngine, TemplateKind, blink_on};

/// Square icon pasted into all four corners on even frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerIcons {
    pub icon: IconKind,
    /// Icon edge length in pixels.
    pub size: u32,
    /// Inset from each canvas edge.
    pub margin: i32,
}

impl Default for CornerIcons {
    fn default() -> Self {
        Self {
            icon: IconKind::Check,
            size: 85,
            margin: 10,
        }
    }
}

impl CornerIcons {
    pub fn new(icon: IconKind, size: u32) -> Self {
        Self {
            icon,
            size,
            ..Self::default()
        }
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            icon: self.icon,
            size: scale_px(self.size as i32, factor).max(0) as u32,
            margin: scale_px(self.margin, factor),
        }
    }

    /// Top-left corners of the four icons, clockwise from top-left.
    pub fn positions(&self, width: u32, height: u32) -> [(i32, i32); 4] {
        let m = self.margin;
        let s = self.size as i32;
        let right = width as i32 - s - m;
        let bottom = height as i32 - s - m;
        [(m, m), (right, m), (right, bottom), (m, bottom)]
    }
}

impl TemplateEngine for CornerIcons {
    fn kind(&self) -> TemplateKind {
        TemplateKind::CornerIcons
    }

    fn prepare<'a>(&self, env: &RenderEnv<'a>, layers: Layers<'a>) -> FrameContext<'a> {
        FrameContext::new(env, layers, Some(IconRequest::new(self.icon, self.size)))
    }

    fn render_frame(&self, ctx: &FrameContext<'_>, idx: usize) -> RgbaImage {
        ctx.compositor.composite_with(&ctx.layers, |surface| {
            if !blink_on(idx) {
                return;
            }
            let Some(icon) = &ctx.icon else {
                return;
            };
            let (w, h) = surface.dimensions();
            for (x, y) in self.positions(w, h) {
                paste(surface, icon, x, y, true);
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/corner_icons.rs"]
mod tests;
