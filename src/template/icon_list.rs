use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::assets::icons::{IconKind, IconRequest};
use crate::foundation::math::{paste, scale_px};
use crate::render::composite::Layers;
use crate::template::{FrameContext, RenderEnv, TemplateEngine, TemplateKind};
use crate::text::{Anchor, TextPaint, TextRow};

/// Rows shown by the icon-list preview.
pub const PREVIEW_ROWS: usize = 5;

/// How the icon's x position is derived from the row text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconAnchorPolicy {
    /// Anchor to the leftmost inked pixel of the rendered row.
    #[default]
    MeasuredEdge,
    /// Anchor to the nominal text x. Superseded by `MeasuredEdge`; drifts from the glyphs
    /// whenever character spacing or aspect ratio move the first glyph.
    Nominal,
}

/// Incrementally revealed list: frame `i` shows `i + 1` identical icon + text rows, the last one
/// pinned to the style's baseline.
///
/// Row text, font and geometry come from the first enabled text layer's icon-list style; other
/// text layers are not drawn by this template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconList {
    pub icon: IconKind,
    /// Icon edge length in pixels.
    pub size: u32,
    /// Horizontal gap between icon and text.
    pub gap: i32,
    pub anchor: IconAnchorPolicy,
}

impl Default for IconList {
    fn default() -> Self {
        Self {
            icon: IconKind::Check,
            size: 60,
            gap: 5,
            anchor: IconAnchorPolicy::MeasuredEdge,
        }
    }
}

impl IconList {
    pub fn new(icon: IconKind, size: u32) -> Self {
        Self {
            icon,
            size,
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, anchor: IconAnchorPolicy) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            size: scale_px(self.size as i32, factor).max(0) as u32,
            gap: scale_px(self.gap, factor),
            ..*self
        }
    }

    fn draw_rows(&self, ctx: &FrameContext<'_>, surface: &mut RgbaImage, row_count: usize) {
        let Some(layer) = ctx.layers.first_enabled_text() else {
            return;
        };
        let style = &layer.icon_list;
        let font = ctx
            .compositor
            .fonts()
            .resolve(layer.family, layer.weight, style.size.max(1));
        let paint = TextPaint::new(&font, layer.color.0, layer.synthetic_bold());
        let content = layer.single_row_text();
        let icon_size = self.size as i32;

        for y in icon_list_rows(row_count, style.baseline_y, style.row_spacing) {
            let row = TextRow::layout(
                &content,
                (style.x as f32, y as f32),
                &paint,
                style.spacing(),
                Anchor::LeftMiddle,
            );
            if let Some(icon) = &ctx.icon {
                let text_left = match self.anchor {
                    IconAnchorPolicy::MeasuredEdge => row.left_ink_edge().unwrap_or(style.x),
                    IconAnchorPolicy::Nominal => style.x,
                };
                let icon_x = text_left - self.gap - icon_size;
                let icon_y = y - icon_size.div_euclid(2);
                paste(surface, icon, icon_x, icon_y, true);
            }
            row.draw(surface);
        }
    }
}

impl TemplateEngine for IconList {
    fn kind(&self) -> TemplateKind {
        TemplateKind::IconList
    }

    fn prepare<'a>(&self, env: &RenderEnv<'a>, layers: Layers<'a>) -> FrameContext<'a> {
        FrameContext::new(env, layers, Some(IconRequest::new(self.icon, self.size)))
    }

    fn render_frame(&self, ctx: &FrameContext<'_>, idx: usize) -> RgbaImage {
        // Rows replace the text layers; annotations still draw on top.
        let layers = ctx.layers.without_texts();
        ctx.compositor
            .composite_with(&layers, |surface| self.draw_rows(ctx, surface, idx + 1))
    }

    fn preview_frame(&self) -> usize {
        PREVIEW_ROWS - 1
    }
}

/// Vertical centres of `row_count` rows whose last row sits on `baseline_y`.
///
/// Coordinates saturate at the `i32` range instead of overflowing.
pub fn icon_list_rows(row_count: usize, baseline_y: i32, row_spacing: i32) -> Vec<i32> {
    let n = i32::try_from(row_count).unwrap_or(i32::MAX);
    let start = baseline_y.saturating_sub((n - 1).max(0).saturating_mul(row_spacing));
    (0..n)
        .map(|k| start.saturating_add(k.saturating_mul(row_spacing)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/template/icon_list.rs"]
mod tests;
