use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::assets::fonts::InkBounds;
use crate::foundation::math::paste;
use crate::text::draw::{Anchor, TextPaint, draw_text};

/// Offscreen transparent buffer holding one rendered glyph (or short run).
///
/// Glyphs are drawn centred on a square tile three times the font size, resampled in
/// isolation, then composited onto the destination through their alpha mask.
#[derive(Clone, Debug)]
pub struct GlyphTile {
    bitmap: RgbaImage,
}

impl GlyphTile {
    /// Render `text` centred (middle-middle) on a fresh transparent tile.
    pub fn render(text: &str, paint: &TextPaint<'_>) -> Self {
        let side = ((paint.font.size_px() * 3.0) as u32).max(1);
        // Seed with the fill color at zero alpha so resampling never pulls in a foreign hue.
        let seed = image::Rgba(paint.color.transparent().to_array());
        let mut bitmap = RgbaImage::from_pixel(side, side, seed);
        let centre = (side / 2) as f32;
        draw_text(&mut bitmap, (centre, centre), text, paint, Anchor::MiddleMiddle);
        Self { bitmap }
    }

    /// Resample horizontally by `aspect`, keeping the height.
    ///
    /// `1.0` returns the tile untouched.
    pub fn stretch_horizontal(self, aspect: f32) -> Self {
        if aspect == 1.0 || !aspect.is_finite() || aspect <= 0.0 {
            return self;
        }
        let (w, h) = self.bitmap.dimensions();
        let new_w = ((w as f32 * aspect) as u32).max(1);
        Self {
            bitmap: imageops::resize(&self.bitmap, new_w, h, FilterType::Lanczos3),
        }
    }

    /// Tile width in pixels.
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Tile height in pixels.
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Underlying RGBA pixels.
    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    /// Extent of pixels with non-zero alpha, in tile coordinates.
    pub fn ink_bounds(&self) -> Option<InkBounds> {
        let mut out: Option<InkBounds> = None;
        for (x, y, px) in self.bitmap.enumerate_pixels() {
            if px.0[3] == 0 {
                continue;
            }
            let (x, y) = (x as i32, y as i32);
            out = Some(match out {
                Some(b) => InkBounds {
                    left: b.left.min(x),
                    top: b.top.min(y),
                    right: b.right.max(x + 1),
                    bottom: b.bottom.max(y + 1),
                },
                None => InkBounds {
                    left: x,
                    top: y,
                    right: x + 1,
                    bottom: y + 1,
                },
            });
        }
        out
    }

    /// Top-left corner that centres this tile on `(cx, cy)`.
    pub fn origin_centered_on(&self, cx: f32, cy: f32) -> (i32, i32) {
        (
            (cx - self.width() as f32 / 2.0) as i32,
            (cy - self.height() as f32 / 2.0) as i32,
        )
    }

    /// Composite with the tile's top-left at `(left, top)`, alpha as the mask.
    pub fn composite_at(&self, surface: &mut RgbaImage, left: i32, top: i32) {
        paste(surface, &self.bitmap, left, top, true);
    }

    /// Composite centred on `(cx, cy)`.
    pub fn composite_centered(&self, surface: &mut RgbaImage, cx: f32, cy: f32) {
        let (left, top) = self.origin_centered_on(cx, cy);
        self.composite_at(surface, left, top);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/tile.rs"]
mod tests;
