use image::RgbaImage;

use crate::assets::fonts::FontHandle;
use crate::foundation::core::Rgba8;
use crate::foundation::math::blend_pixel;
use crate::text::tile::GlyphTile;

/// Pixel offsets overdrawn for synthetic bold.
pub const SYNTHETIC_BOLD_OFFSETS: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Where a draw position sits relative to the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Horizontal and vertical centre.
    #[default]
    MiddleMiddle,
    /// Left edge, vertical centre.
    LeftMiddle,
}

/// Font, fill and emphasis shared by every draw call for one layer.
#[derive(Clone, Copy, Debug)]
pub struct TextPaint<'a> {
    pub font: &'a FontHandle,
    pub color: Rgba8,
    pub synthetic_bold: bool,
}

impl<'a> TextPaint<'a> {
    pub fn new(font: &'a FontHandle, color: Rgba8, synthetic_bold: bool) -> Self {
        Self {
            font,
            color,
            synthetic_bold,
        }
    }

    fn offsets(&self) -> &'static [(i32, i32)] {
        if self.synthetic_bold {
            &SYNTHETIC_BOLD_OFFSETS
        } else {
            &SYNTHETIC_BOLD_OFFSETS[..1]
        }
    }
}

/// Inter-character/inter-line spacing and per-glyph horizontal scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacing {
    /// Extra pixels between characters; may be negative.
    pub char_spacing: i32,
    /// Extra pixels between lines; may be negative.
    pub line_spacing: i32,
    /// Horizontal multiplier applied to each glyph; `1.0` is unscaled.
    pub aspect_ratio: f32,
}

impl Spacing {
    pub const NONE: Spacing = Spacing {
        char_spacing: 0,
        line_spacing: 0,
        aspect_ratio: 1.0,
    };

    /// `true` when glyphs can be drawn as one run without tiling.
    pub fn is_plain(&self) -> bool {
        self.char_spacing == 0 && self.aspect_ratio == 1.0
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::NONE
    }
}

/// Draw one line of `text` at `position`, overdrawn four times when synthetic bold is set.
pub fn draw_text(
    surface: &mut RgbaImage,
    position: (f32, f32),
    text: &str,
    paint: &TextPaint<'_>,
    anchor: Anchor,
) {
    let (x, y) = position;
    for &(dx, dy) in paint.offsets() {
        draw_once(surface, (x + dx as f32, y + dy as f32), text, paint, anchor);
    }
}

fn draw_once(
    surface: &mut RgbaImage,
    (x, y): (f32, f32),
    text: &str,
    paint: &TextPaint<'_>,
    anchor: Anchor,
) {
    let font = paint.font;
    let left = match anchor {
        Anchor::MiddleMiddle => x - font.advance(text) / 2.0,
        Anchor::LeftMiddle => x,
    };
    let baseline = y + (font.ascent() + font.descent()) / 2.0;
    let color = paint.color.to_array();
    font.draw_line(text, left, baseline, |px, py, coverage| {
        blend_pixel(surface, px, py, color, coverage);
    });
}

/// Draw multi-line `text` centred on `x`, the first line centred vertically on `y`.
///
/// Returns the y coordinate below the last line.
pub fn draw_text_with_spacing(
    surface: &mut RgbaImage,
    text: &str,
    position: (f32, f32),
    paint: &TextPaint<'_>,
    spacing: Spacing,
) -> f32 {
    let (x, mut current_y) = position;
    let line_gap = spacing.line_spacing as f32;
    for line in text.split('\n') {
        if line.is_empty() {
            current_y += paint.font.line_height("A") + line_gap;
            continue;
        }
        if spacing.is_plain() {
            draw_text(surface, (x, current_y), line, paint, Anchor::MiddleMiddle);
        } else {
            TextRow::layout(line, (x, current_y), paint, spacing, Anchor::MiddleMiddle)
                .draw(surface);
        }
        current_y += paint.font.line_height(line) + line_gap;
    }
    current_y
}

/// Natural width of one character: its ink width, or its advance when it has no ink.
pub fn glyph_width(font: &FontHandle, ch: char) -> f32 {
    let mut buf = [0u8; 4];
    let s = ch.encode_utf8(&mut buf);
    match font.ink_bounds(s, 0.0, font.ascent()) {
        Some(b) => b.width() as f32,
        None => font.advance(s),
    }
}

/// One line laid out for drawing, with its rendered left edge measurable before drawing.
pub struct TextRow<'a> {
    paint: TextPaint<'a>,
    kind: RowKind,
}

enum RowKind {
    Run {
        text: String,
        position: (f32, f32),
        anchor: Anchor,
    },
    Tiles(Vec<PlacedTile>),
}

struct PlacedTile {
    tile: GlyphTile,
    left: i32,
    top: i32,
}

impl<'a> TextRow<'a> {
    /// Lay out `line` with its anchor at `position`.
    ///
    /// With plain spacing the line is kept as a single run; otherwise each character is
    /// rendered to its own tile, stretched by the aspect ratio and centred in a slot of its
    /// scaled natural width.
    pub fn layout(
        line: &str,
        position: (f32, f32),
        paint: &TextPaint<'a>,
        spacing: Spacing,
        anchor: Anchor,
    ) -> Self {
        if spacing.is_plain() {
            return Self {
                paint: *paint,
                kind: RowKind::Run {
                    text: line.to_owned(),
                    position,
                    anchor,
                },
            };
        }

        let (x, y) = position;
        let aspect = spacing.aspect_ratio;
        let gap = spacing.char_spacing as f32;
        let slots: Vec<(char, f32)> = line
            .chars()
            .map(|ch| (ch, glyph_width(paint.font, ch) * aspect))
            .collect();
        let mut cursor = match anchor {
            Anchor::MiddleMiddle => {
                let total: f32 = slots.iter().map(|(_, w)| w + gap).sum::<f32>() - gap;
                x - total / 2.0
            }
            Anchor::LeftMiddle => x,
        };

        let mut tiles = Vec::with_capacity(slots.len());
        let mut buf = [0u8; 4];
        for (ch, slot_w) in slots {
            let tile = GlyphTile::render(ch.encode_utf8(&mut buf), paint).stretch_horizontal(aspect);
            let (left, top) = tile.origin_centered_on(cursor + slot_w / 2.0, y);
            tiles.push(PlacedTile { tile, left, top });
            cursor += slot_w + gap;
        }
        Self {
            paint: *paint,
            kind: RowKind::Tiles(tiles),
        }
    }

    /// Leftmost inked column once drawn; `None` for a row without ink.
    pub fn left_ink_edge(&self) -> Option<i32> {
        match &self.kind {
            RowKind::Run {
                text,
                position,
                anchor,
            } => {
                let font = self.paint.font;
                let (x, y) = *position;
                let left = match anchor {
                    Anchor::MiddleMiddle => x - font.advance(text) / 2.0,
                    Anchor::LeftMiddle => x,
                };
                let baseline = y + (font.ascent() + font.descent()) / 2.0;
                font.ink_bounds(text, left, baseline).map(|b| b.left)
            }
            RowKind::Tiles(tiles) => tiles
                .iter()
                .filter_map(|t| t.tile.ink_bounds().map(|b| t.left + b.left))
                .min(),
        }
    }

    /// Composite the row onto `surface`.
    pub fn draw(&self, surface: &mut RgbaImage) {
        match &self.kind {
            RowKind::Run {
                text,
                position,
                anchor,
            } => draw_text(surface, *position, text, &self.paint, *anchor),
            RowKind::Tiles(tiles) => {
                for t in tiles {
                    t.tile.composite_at(surface, t.left, t.top);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/draw.rs"]
mod tests;
