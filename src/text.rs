//! Glyph rendering: single-line draws with synthetic bold, spaced/stretched multi-line text, and
//! the offscreen glyph tile both build on.

pub(crate) mod draw;
pub(crate) mod tile;

pub use draw::{
    Anchor, SYNTHETIC_BOLD_OFFSETS, Spacing, TextPaint, TextRow, draw_text, draw_text_with_spacing,
    glyph_width,
};
pub use tile::GlyphTile;
