use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont};
use serde::{Deserialize, Serialize};

use crate::assets::builtin_font::BuiltinFace;
use crate::foundation::error::{ApngenError, ApngenResult};
use crate::foundation::math::coverage_is_visible;

/// Logical font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Sans-serif (kaku gothic). One resource per weight.
    #[default]
    Gothic,
    /// Serif (mincho). A single resource; heavy weights use synthetic bold.
    Serif,
}

/// Ordinal weight scale `W3..=W9`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum FontWeight {
    /// Light.
    W3,
    /// Regular.
    W4,
    /// Medium.
    W5,
    /// Semi-bold.
    W6,
    /// Bold; the default.
    #[default]
    W7,
    /// Extra bold.
    W8,
    /// Heavy.
    W9,
}

impl FontWeight {
    /// All weights, lightest first.
    pub const ALL: [FontWeight; 7] = [
        FontWeight::W3,
        FontWeight::W4,
        FontWeight::W5,
        FontWeight::W6,
        FontWeight::W7,
        FontWeight::W8,
        FontWeight::W9,
    ];
}

/// Whether a (family, weight) pair is rendered with the four-offset faux bold.
///
/// Only serif W7..W9 qualify; gothic weights map to distinct resources.
pub fn needs_synthetic_bold(family: FontFamily, weight: FontWeight) -> bool {
    family == FontFamily::Serif && weight >= FontWeight::W7
}

/// A font opened at a specific pixel size, ready to measure and rasterize.
#[derive(Clone, Debug)]
pub enum FontHandle {
    /// An outline font resource.
    Outline(OutlineFace),
    /// The built-in bitmap fallback.
    Builtin(BuiltinFont),
}

/// Outline face plus the scale matching the requested em size.
#[derive(Clone)]
pub struct OutlineFace {
    font: FontArc,
    scale: PxScale,
    size_px: f32,
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("size_px", &self.size_px)
            .finish_non_exhaustive()
    }
}

/// Built-in bitmap face at the magnification closest to the requested size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinFont {
    face: BuiltinFace,
    size_px: u32,
}

/// Ink extent of rendered text, in pixels, relative to the drawing origin used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkBounds {
    /// Leftmost inked column.
    pub left: i32,
    /// Topmost inked row.
    pub top: i32,
    /// One past the rightmost inked column.
    pub right: i32,
    /// One past the bottom inked row.
    pub bottom: i32,
}

impl InkBounds {
    /// Inked width.
    pub fn width(self) -> i32 {
        self.right - self.left
    }

    /// Inked height.
    pub fn height(self) -> i32 {
        self.bottom - self.top
    }

    fn include(bounds: &mut Option<InkBounds>, x: i32, y: i32) {
        match bounds {
            Some(b) => {
                b.left = b.left.min(x);
                b.top = b.top.min(y);
                b.right = b.right.max(x + 1);
                b.bottom = b.bottom.max(y + 1);
            }
            None => {
                *bounds = Some(InkBounds {
                    left: x,
                    top: y,
                    right: x + 1,
                    bottom: y + 1,
                });
            }
        }
    }
}

impl FontHandle {
    /// The built-in fallback face at `size_px`.
    pub fn builtin(size_px: u32) -> Self {
        let size_px = size_px.max(1);
        Self::Builtin(BuiltinFont {
            face: BuiltinFace::for_size(size_px as f32),
            size_px,
        })
    }

    /// Parse font bytes (face `index` for collections) and open them at `size_px`.
    pub fn from_bytes(bytes: Vec<u8>, index: u32, size_px: u32) -> ApngenResult<Self> {
        let font = FontVec::try_from_vec_and_index(bytes, index)
            .map_err(|e| ApngenError::font(format!("parse font data: {e}")))?;
        Ok(Self::from_font(FontArc::new(font), size_px))
    }

    fn from_font(font: FontArc, size_px: u32) -> Self {
        let size_px = size_px.max(1) as f32;
        // `PxScale` measures ascent-to-descent; convert from the em size callers ask for.
        let scale = match font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(size_px * font.height_unscaled() / upem),
            _ => PxScale::from(size_px),
        };
        Self::Outline(OutlineFace {
            font,
            scale,
            size_px,
        })
    }

    /// Requested em size in pixels.
    pub fn size_px(&self) -> f32 {
        match self {
            Self::Outline(f) => f.size_px,
            Self::Builtin(b) => b.size_px as f32,
        }
    }

    /// `true` when this handle is the built-in fallback.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    /// Baseline to top of the line box.
    pub fn ascent(&self) -> f32 {
        match self {
            Self::Outline(f) => f.font.as_scaled(f.scale).ascent(),
            Self::Builtin(b) => b.face.ascent(),
        }
    }

    /// Baseline to bottom of the line box (negative).
    pub fn descent(&self) -> f32 {
        match self {
            Self::Outline(f) => f.font.as_scaled(f.scale).descent(),
            Self::Builtin(b) => b.face.descent(),
        }
    }

    /// Pen advance of `text` laid out on one line, kerning included.
    pub fn advance(&self, text: &str) -> f32 {
        match self {
            Self::Outline(f) => {
                let scaled = f.font.as_scaled(f.scale);
                let mut caret = 0.0;
                let mut prev = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        caret += scaled.kern(p, id);
                    }
                    caret += scaled.h_advance(id);
                    prev = Some(id);
                }
                caret
            }
            Self::Builtin(b) => b.face.advance() * text.chars().count() as f32,
        }
    }

    /// Rasterize one line with its pen starting at `(left, baseline)`.
    ///
    /// `plot` receives pixel coordinates and a coverage in `0.0..=1.0`.
    pub fn draw_line(
        &self,
        text: &str,
        left: f32,
        baseline: f32,
        mut plot: impl FnMut(i32, i32, f32),
    ) {
        match self {
            Self::Outline(f) => {
                let scaled = f.font.as_scaled(f.scale);
                let mut caret = left;
                let mut prev = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        caret += scaled.kern(p, id);
                    }
                    let glyph = id.with_scale_and_position(f.scale, ab_glyph::point(caret, baseline));
                    caret += scaled.h_advance(id);
                    prev = Some(id);
                    if let Some(outlined) = f.font.outline_glyph(glyph) {
                        let b = outlined.px_bounds();
                        outlined.draw(|x, y, c| {
                            plot(b.min.x as i32 + x as i32, b.min.y as i32 + y as i32, c);
                        });
                    }
                }
            }
            Self::Builtin(b) => {
                let top = (baseline - b.face.ascent()).round() as i32;
                let mut caret = left;
                for ch in text.chars() {
                    b.face.draw_char(ch, caret.round() as i32, top, &mut plot);
                    caret += b.face.advance();
                }
            }
        }
    }

    /// Ink extent of `text` drawn with its pen at `(left, baseline)`; `None` for blank text.
    ///
    /// Only coverage that survives 8-bit rounding counts, so the bounds match the drawn pixels.
    pub fn ink_bounds(&self, text: &str, left: f32, baseline: f32) -> Option<InkBounds> {
        let mut bounds = None;
        self.draw_line(text, left, baseline, |x, y, c| {
            if coverage_is_visible(c) {
                InkBounds::include(&mut bounds, x, y);
            }
        });
        bounds
    }

    /// Vertical extent used to advance past one line of `text`.
    ///
    /// This is the inked height; blank text falls back to the line box.
    pub fn line_height(&self, text: &str) -> f32 {
        match self.ink_bounds(text, 0.0, self.ascent()) {
            Some(b) => b.height() as f32,
            None => self.ascent() - self.descent(),
        }
    }
}

/// One on-disk font resource to try.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontCandidate {
    /// File path (absolute, or relative to the working directory).
    pub path: PathBuf,
    /// Face index inside a collection.
    pub index: u32,
}

impl FontCandidate {
    fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            index: 0,
        }
    }
}

/// Ordered resource candidates for a (family, weight) pair.
pub fn platform_candidates(family: FontFamily, weight: FontWeight) -> Vec<FontCandidate> {
    let mut out = Vec::new();
    match family {
        FontFamily::Gothic => {
            let std_weight = match weight {
                FontWeight::W3 | FontWeight::W4 => "W4",
                FontWeight::W5 | FontWeight::W6 => "W6",
                FontWeight::W7 | FontWeight::W8 | FontWeight::W9 => "W8",
            };
            let w = weight_label(weight);
            out.push(FontCandidate::at(format!(
                "/Library/Fonts/ヒラギノ角ゴ Std {std_weight}.otf"
            )));
            out.push(FontCandidate::at(format!(
                "/System/Library/Fonts/ヒラギノ角ゴシック {w}.ttc"
            )));
            let (meiryo, yu) = match weight {
                FontWeight::W3 => ("meiryo.ttc", "YuGothL.ttc"),
                FontWeight::W4 => ("meiryo.ttc", "YuGothR.ttc"),
                FontWeight::W5 => ("meiryo.ttc", "YuGothM.ttc"),
                FontWeight::W6 | FontWeight::W7 | FontWeight::W8 | FontWeight::W9 => {
                    ("meiryob.ttc", "YuGothB.ttc")
                }
            };
            out.push(FontCandidate::at(format!("C:\\Windows\\Fonts\\{meiryo}")));
            out.push(FontCandidate::at(format!("C:\\Windows\\Fonts\\{yu}")));
            out.push(FontCandidate::at("msgothic.ttc"));
            out.push(FontCandidate::at("C:\\Windows\\Fonts\\msgothic.ttc"));
            let noto = if weight >= FontWeight::W6 {
                "NotoSansCJK-Bold.ttc"
            } else {
                "NotoSansCJK-Regular.ttc"
            };
            out.push(FontCandidate::at(format!(
                "/usr/share/fonts/opentype/noto/{noto}"
            )));
            out.push(FontCandidate::at(format!(
                "/usr/share/fonts/noto-cjk/{noto}"
            )));
        }
        FontFamily::Serif => {
            for p in [
                "/System/Library/Fonts/ヒラギノ明朝 ProN W6.ttc",
                "/Library/Fonts/ヒラギノ明朝 Std W6.otf",
                "/System/Library/Fonts/ヒラギノ明朝 ProN W3.ttc",
                "/Library/Fonts/ヒラギノ明朝 Std W3.otf",
                "C:\\Windows\\Fonts\\msmincho.ttc",
                "msmincho.ttc",
                "/usr/share/fonts/opentype/noto/NotoSerifCJK-Regular.ttc",
                "/usr/share/fonts/noto-cjk/NotoSerifCJK-Regular.ttc",
            ] {
                out.push(FontCandidate::at(p));
            }
        }
    }
    out
}

fn weight_label(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::W3 => "W3",
        FontWeight::W4 => "W4",
        FontWeight::W5 => "W5",
        FontWeight::W6 => "W6",
        FontWeight::W7 => "W7",
        FontWeight::W8 => "W8",
        FontWeight::W9 => "W9",
    }
}

/// Maps logical font requests to renderable handles.
///
/// Parsed resources are memoized by path; a miss is memoized too so absent files are probed
/// once. Resolution never fails: when no candidate opens, the built-in face is returned.
pub struct FontResolver {
    font_dirs: Vec<PathBuf>,
    system_candidates: bool,
    cache: Mutex<HashMap<FontCandidate, Option<FontArc>>>,
}

impl std::fmt::Debug for FontResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResolver")
            .field("font_dirs", &self.font_dirs)
            .field("system_candidates", &self.system_candidates)
            .finish_non_exhaustive()
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver {
    /// Resolver that probes the platform candidate tables.
    pub fn new() -> Self {
        Self {
            font_dirs: Vec::new(),
            system_candidates: true,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolver that always returns the built-in face.
    pub fn builtin_only() -> Self {
        Self {
            font_dirs: Vec::new(),
            system_candidates: false,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Also look for candidate file names inside `dir`, before the platform paths.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }

    /// Resolve `(family, weight)` at `size_px`, falling back to the built-in face.
    pub fn resolve(&self, family: FontFamily, weight: FontWeight, size_px: u32) -> FontHandle {
        let size_px = size_px.max(1);
        for candidate in self.candidates(family, weight) {
            if let Some(font) = self.load(&candidate) {
                return FontHandle::from_font(font, size_px);
            }
        }
        if self.system_candidates || !self.font_dirs.is_empty() {
            tracing::warn!(
                ?family,
                ?weight,
                size_px,
                "no font resource could be opened, using built-in face"
            );
        }
        FontHandle::builtin(size_px)
    }

    fn candidates(&self, family: FontFamily, weight: FontWeight) -> Vec<FontCandidate> {
        let platform = platform_candidates(family, weight);
        let mut out = Vec::new();
        for dir in &self.font_dirs {
            for c in &platform {
                if let Some(name) = file_name_of(&c.path) {
                    out.push(FontCandidate {
                        path: dir.join(name),
                        index: c.index,
                    });
                }
            }
        }
        if self.system_candidates {
            out.extend(platform);
        }
        out
    }

    fn load(&self, candidate: &FontCandidate) -> Option<FontArc> {
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(hit) = cache.get(candidate) {
            return hit.clone();
        }
        let loaded = std::fs::read(&candidate.path).ok().and_then(|bytes| {
            match FontVec::try_from_vec_and_index(bytes, candidate.index) {
                Ok(font) => Some(FontArc::new(font)),
                Err(e) => {
                    tracing::debug!(path = %candidate.path.display(), "font parse failed: {e}");
                    None
                }
            }
        });
        cache.insert(candidate.clone(), loaded.clone());
        loaded
    }
}

// Windows-style candidates use `\` separators that `Path` does not split on non-Windows hosts.
fn file_name_of(path: &Path) -> Option<String> {
    let s = path.to_string_lossy();
    s.rsplit(['/', '\\']).next().filter(|n| !n.is_empty()).map(str::to_owned)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
