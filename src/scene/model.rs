use serde::{Deserialize, Serialize};

use crate::assets::color::TextColor;
use crate::assets::decode::SourceImage;
use crate::assets::fonts::{FontFamily, FontWeight, needs_synthetic_bold};
use crate::foundation::core::{Canvas, Position, Rgba8};
use crate::foundation::error::{ApngenError, ApngenResult};
use crate::foundation::math::scale_px;
use crate::text::Spacing;

/// Horizontal glyph scale, bounded to `AspectRatio::MIN..=AspectRatio::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct AspectRatio(f32);

impl AspectRatio {
    /// Unscaled glyphs.
    pub const ONE: AspectRatio = AspectRatio(1.0);
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 4.0;

    pub fn new(value: f32) -> ApngenResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ApngenError::validation(format!(
                "aspect ratio must be in {}..={}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f32> for AspectRatio {
    type Error = ApngenError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AspectRatio> for f32 {
    fn from(a: AspectRatio) -> Self {
        a.0
    }
}

/// Layout of a text layer when it drives the incremental icon list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconListStyle {
    /// Font size of each list row.
    pub size: u32,
    /// Nominal left x of the row text.
    pub x: i32,
    /// Vertical centre of the bottom row.
    pub baseline_y: i32,
    pub char_spacing: i32,
    pub aspect_ratio: AspectRatio,
    /// Distance between row centres.
    pub row_spacing: i32,
}

impl Default for IconListStyle {
    fn default() -> Self {
        Self {
            size: 40,
            x: 120,
            baseline_y: 300,
            char_spacing: 0,
            aspect_ratio: AspectRatio::ONE,
            row_spacing: 50,
        }
    }
}

impl IconListStyle {
    /// Uniformly scale every spatial parameter (aspect ratio is dimensionless).
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            size: scale_px(self.size as i32, factor).max(1) as u32,
            x: scale_px(self.x, factor),
            baseline_y: scale_px(self.baseline_y, factor),
            char_spacing: scale_px(self.char_spacing, factor),
            aspect_ratio: self.aspect_ratio,
            row_spacing: scale_px(self.row_spacing, factor),
        }
    }

    pub fn spacing(&self) -> Spacing {
        Spacing {
            char_spacing: self.char_spacing,
            line_spacing: 0,
            aspect_ratio: self.aspect_ratio.get(),
        }
    }
}

/// Multi-line styled text, centred on its position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLayer {
    pub text: String,
    pub family: FontFamily,
    pub weight: FontWeight,
    /// Em size in pixels.
    pub size: u32,
    pub color: TextColor,
    pub char_spacing: i32,
    pub line_spacing: i32,
    pub aspect_ratio: AspectRatio,
    /// Centre of the first line.
    pub position: Position,
    pub enabled: bool,
    pub icon_list: IconListStyle,
}

impl Default for TextLayer {
    fn default() -> Self {
        Self {
            text: "サンプルテキスト".to_owned(),
            family: FontFamily::Gothic,
            weight: FontWeight::W7,
            size: 100,
            color: TextColor(Rgba8::BLACK),
            char_spacing: 0,
            line_spacing: 0,
            aspect_ratio: AspectRatio::ONE,
            position: Position::new(Canvas::DEFAULT.center_x(), Canvas::DEFAULT.center_y()),
            enabled: true,
            icon_list: IconListStyle::default(),
        }
    }
}

impl TextLayer {
    /// A layer showing `text` centred on `position`, other fields at their defaults.
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
            ..Self::default()
        }
    }

    pub fn synthetic_bold(&self) -> bool {
        needs_synthetic_bold(self.family, self.weight)
    }

    /// Font size clamped to at least one pixel.
    pub fn clamped_size(&self) -> u32 {
        self.size.max(1)
    }

    pub fn spacing(&self) -> Spacing {
        Spacing {
            char_spacing: self.char_spacing,
            line_spacing: self.line_spacing,
            aspect_ratio: self.aspect_ratio.get(),
        }
    }

    /// Text for the icon list: a single row with line breaks removed.
    pub fn single_row_text(&self) -> String {
        strip_line_breaks(&self.text)
    }

    /// Copy with size, position and spacings scaled by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            size: scale_px(self.size as i32, factor).max(1) as u32,
            char_spacing: scale_px(self.char_spacing, factor),
            line_spacing: scale_px(self.line_spacing, factor),
            position: self.position.scaled(factor),
            icon_list: self.icon_list.scaled(factor),
            ..self.clone()
        }
    }
}

/// Single-line footnote drawn last, anchored at its left-middle point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationLayer {
    pub text: String,
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size: u32,
    pub color: TextColor,
    pub position: Position,
    pub enabled: bool,
    /// Marks the variant whose outputs carry a fixed product name; rendering ignores it.
    pub fixed_product_name: bool,
}

impl Default for AnnotationLayer {
    fn default() -> Self {
        Self {
            text: "※注釈テキスト".to_owned(),
            family: FontFamily::Gothic,
            weight: FontWeight::W7,
            size: 10,
            color: TextColor(Rgba8::BLACK),
            position: Position::new(10, 390),
            enabled: true,
            fixed_product_name: false,
        }
    }
}

impl AnnotationLayer {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
            ..Self::default()
        }
    }

    pub fn synthetic_bold(&self) -> bool {
        needs_synthetic_bold(self.family, self.weight)
    }

    pub fn clamped_size(&self) -> u32 {
        self.size.max(1)
    }

    /// Annotations always render as one line.
    pub fn single_line_text(&self) -> String {
        strip_line_breaks(&self.text)
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            size: scale_px(self.size as i32, factor).max(1) as u32,
            position: self.position.scaled(factor),
            ..self.clone()
        }
    }
}

fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|&c| c != '\n' && c != '\r').collect()
}

/// Optional uploaded bitmap, scaled and centred on `position`.
#[derive(Clone, Debug)]
pub struct ImageLayer {
    /// `None` draws nothing.
    pub source: Option<SourceImage>,
    pub original_width: u32,
    pub original_height: u32,
    pub scale: f32,
    pub position: Position,
}

impl ImageLayer {
    /// No image.
    pub fn none() -> Self {
        Self {
            source: None,
            original_width: 0,
            original_height: 0,
            scale: 1.0,
            position: Position::new(Canvas::DEFAULT.center_x(), Canvas::DEFAULT.center_y()),
        }
    }

    /// Wrap a decoded bitmap at scale 1.0, recording its dimensions as the originals.
    pub fn new(source: SourceImage, position: Position) -> Self {
        Self {
            original_width: source.width(),
            original_height: source.height(),
            source: Some(source),
            scale: 1.0,
            position,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Target size after scaling; zero in either axis means nothing is drawn.
    pub fn scaled_size(&self) -> (u32, u32) {
        let s = if self.scale.is_finite() {
            self.scale.max(0.0)
        } else {
            0.0
        };
        (
            (self.original_width as f32 * s) as u32,
            (self.original_height as f32 * s) as u32,
        )
    }

    /// Copy for a canvas scaled by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            scale: self.scale * factor,
            position: self.position.scaled(factor),
            ..self.clone()
        }
    }
}

impl Default for ImageLayer {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
