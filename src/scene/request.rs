use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::color::BorderColor;
use crate::assets::decode::SourceImage;
use crate::assets::icons::IconKind;
use crate::encode::apng::{DEFAULT_LOOP_COUNT, FrameDelay};
use crate::foundation::core::{Canvas, Position};
use crate::foundation::error::{ApngenError, ApngenResult};
use crate::render::composite::Layers;
use crate::scene::model::{AnnotationLayer, ImageLayer, TextLayer};
use crate::template::{
    BlinkingBorder, CornerIcons, IconAnchorPolicy, IconList, TemplateKind, TemplateParams,
};

/// Largest accepted canvas side, in pixels. Also bounds the scaled image.
pub const MAX_CANVAS_SIDE: u32 = 2048;
/// Largest accepted frame count per animation.
pub const MAX_FRAMES: usize = 60;
/// Largest accepted font size, in pixels.
pub const MAX_FONT_SIZE: u32 = 500;
/// Bound on the magnitude of character, line and row spacing.
pub const MAX_SPACING: i32 = 1000;
/// Largest accepted border width or icon size.
pub const MAX_DECORATION_SIZE: u32 = 1000;
/// Bound on the magnitude of any layer coordinate.
pub const MAX_COORDINATE: i32 = 100_000;
pub const MAX_IMAGE_SCALE: f32 = 20.0;
/// APNG stores delays as `u16` fractions of a second.
pub const MAX_FRAME_DELAY_MS: u32 = u16::MAX as u32;

fn check_range<T: PartialOrd + Display>(
    what: impl Display,
    value: T,
    range: RangeInclusive<T>,
) -> ApngenResult<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ApngenError::validation(format!(
        "{what} must be in {}..={}, got {value}",
        range.start(),
        range.end()
    )))
}

fn check_position(what: impl Display, p: Position) -> ApngenResult<()> {
    let bound = -MAX_COORDINATE..=MAX_COORDINATE;
    check_range(format_args!("{what} x"), p.x, bound.clone())?;
    check_range(format_args!("{what} y"), p.y, bound)
}

/// One template selection and the variants generated from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateRequest {
    BlinkingBorder(BorderRequest),
    CornerIcons(CornerIconsRequest),
    IconList(IconListRequest),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BorderRequest {
    pub width: u32,
    /// One output per color.
    pub colors: Vec<BorderColor>,
    pub frames: usize,
    pub loop_count: u32,
}

impl Default for BorderRequest {
    fn default() -> Self {
        Self {
            width: 13,
            colors: vec![BorderColor::Red],
            frames: 5,
            loop_count: DEFAULT_LOOP_COUNT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CornerIconsRequest {
    pub size: u32,
    /// One output per icon.
    pub icons: Vec<IconKind>,
    pub frames: usize,
    pub loop_count: u32,
}

impl Default for CornerIconsRequest {
    fn default() -> Self {
        Self {
            size: 85,
            icons: vec![IconKind::Check],
            frames: 5,
            loop_count: DEFAULT_LOOP_COUNT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconListRequest {
    pub size: u32,
    /// One output per icon.
    pub icons: Vec<IconKind>,
    pub frames: usize,
    pub loop_count: u32,
    pub anchor: IconAnchorPolicy,
}

impl Default for IconListRequest {
    fn default() -> Self {
        Self {
            size: 60,
            icons: vec![IconKind::Check],
            frames: 5,
            loop_count: DEFAULT_LOOP_COUNT,
            anchor: IconAnchorPolicy::MeasuredEdge,
        }
    }
}

impl TemplateRequest {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::BlinkingBorder(_) => TemplateKind::BlinkingBorder,
            Self::CornerIcons(_) => TemplateKind::CornerIcons,
            Self::IconList(_) => TemplateKind::IconList,
        }
    }

    /// Default request for `kind`.
    pub fn default_for(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::BlinkingBorder => Self::BlinkingBorder(BorderRequest::default()),
            TemplateKind::CornerIcons => Self::CornerIcons(CornerIconsRequest::default()),
            TemplateKind::IconList => Self::IconList(IconListRequest::default()),
        }
    }

    pub fn frames(&self) -> usize {
        match self {
            Self::BlinkingBorder(r) => r.frames,
            Self::CornerIcons(r) => r.frames,
            Self::IconList(r) => r.frames,
        }
    }

    pub fn loop_count(&self) -> u32 {
        match self {
            Self::BlinkingBorder(r) => r.loop_count,
            Self::CornerIcons(r) => r.loop_count,
            Self::IconList(r) => r.loop_count,
        }
    }

    /// Expand the variant list into concrete parameters, in declaration order.
    pub fn variants(&self) -> Vec<TemplateParams> {
        match self {
            Self::BlinkingBorder(r) => r
                .colors
                .iter()
                .map(|&c| TemplateParams::BlinkingBorder(BlinkingBorder::new(r.width, c)))
                .collect(),
            Self::CornerIcons(r) => r
                .icons
                .iter()
                .map(|&i| TemplateParams::CornerIcons(CornerIcons::new(i, r.size)))
                .collect(),
            Self::IconList(r) => r
                .icons
                .iter()
                .map(|&i| {
                    TemplateParams::IconList(IconList::new(i, r.size).with_anchor(r.anchor))
                })
                .collect(),
        }
    }

    fn validate(&self) -> ApngenResult<()> {
        let kind = self.kind().label();
        check_range(
            format_args!("{kind}: frame count"),
            self.frames(),
            1..=MAX_FRAMES,
        )?;
        let (what, size) = match self {
            Self::BlinkingBorder(r) => ("border width", r.width),
            Self::CornerIcons(r) => ("icon size", r.size),
            Self::IconList(r) => ("icon size", r.size),
        };
        check_range(
            format_args!("{kind}: {what}"),
            size,
            1..=MAX_DECORATION_SIZE,
        )?;
        if self.variants().is_empty() {
            return Err(ApngenError::validation(format!(
                "{kind}: at least one color/icon variant is required"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestDef {
    #[serde(default)]
    canvas: Canvas,
    #[serde(default)]
    text_layers: Vec<TextLayerDef>,
    #[serde(default)]
    annotations: Vec<AnnotationLayer>,
    /// Shorthand for a single entry of `images`.
    #[serde(default)]
    image: Option<ImageDef>,
    #[serde(default)]
    images: Vec<ImageDef>,
    #[serde(default = "default_templates")]
    templates: Vec<TemplateRequest>,
    #[serde(default)]
    frame_delay: FrameDelay,
}

/// A text layer whose missing position defaults to the centre of the request canvas.
#[derive(Debug, Deserialize)]
struct TextLayerDef {
    #[serde(flatten)]
    layer: TextLayer,
    #[serde(default)]
    position: Option<Position>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImageDef {
    path: PathBuf,
    #[serde(default = "default_image_scale")]
    scale: f32,
    #[serde(default)]
    position: Option<Position>,
}

fn default_templates() -> Vec<TemplateRequest> {
    vec![TemplateRequest::default_for(TemplateKind::BlinkingBorder)]
}

fn default_image_scale() -> f32 {
    1.0
}

/// Everything one generation run needs, passed in as a single immutable value.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub canvas: Canvas,
    pub text_layers: Vec<TextLayer>,
    pub annotations: Vec<AnnotationLayer>,
    /// Image variations; every one yields its own outputs. [`ImageLayer::none`] draws nothing.
    pub images: Vec<ImageLayer>,
    pub templates: Vec<TemplateRequest>,
    pub frame_delay: FrameDelay,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            canvas: Canvas::DEFAULT,
            text_layers: Vec::new(),
            annotations: Vec::new(),
            images: vec![ImageLayer::none()],
            templates: default_templates(),
            frame_delay: FrameDelay::default(),
        }
    }
}

impl GenerationRequest {
    /// Parse a request from JSON; relative image paths are resolved against the working directory.
    pub fn from_reader<R: std::io::Read>(r: R) -> ApngenResult<Self> {
        Self::from_reader_in(r, Path::new("."))
    }

    /// Parse a request from a JSON file; relative image paths are resolved against the file's
    /// directory.
    pub fn from_path(path: impl AsRef<Path>) -> ApngenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ApngenError::validation(format!("open request JSON '{}': {e}", path.display()))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_reader_in(BufReader::new(f), base)
    }

    fn from_reader_in<R: std::io::Read>(r: R, base: &Path) -> ApngenResult<Self> {
        let def: RequestDef = serde_json::from_reader(r)
            .map_err(|e| ApngenError::validation(format!("parse request JSON: {e}")))?;
        let canvas = Canvas::new(def.canvas.width, def.canvas.height)?;
        let center = Position::new(canvas.center_x(), canvas.center_y());
        let defs = match (def.image, def.images) {
            (Some(_), images) if !images.is_empty() => {
                return Err(ApngenError::validation(
                    "set either 'image' or 'images', not both",
                ));
            }
            (Some(img), _) => vec![img],
            (None, images) => images,
        };
        let images = if defs.is_empty() {
            vec![ImageLayer::none()]
        } else {
            defs.into_iter()
                .map(|img| {
                    let source = SourceImage::open(base.join(&img.path))?;
                    let position = img.position.unwrap_or(center);
                    Ok(ImageLayer::new(source, position).with_scale(img.scale))
                })
                .collect::<ApngenResult<Vec<_>>>()?
        };
        let text_layers = def
            .text_layers
            .into_iter()
            .map(|t| TextLayer {
                position: t.position.unwrap_or(center),
                ..t.layer
            })
            .collect();
        Ok(Self {
            canvas,
            text_layers,
            annotations: def.annotations,
            images,
            templates: def.templates,
            frame_delay: def.frame_delay,
        })
    }

    /// Check the preconditions generation relies on, including the numeric bounds above.
    ///
    /// Empty enabled layer sets are rejected here; rendering itself treats them as no-ops.
    pub fn validate(&self) -> ApngenResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        check_range("canvas width", self.canvas.width, 1..=MAX_CANVAS_SIDE)?;
        check_range("canvas height", self.canvas.height, 1..=MAX_CANVAS_SIDE)?;
        if !self.text_layers.iter().any(|t| t.enabled) {
            return Err(ApngenError::validation("no enabled text layer"));
        }
        if !self.annotations.iter().any(|a| a.enabled) {
            return Err(ApngenError::validation("no enabled annotation layer"));
        }
        if self.images.is_empty() {
            return Err(ApngenError::validation(
                "image list must not be empty (use no image instead)",
            ));
        }
        if self.templates.is_empty() {
            return Err(ApngenError::validation("no template selected"));
        }

        let font = 1..=MAX_FONT_SIZE;
        let spacing = -MAX_SPACING..=MAX_SPACING;
        let coord = -MAX_COORDINATE..=MAX_COORDINATE;
        for (idx, t) in self.text_layers.iter().enumerate() {
            let what = format!("text layer {idx}");
            check_range(format_args!("{what}: font size"), t.size, font.clone())?;
            check_range(
                format_args!("{what}: char spacing"),
                t.char_spacing,
                spacing.clone(),
            )?;
            check_range(
                format_args!("{what}: line spacing"),
                t.line_spacing,
                spacing.clone(),
            )?;
            check_position(format_args!("{what}: position"), t.position)?;

            let list = &t.icon_list;
            check_range(
                format_args!("{what}: icon list font size"),
                list.size,
                font.clone(),
            )?;
            check_range(
                format_args!("{what}: icon list char spacing"),
                list.char_spacing,
                spacing.clone(),
            )?;
            check_range(
                format_args!("{what}: icon list row spacing"),
                list.row_spacing,
                0..=MAX_SPACING,
            )?;
            check_range(format_args!("{what}: icon list x"), list.x, coord.clone())?;
            check_range(
                format_args!("{what}: icon list baseline"),
                list.baseline_y,
                coord.clone(),
            )?;
        }
        for (idx, a) in self.annotations.iter().enumerate() {
            check_range(
                format_args!("annotation {idx}: font size"),
                a.size,
                font.clone(),
            )?;
            check_position(format_args!("annotation {idx}: position"), a.position)?;
        }
        for (idx, img) in self.images.iter().enumerate() {
            if img.source.is_none() {
                continue;
            }
            if !(img.scale.is_finite() && img.scale > 0.0 && img.scale <= MAX_IMAGE_SCALE) {
                return Err(ApngenError::validation(format!(
                    "image {idx}: scale must be in (0, {MAX_IMAGE_SCALE}], got {}",
                    img.scale
                )));
            }
            let (w, h) = img.scaled_size();
            if w > MAX_CANVAS_SIDE || h > MAX_CANVAS_SIDE {
                return Err(ApngenError::validation(format!(
                    "image {idx}: scaled size {w}x{h} exceeds {MAX_CANVAS_SIDE} pixels"
                )));
            }
            check_position(format_args!("image {idx}: position"), img.position)?;
        }
        if let FrameDelay::Millis(ms) = self.frame_delay {
            check_range("frame delay (ms)", ms, 1..=MAX_FRAME_DELAY_MS)?;
        }
        for t in &self.templates {
            t.validate()?;
        }
        Ok(())
    }

    pub fn enabled_text_layers(&self) -> impl Iterator<Item = &TextLayer> {
        self.text_layers.iter().filter(|t| t.enabled)
    }

    pub fn enabled_annotations(&self) -> impl Iterator<Item = &AnnotationLayer> {
        self.annotations.iter().filter(|a| a.enabled)
    }

    /// The layers of one output: a single annotation, text layer and image variation, each
    /// addressed by its index in the request lists.
    pub fn variant_layers(
        &self,
        annotation: usize,
        text: usize,
        image: usize,
    ) -> ApngenResult<Layers<'_>> {
        let a = self.annotations.get(annotation).ok_or_else(|| {
            ApngenError::validation(format!(
                "annotation index {annotation} out of range ({} annotations)",
                self.annotations.len()
            ))
        })?;
        let t = self.text_layers.get(text).ok_or_else(|| {
            ApngenError::validation(format!(
                "text layer index {text} out of range ({} text layers)",
                self.text_layers.len()
            ))
        })?;
        let img = self.images.get(image).ok_or_else(|| {
            ApngenError::validation(format!(
                "image index {image} out of range ({} images)",
                self.images.len()
            ))
        })?;
        if !a.enabled {
            return Err(ApngenError::validation(format!(
                "annotation {annotation} is disabled"
            )));
        }
        if !t.enabled {
            return Err(ApngenError::validation(format!(
                "text layer {text} is disabled"
            )));
        }
        Ok(Layers::new(
            self.canvas,
            img,
            std::slice::from_ref(t),
            std::slice::from_ref(a),
        ))
    }

    /// First request for `kind`, or its defaults.
    pub fn template(&self, kind: TemplateKind) -> TemplateRequest {
        self.templates
            .iter()
            .find(|t| t.kind() == kind)
            .cloned()
            .unwrap_or_else(|| TemplateRequest::default_for(kind))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/request.rs"]
mod tests;
