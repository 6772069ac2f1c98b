//! Template engines: how the frames of one animation differ from each other.
//!
//! Every engine composes each frame through the shared [`Compositor`]; only the decoration drawn
//! between the image layer and the text layers (or, for the icon list, the rows themselves)
//! depends on the frame index.

/// Blinking rectangular border.
pub mod border;
/// Blinking icons in the four corners.
pub mod corner_icons;
/// Growing list of icon + text rows.
pub mod icon_list;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::assets::fonts::FontResolver;
use crate::assets::icons::{IconRequest, IconSource};
use crate::foundation::error::{ApngenError, ApngenResult};
use crate::render::composite::{Compositor, Layers};
use crate::render::frame::FrameSet;

pub use border::BlinkingBorder;
pub use corner_icons::CornerIcons;
pub use icon_list::{IconAnchorPolicy, IconList, icon_list_rows};

/// The three animation behaviours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    BlinkingBorder,
    CornerIcons,
    IconList,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::BlinkingBorder,
        TemplateKind::CornerIcons,
        TemplateKind::IconList,
    ];

    /// Short ASCII label used in output names.
    pub fn label(self) -> &'static str {
        match self {
            Self::BlinkingBorder => "border",
            Self::CornerIcons => "corner_icons",
            Self::IconList => "icon_list",
        }
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = ApngenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "border" | "blinking_border" => Ok(Self::BlinkingBorder),
            "corner_icons" | "corners" => Ok(Self::CornerIcons),
            "icon_list" | "list" => Ok(Self::IconList),
            other => Err(ApngenError::validation(format!(
                "unknown template \"{other}\" (expected border, corner_icons or icon_list)"
            ))),
        }
    }
}

/// Font and icon lookups shared by every frame of a run.
#[derive(Clone, Copy)]
pub struct RenderEnv<'a> {
    pub fonts: &'a FontResolver,
    pub icons: &'a dyn IconSource,
}

impl<'a> RenderEnv<'a> {
    pub fn new(fonts: &'a FontResolver, icons: &'a dyn IconSource) -> Self {
        Self { fonts, icons }
    }

    pub fn compositor(&self) -> Compositor<'a> {
        Compositor::new(self.fonts)
    }
}

impl std::fmt::Debug for RenderEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderEnv")
            .field("fonts", self.fonts)
            .finish_non_exhaustive()
    }
}

/// Per-run state prepared once and reused for every frame.
pub struct FrameContext<'a> {
    pub compositor: Compositor<'a>,
    pub layers: Layers<'a>,
    /// Icon bitmap at the engine's target size, if the engine uses one and it resolved.
    pub icon: Option<RgbaImage>,
}

impl<'a> FrameContext<'a> {
    pub fn new(env: &RenderEnv<'a>, layers: Layers<'a>, icon: Option<IconRequest>) -> Self {
        Self {
            compositor: env.compositor(),
            layers,
            icon: icon.and_then(|req| env.icons.load_icon(req)),
        }
    }
}

/// One animation behaviour.
pub trait TemplateEngine: Send + Sync {
    fn kind(&self) -> TemplateKind;

    /// Resolve per-run resources (icons) for `layers`.
    fn prepare<'a>(&self, env: &RenderEnv<'a>, layers: Layers<'a>) -> FrameContext<'a>;

    /// Compose frame `idx` (0-based).
    fn render_frame(&self, ctx: &FrameContext<'_>, idx: usize) -> RgbaImage;

    /// Index of the representative frame shown by previews.
    fn preview_frame(&self) -> usize {
        0
    }

    /// Compose frames `0..frame_count`.
    fn generate(
        &self,
        env: &RenderEnv<'_>,
        layers: Layers<'_>,
        frame_count: usize,
    ) -> ApngenResult<FrameSet> {
        if frame_count == 0 {
            return Err(ApngenError::validation("frame count must be > 0"));
        }
        let ctx = self.prepare(env, layers);
        let frames = (0..frame_count)
            .map(|idx| self.render_frame(&ctx, idx))
            .collect();
        FrameSet::new(layers.canvas, frames)
    }
}

/// Concrete template selection with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateParams {
    BlinkingBorder(BlinkingBorder),
    CornerIcons(CornerIcons),
    IconList(IconList),
}

impl TemplateParams {
    pub fn kind(&self) -> TemplateKind {
        self.engine().kind()
    }

    pub fn engine(&self) -> &dyn TemplateEngine {
        match self {
            Self::BlinkingBorder(e) => e,
            Self::CornerIcons(e) => e,
            Self::IconList(e) => e,
        }
    }

    /// Label of the variant axis: the border color or the icon.
    pub fn variant_label(&self) -> &'static str {
        match self {
            Self::BlinkingBorder(e) => e.color.name(),
            Self::CornerIcons(e) => e.icon.label(),
            Self::IconList(e) => e.icon.label(),
        }
    }

    /// Copy with every spatial parameter scaled by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        match self {
            Self::BlinkingBorder(e) => Self::BlinkingBorder(e.scaled(factor)),
            Self::CornerIcons(e) => Self::CornerIcons(e.scaled(factor)),
            Self::IconList(e) => Self::IconList(e.scaled(factor)),
        }
    }
}

/// Compose `frame_count` frames of `params` over `layers`.
#[tracing::instrument(skip(env, layers), fields(kind = ?params.kind()))]
pub fn generate_frames(
    env: &RenderEnv<'_>,
    layers: Layers<'_>,
    params: &TemplateParams,
    frame_count: usize,
) -> ApngenResult<FrameSet> {
    params.engine().generate(env, layers, frame_count)
}

/// Even frames show blinking decorations; odd frames hide them.
pub(crate) fn blink_on(idx: usize) -> bool {
    idx % 2 == 0
}

#[cfg(test)]
#[path = "../tests/unit/template.rs"]
mod tests;
