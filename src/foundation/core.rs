use crate::foundation::error::{ApngenError, ApngenResult};
use crate::foundation::math::scale_px;

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The 600×400 banner canvas every stock template is laid out for.
    pub const DEFAULT: Canvas = Canvas {
        width: 600,
        height: 400,
    };

    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ApngenResult<Self> {
        if width == 0 || height == 0 {
            return Err(ApngenError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Horizontal centre, rounded down.
    pub fn center_x(self) -> i32 {
        (self.width / 2) as i32
    }

    /// Vertical centre, rounded down.
    pub fn center_y(self) -> i32 {
        (self.height / 2) as i32
    }

    /// Uniformly scale both dimensions (truncating), never below 1px.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            width: scale_px(self.width as i32, factor).max(1) as u32,
            height: scale_px(self.height as i32, factor).max(1) as u32,
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Integer pixel position on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Construct a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Scale both coordinates (truncating toward zero).
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: scale_px(self.x, factor),
            y: scale_px(self.y, factor),
        }
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels as an `[r, g, b, a]` array.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with alpha forced to zero; used to seed transparent tiles.
    pub const fn transparent(self) -> Self {
        Self { a: 0, ..self }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
