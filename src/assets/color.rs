use crate::foundation::core::Rgba8;
use serde::{Deserialize, Serialize};

/// Fill color for text and annotation layers.
///
/// Deserializes from `#RRGGBB` / `#RRGGBBAA` hex strings or `[r, g, b]` / `[r, g, b, a]` byte
/// arrays, and serializes back to hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextColor(pub Rgba8);

impl TextColor {
    /// Parse a hex color string.
    pub fn from_hex(s: &str) -> Result<Self, String> {
        parse_hex(s).map(Self)
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        let c = self.0;
        if c.a == 255 {
            format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a)
        }
    }
}

impl From<Rgba8> for TextColor {
    fn from(c: Rgba8) -> Self {
        Self(c)
    }
}

impl Serialize for TextColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TextColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map(Self).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self(Rgba8::rgb(*r, *g, *b))),
                [r, g, b, a] => Ok(Self(Rgba8 {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: *a,
                })),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Closed palette for the blinking border decoration.
///
/// Unknown names map to [`BorderColor::Red`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BorderColor {
    /// `#FF0000`, the fallback.
    #[default]
    Red,
    /// `#0000FF`.
    Blue,
    /// `#00FF00`.
    Green,
    /// `#000000`.
    Black,
    /// `#FF6600`.
    Orange,
}

impl BorderColor {
    /// Every palette entry in display order.
    pub const ALL: [BorderColor; 5] = [
        BorderColor::Red,
        BorderColor::Blue,
        BorderColor::Green,
        BorderColor::Black,
        BorderColor::Orange,
    ];

    /// Resolve a palette name, falling back to red.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "blue" => Self::Blue,
            "green" => Self::Green,
            "black" => Self::Black,
            "orange" => Self::Orange,
            other => {
                tracing::warn!(color = other, "unknown border color, using red");
                Self::Red
            }
        }
    }

    /// Lowercase palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Black => "black",
            Self::Orange => "orange",
        }
    }

    /// Opaque RGBA value.
    pub fn rgba(self) -> Rgba8 {
        match self {
            Self::Red => Rgba8::rgb(0xFF, 0x00, 0x00),
            Self::Blue => Rgba8::rgb(0x00, 0x00, 0xFF),
            Self::Green => Rgba8::rgb(0x00, 0xFF, 0x00),
            Self::Black => Rgba8::rgb(0x00, 0x00, 0x00),
            Self::Orange => Rgba8::rgb(0xFF, 0x66, 0x00),
        }
    }
}

impl From<String> for BorderColor {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<BorderColor> for String {
    fn from(c: BorderColor) -> Self {
        c.name().to_owned()
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
