use std::fmt;

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Fixed pixel dimensions of the uploaded image.
///
/// Every persisted layer position and size is expressed in this space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanonicalImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl CanonicalImage {
    /// Build image dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center of the image in canonical space.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub(crate) fn size(self) -> Option<Size> {
        positive_size(f64::from(self.width), f64::from(self.height))
    }
}

/// Current on-screen box the image is rendered into. Derived, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayViewport {
    /// Viewport width in display pixels.
    pub width: f64,
    /// Viewport height in display pixels.
    pub height: f64,
}

impl DisplayViewport {
    /// Build viewport dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub(crate) fn size(self) -> Option<Size> {
        positive_size(self.width, self.height)
    }
}

fn positive_size(w: f64, h: f64) -> Option<Size> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    (ok(w) && ok(h)).then(|| Size::new(w, h))
}

/// Straight-alpha RGBA8 colour, written on the wire as a hex string.
///
/// Parsing is lenient the way the renderer is: `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA` are
/// accepted and anything else becomes opaque white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (255 = opaque).
    pub a: u8,
}

impl HexColor {
    /// Opaque white, also the fallback for malformed input.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Build a colour from its channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex colour, falling back to opaque white.
    pub fn parse(s: &str) -> Self {
        Self::try_parse(s).unwrap_or(Self::WHITE)
    }

    /// Parse a hex colour, returning `None` when it is malformed.
    pub fn try_parse(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl serde::Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = serde_json::Value::deserialize(deserializer)?;
        Ok(v.as_str().map(Self::parse).unwrap_or(Self::WHITE))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
