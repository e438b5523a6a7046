use std::fmt;

use crate::foundation::core::{HexColor, Point};
use crate::foundation::math::round_px;

/// Default font size in canonical pixels.
pub const DEFAULT_FONT_SIZE: f64 = 120.0;

/// Stable layer identity, allocated by the [`crate::LayerStore`] and never reused by it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One positioned, styled unit of text.
///
/// Layers are immutable values; store updates replace them wholesale.
pub struct TextLayer {
    /// Store-assigned identity.
    pub id: LayerId,
    /// Text content.
    pub text: String,
    /// Anchor position in canonical space.
    pub position: Point,
    /// Fully populated style.
    pub style: TextStyle,
}

impl TextLayer {
    /// Wire representation sent to the rendering collaborator.
    ///
    /// Positions and the font size are rounded to whole pixels, which is what the renderer takes.
    pub fn to_wire(&self) -> WireTextLayer {
        let mut style = self.style.clone();
        style.font_size = round_px(style.font_size) as f64;
        WireTextLayer {
            text: self.text.clone(),
            position: WirePoint {
                x: round_px(self.position.x),
                y: round_px(self.position.y),
            },
            style,
        }
    }
}

/// Seed for a new layer; the store assigns the id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerDraft {
    /// Text content.
    pub text: String,
    /// Canonical position; `None` lets the editor pick the default placement.
    pub position: Option<Point>,
    /// Style overrides; `None` uses the configured default style.
    pub style: Option<TextStyle>,
}

impl LayerDraft {
    /// Draft with only text set.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text style with every field populated.
///
/// Fields absent on the wire take the documented defaults: size 120, white, Anton, no effect.
pub struct TextStyle {
    /// Font size in canonical pixels.
    #[serde(default = "default_font_size", serialize_with = "serialize_font_size")]
    pub font_size: f64,
    /// Fill colour.
    #[serde(default)]
    pub color: HexColor,
    /// Font family from the renderer's font table.
    #[serde(default)]
    pub font_name: FontName,
    /// Decoration applied around the glyphs.
    #[serde(default, rename = "effects")]
    pub effect: EffectDescriptor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: HexColor::WHITE,
            font_name: FontName::default(),
            effect: EffectDescriptor::none(),
        }
    }
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

// Whole sizes go out as integers.
fn serialize_font_size<S: serde::Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*v as i64)
    } else {
        serializer.serialize_f64(*v)
    }
}

/// Fonts known to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontName {
    /// Anton (condensed display face).
    #[default]
    Anton,
    /// Six Caps.
    SixCaps,
    /// Impact.
    Impact,
    /// Arial Bold.
    ArialBold,
    /// Helvetica Bold.
    HelveticaBold,
    /// Boldonse.
    Boldonse,
}

impl FontName {
    /// All fonts, in the renderer's table order.
    pub const ALL: [FontName; 6] = [
        FontName::Anton,
        FontName::SixCaps,
        FontName::Impact,
        FontName::ArialBold,
        FontName::HelveticaBold,
        FontName::Boldonse,
    ];

    /// Wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            FontName::Anton => "anton",
            FontName::SixCaps => "sixcaps",
            FontName::Impact => "impact",
            FontName::ArialBold => "arial_bold",
            FontName::HelveticaBold => "helvetica_bold",
            FontName::Boldonse => "boldonse",
        }
    }

    /// Case-insensitive lookup of a wire identifier.
    pub fn from_wire(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for FontName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for FontName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = serde_json::Value::deserialize(deserializer)?;
        let name = v.as_str().unwrap_or_default();
        Ok(Self::from_wire(name).unwrap_or_else(|| {
            tracing::debug!(font_name = name, "unknown font, using default");
            Self::default()
        }))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Raw effect descriptor, `{ "type": ..., "settings": {...} }` on the wire.
///
/// Settings are kept unparsed so anything a client sends survives a round trip; interpretation
/// happens in [`crate::resolve_effect`].
pub struct EffectDescriptor {
    /// Effect type identifier (`none`, `shadow`, `outline`, `glow`, `3d_depth`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Variant-specific settings object.
    pub settings: serde_json::Value,
}

impl EffectDescriptor {
    /// Descriptor from raw parts.
    pub fn new(kind: impl Into<String>, settings: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            settings,
        }
    }

    /// No decoration.
    pub fn none() -> Self {
        Self::new("none", serde_json::json!({}))
    }

    /// Drop shadow.
    pub fn shadow(offset: [f64; 2], color: HexColor, opacity: f64, blur: f64) -> Self {
        Self::new(
            "shadow",
            serde_json::json!({
                "offset": offset,
                "color": color.to_string(),
                "opacity": opacity,
                "blur": blur,
            }),
        )
    }

    /// Stroke around the glyphs.
    pub fn outline(width: f64, color: HexColor, opacity: f64) -> Self {
        Self::new(
            "outline",
            serde_json::json!({
                "width": width,
                "color": color.to_string(),
                "opacity": opacity,
            }),
        )
    }

    /// Soft halo around the glyphs.
    pub fn glow(color: HexColor, radius: f64, opacity: f64) -> Self {
        Self::new(
            "glow",
            serde_json::json!({
                "color": color.to_string(),
                "radius": radius,
                "opacity": opacity,
            }),
        )
    }

    /// Stacked extrusion behind the glyphs. Gradient colours are ordered nearest first.
    pub fn depth3d(layers: u32, angle_deg: f64, distance: f64, gradient: &[HexColor]) -> Self {
        let gradient: Vec<String> = gradient.iter().map(ToString::to_string).collect();
        Self::new(
            "3d_depth",
            serde_json::json!({
                "layers": layers,
                "angle": angle_deg,
                "distance": distance,
                "color_gradient": gradient,
            }),
        )
    }
}

impl Default for EffectDescriptor {
    fn default() -> Self {
        Self::none()
    }
}

impl<'de> serde::Deserialize<'de> for EffectDescriptor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(v))
    }
}

impl EffectDescriptor {
    /// Lenient decoding of a descriptor value.
    ///
    /// Accepts the unified `{type, settings}` shape and the older `{ "shadow": {...} }` shape.
    /// Anything else becomes `none`.
    pub fn from_value(v: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut obj) = v else {
            return Self::none();
        };
        if let Some(kind) = obj.remove("type") {
            let kind = match kind {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            let settings = obj
                .remove("settings")
                .filter(|s| !s.is_null())
                .unwrap_or_else(|| serde_json::json!({}));
            return Self::new(kind, settings);
        }
        if let Some(shadow) = obj.remove("shadow") {
            return Self::new("shadow", shadow);
        }
        Self::none()
    }
}

/// Integer canonical point as sent to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WirePoint {
    /// X in canonical pixels.
    pub x: i64,
    /// Y in canonical pixels.
    pub y: i64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text layer as it crosses the collaborator boundary.
pub struct WireTextLayer {
    /// Text content.
    pub text: String,
    /// Canonical position, whole pixels.
    pub position: WirePoint,
    /// Style with wire field names.
    #[serde(default)]
    pub style: TextStyle,
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
