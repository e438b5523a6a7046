use crate::composition::model::EffectDescriptor;
use crate::foundation::core::{HexColor, Vec2};
use crate::foundation::error::Fallback;
use crate::foundation::math::finite;

/// Glow sampling density used by the renderer: one sample every 30 degrees.
pub const GLOW_SAMPLES_PER_RING: usize = 12;
/// Upper bound on glow rings regardless of radius.
pub const GLOW_MAX_RINGS: usize = 20;

/// Effect parameters scaled into display space, ready for a renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedEffect {
    /// No decoration.
    None,
    /// Offset, blurred copy behind the glyphs.
    Shadow(ResolvedShadow),
    /// Stroke around the glyphs.
    Outline(ResolvedOutline),
    /// Fading halo around the glyphs.
    Glow(ResolvedGlow),
    /// Stacked extrusion behind the glyphs.
    Depth3d(ResolvedDepth),
}

impl ResolvedEffect {
    /// `true` for [`ResolvedEffect::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, ResolvedEffect::None)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Scaled shadow parameters.
pub struct ResolvedShadow {
    /// Horizontal offset in display pixels.
    pub offset_x: f64,
    /// Vertical offset in display pixels.
    pub offset_y: f64,
    /// Blur radius in display pixels.
    pub blur_radius: f64,
    /// Shadow colour.
    pub color: HexColor,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Scaled outline parameters.
pub struct ResolvedOutline {
    /// Stroke width in display pixels.
    pub stroke_width: f64,
    /// Stroke colour.
    pub color: HexColor,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Scaled glow parameters.
pub struct ResolvedGlow {
    /// Outer radius in display pixels.
    pub radius: f64,
    /// Glow colour.
    pub color: HexColor,
    /// Opacity of the innermost ring, in `[0, 1]`.
    pub opacity: f64,
}

/// One concentric glow ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowRing {
    /// Ring radius in display pixels.
    pub radius: f64,
    /// Ring opacity in `[0, 1]`.
    pub opacity: f64,
}

impl ResolvedGlow {
    /// Rings from the inside out, fading linearly to zero at the outer radius.
    pub fn rings(&self) -> Vec<GlowRing> {
        let steps = (self.radius.ceil().max(0.0) as usize).min(GLOW_MAX_RINGS);
        (1..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                GlowRing {
                    radius: t * self.radius,
                    opacity: self.opacity * (1.0 - t),
                }
            })
            .collect()
    }

    /// Sample offsets around one ring.
    pub fn ring_offsets(ring: GlowRing) -> impl Iterator<Item = Vec2> {
        (0..GLOW_SAMPLES_PER_RING).map(move |k| {
            let a = (k as f64 * 360.0 / GLOW_SAMPLES_PER_RING as f64).to_radians();
            Vec2::new(ring.radius * a.cos(), ring.radius * a.sin())
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Scaled 3D depth parameters.
pub struct ResolvedDepth {
    /// Number of extrusion copies.
    pub layer_count: u32,
    /// Extrusion direction in degrees. Angles are scale independent.
    pub angle_degrees: f64,
    /// Distance between consecutive copies in display pixels.
    pub step_distance: f64,
    /// Copy colours, nearest first.
    pub color_gradient: Vec<HexColor>,
}

/// One extrusion copy, relative to the main text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthStep {
    /// Offset from the text origin in display pixels.
    pub offset: Vec2,
    /// Fill colour of this copy.
    pub color: HexColor,
}

impl ResolvedDepth {
    /// Extrusion copies in paint order (farthest first).
    pub fn steps(&self) -> Vec<DepthStep> {
        let n = self.layer_count;
        if n == 0 || self.color_gradient.is_empty() {
            return Vec::new();
        }
        let last = self.color_gradient.len() - 1;
        let a = self.angle_degrees.to_radians();
        let dir = Vec2::new(a.cos(), a.sin()) * self.step_distance;

        (1..=n)
            .rev()
            .map(|k| {
                let idx = ((f64::from(k) / f64::from(n)) * last as f64) as usize;
                DepthStep {
                    offset: -(dir * f64::from(k)),
                    color: self.color_gradient[idx.min(last)],
                }
            })
            .collect()
    }
}

/// Resolve a descriptor at the given vertical display scale.
///
/// Distances scale by `scale`; colours, opacities, angles and counts do not. Keys missing from
/// `settings` take the renderer's preset values. Unknown types and malformed settings resolve
/// to [`ResolvedEffect::None`]; this function never fails.
pub fn resolve_effect(desc: &EffectDescriptor, scale: f64) -> ResolvedEffect {
    match try_resolve(desc, scale) {
        Ok(r) => r,
        Err(reason) => {
            Fallback::EffectResolutionFallback {
                kind: desc.kind.clone(),
                reason,
            }
            .report();
            ResolvedEffect::None
        }
    }
}

fn try_resolve(desc: &EffectDescriptor, scale: f64) -> Result<ResolvedEffect, String> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("scale {scale} must be finite and > 0"));
    }

    let kind = desc.kind.trim().to_ascii_lowercase();
    let settings = Settings::new(&desc.settings)?;

    match kind.as_str() {
        "none" | "" => Ok(ResolvedEffect::None),
        "shadow" => {
            let [dx, dy] = settings.pair("offset", [5.0, 5.0])?;
            Ok(ResolvedEffect::Shadow(ResolvedShadow {
                offset_x: dx * scale,
                offset_y: dy * scale,
                blur_radius: settings.non_negative("blur", 3.0)? * scale,
                color: settings.color("color", HexColor::BLACK)?,
                opacity: settings.opacity(0.5)?,
            }))
        }
        "outline" => Ok(ResolvedEffect::Outline(ResolvedOutline {
            stroke_width: settings.non_negative("width", 2.0)? * scale,
            color: settings.color("color", HexColor::BLACK)?,
            opacity: settings.opacity(1.0)?,
        })),
        "glow" => Ok(ResolvedEffect::Glow(ResolvedGlow {
            radius: settings.non_negative("radius", 10.0)? * scale,
            color: settings.color("color", HexColor::WHITE)?,
            opacity: settings.opacity(0.7)?,
        })),
        "3d_depth" | "3d-depth" | "depth3d" | "depth_3d" => {
            Ok(ResolvedEffect::Depth3d(ResolvedDepth {
                layer_count: settings.count("layers", 10)?,
                angle_degrees: settings.number("angle", 45.0)?,
                step_distance: settings.number("distance", 2.0)? * scale,
                color_gradient: settings.gradient("color_gradient")?,
            }))
        }
        _ => Err("unknown effect type".to_string()),
    }
}

struct Settings<'a>(Option<&'a serde_json::Map<String, serde_json::Value>>);

impl<'a> Settings<'a> {
    fn new(v: &'a serde_json::Value) -> Result<Self, String> {
        match v {
            serde_json::Value::Null => Ok(Self(None)),
            serde_json::Value::Object(m) => Ok(Self(Some(m))),
            _ => Err("settings must be an object".to_string()),
        }
    }

    fn get(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.0.and_then(|m| m.get(key)).filter(|v| !v.is_null())
    }

    fn number(&self, key: &str, default: f64) -> Result<f64, String> {
        let Some(v) = self.get(key) else {
            return Ok(default);
        };
        let n = v
            .as_f64()
            .ok_or_else(|| format!("setting '{key}' must be a number"))?;
        if !n.is_finite() {
            return Err(format!("setting '{key}' must be finite"));
        }
        Ok(n)
    }

    fn non_negative(&self, key: &str, default: f64) -> Result<f64, String> {
        let n = self.number(key, default)?;
        if n < 0.0 {
            return Err(format!("setting '{key}' must be >= 0"));
        }
        Ok(n)
    }

    fn opacity(&self, default: f64) -> Result<f64, String> {
        Ok(self.number("opacity", default)?.clamp(0.0, 1.0))
    }

    fn count(&self, key: &str, default: u32) -> Result<u32, String> {
        let Some(v) = self.get(key) else {
            return Ok(default);
        };
        let n = v
            .as_u64()
            .ok_or_else(|| format!("setting '{key}' must be a non-negative integer"))?;
        u32::try_from(n).map_err(|_| format!("setting '{key}' is out of range"))
    }

    fn color(&self, key: &str, default: HexColor) -> Result<HexColor, String> {
        match self.get(key) {
            None => Ok(default),
            Some(serde_json::Value::String(s)) => Ok(HexColor::parse(s)),
            Some(_) => Err(format!("setting '{key}' must be a hex string")),
        }
    }

    fn pair(&self, key: &str, default: [f64; 2]) -> Result<[f64; 2], String> {
        let Some(v) = self.get(key) else {
            return Ok(default);
        };
        let arr = v
            .as_array()
            .filter(|a| a.len() >= 2)
            .ok_or_else(|| format!("setting '{key}' must be [x, y]"))?;
        let mut out = [0.0; 2];
        for (slot, v) in out.iter_mut().zip(arr) {
            *slot = v
                .as_f64()
                .and_then(finite)
                .ok_or_else(|| format!("setting '{key}' entries must be finite numbers"))?;
        }
        Ok(out)
    }

    fn gradient(&self, key: &str) -> Result<Vec<HexColor>, String> {
        let Some(v) = self.get(key) else {
            return Ok(["#333333", "#666666", "#999999"]
                .into_iter()
                .map(HexColor::parse)
                .collect());
        };
        let arr = v
            .as_array()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| format!("setting '{key}' must be a non-empty array"))?;
        arr.iter()
            .map(|c| {
                c.as_str()
                    .map(HexColor::parse)
                    .ok_or_else(|| format!("setting '{key}' entries must be hex strings"))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;
