use crate::composition::model::TextStyle;
use crate::foundation::core::{CanonicalImage, DisplayViewport, Point};
use crate::foundation::error::{EngineError, EngineResult};
use crate::layout::anchor::VERTICAL_ANCHOR_ADJUSTMENT;

/// Editor configuration. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Image dimensions known up front.
    pub image: Option<CanonicalImage>,
    /// Viewport dimensions known up front.
    pub viewport: Option<DisplayViewport>,
    /// Style given to layers added without one.
    pub default_style: TextStyle,
    /// Where new layers go while the image dimensions are unknown.
    pub fallback_position: Point,
    /// Select newly added layers.
    pub select_on_add: bool,
    /// Average glyph advance (fraction of font size) used for hit testing.
    pub advance_ratio: f64,
    /// Upward text box shift (fraction of text height) used for hit testing.
    pub vertical_anchor_adjustment: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            image: None,
            viewport: None,
            default_style: TextStyle::default(),
            fallback_position: Point::new(100.0, 100.0),
            select_on_add: true,
            advance_ratio: 0.6,
            vertical_anchor_adjustment: VERTICAL_ANCHOR_ADJUSTMENT,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(s: &str) -> EngineResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check numeric fields are usable.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(img) = self.image
            && (img.width == 0 || img.height == 0)
        {
            return Err(EngineError::validation("image width/height must be > 0"));
        }
        if let Some(vp) = self.viewport
            && !(positive(vp.width) && positive(vp.height))
        {
            return Err(EngineError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        if !positive(self.default_style.font_size) {
            return Err(EngineError::validation(
                "default_style.font_size must be finite and > 0",
            ));
        }
        if !(self.fallback_position.x.is_finite() && self.fallback_position.y.is_finite()) {
            return Err(EngineError::validation("fallback_position must be finite"));
        }
        if !positive(self.advance_ratio) {
            return Err(EngineError::validation(
                "advance_ratio must be finite and > 0",
            ));
        }
        if !self.vertical_anchor_adjustment.is_finite() {
            return Err(EngineError::validation(
                "vertical_anchor_adjustment must be finite",
            ));
        }
        Ok(())
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/editor/config.rs"]
mod tests;
