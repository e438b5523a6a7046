//! Where a layer's text box sits relative to its anchor position, and which layer is under a
//! point.
//!
//! The renderer centres text horizontally on the anchor and vertically on the anchor shifted up
//! by a fixed fraction of the text height. Previews and hit testing must use the same rule or
//! the final composite drifts from what the user placed.

use std::sync::Arc;

use crate::composition::model::{FontName, TextLayer};
use crate::foundation::core::{Point, Rect, Size};

/// Upward shift of the text box, as a fraction of its height.
pub const VERTICAL_ANCHOR_ADJUSTMENT: f64 = 0.375;

/// Measures laid-out text. Units follow `font_size`.
pub trait TextMetrics {
    /// Size of the text's ink box.
    fn measure(&self, text: &str, font: FontName, font_size: f64) -> Size;
}

/// Font-agnostic estimate: fixed advance per character, one `font_size` per line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxMetrics {
    /// Average glyph advance as a fraction of the font size.
    pub advance_ratio: f64,
}

impl Default for ApproxMetrics {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMetrics for ApproxMetrics {
    fn measure(&self, text: &str, _font: FontName, font_size: f64) -> Size {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.lines() {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        Size::new(
            widest as f64 * self.advance_ratio * font_size,
            lines as f64 * font_size,
        )
    }
}

/// Canonical-space box of a layer's text.
pub fn text_bounds(layer: &TextLayer, metrics: &dyn TextMetrics, vertical_adjust: f64) -> Rect {
    let size = metrics.measure(&layer.text, layer.style.font_name, layer.style.font_size);
    let x0 = layer.position.x - size.width / 2.0;
    let y0 = layer.position.y - size.height / 2.0 - size.height * vertical_adjust;
    Rect::new(x0, y0, x0 + size.width, y0 + size.height)
}

/// Topmost layer whose text box contains `p` (canonical space).
pub fn hit_test(
    layers: &[Arc<TextLayer>],
    p: Point,
    metrics: &dyn TextMetrics,
    vertical_adjust: f64,
) -> Option<usize> {
    layers
        .iter()
        .enumerate()
        .rev()
        .find(|(_, l)| {
            let r = text_bounds(l, metrics, vertical_adjust);
            r.area() > 0.0 && r.contains(p)
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchor.rs"]
mod tests;
