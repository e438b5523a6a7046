use crate::foundation::core::{Affine, CanonicalImage, DisplayViewport, Point, Vec2};
use crate::foundation::error::Fallback;

/// Pure mapping between canonical space and display space.
///
/// Axes scale independently: `display = canonical * (viewport / image)` per axis. A mapper is
/// cheap to build and should be rebuilt from current state whenever it is needed, so a resize
/// is observed by the very next conversion.
///
/// While either the image or the viewport dimensions are unknown (or degenerate) both directions
/// are the identity and [`CoordinateMapper::scale_factor_y`] is `1.0`. Positions rendered in this
/// state are provisional.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CoordinateMapper {
    image: Option<CanonicalImage>,
    viewport: Option<DisplayViewport>,
}

impl CoordinateMapper {
    /// Build a mapper from the current (possibly unknown) dimensions.
    pub fn new(image: Option<CanonicalImage>, viewport: Option<DisplayViewport>) -> Self {
        Self { image, viewport }
    }

    /// Identity mapper, as used before anything has been measured.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Whether both dimension sets are known and usable.
    pub fn is_available(&self) -> bool {
        self.scale().is_some()
    }

    /// Canonical point to display point.
    pub fn to_display(&self, p: Point) -> Point {
        match self.scale_or_report() {
            Some(s) => Point::new(p.x * s.x, p.y * s.y),
            None => p,
        }
    }

    /// Display point to canonical point. Exact inverse of [`CoordinateMapper::to_display`].
    pub fn to_canonical(&self, p: Point) -> Point {
        match self.scale_or_report() {
            Some(s) => Point::new(p.x / s.x, p.y / s.y),
            None => p,
        }
    }

    /// Vertical scale (`viewport.height / image.height`), the reference for font sizes and
    /// effect distances.
    pub fn scale_factor_y(&self) -> f64 {
        self.scale_or_report().map_or(1.0, |s| s.y)
    }

    /// Scale a canonical length (font size, effect distance) into display pixels.
    pub fn size_to_display(&self, v: f64) -> f64 {
        v * self.scale_factor_y()
    }

    /// The canonical -> display transform as an affine, for renderers that consume matrices.
    pub fn display_transform(&self) -> Affine {
        match self.scale() {
            Some(s) => Affine::scale_non_uniform(s.x, s.y),
            None => Affine::IDENTITY,
        }
    }

    fn scale(&self) -> Option<Vec2> {
        let image = self.image?.size()?;
        let viewport = self.viewport?.size()?;
        Some(Vec2::new(
            viewport.width / image.width,
            viewport.height / image.height,
        ))
    }

    fn scale_or_report(&self) -> Option<Vec2> {
        let s = self.scale();
        if s.is_none() {
            Fallback::TransformUnavailable.report();
        }
        s
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/coords.rs"]
mod tests;
