use super::*;

fn half_scale() -> CoordinateMapper {
    CoordinateMapper::new(
        Some(CanonicalImage::new(1000, 500)),
        Some(DisplayViewport::new(500.0, 250.0)),
    )
}

#[test]
fn maps_layer_into_half_size_viewport() {
    let m = half_scale();
    assert!(m.is_available());
    assert_eq!(m.to_display(Point::new(500.0, 250.0)), Point::new(250.0, 125.0));
    assert_eq!(m.to_canonical(Point::new(100.0, 100.0)), Point::new(200.0, 200.0));
    assert_eq!(m.scale_factor_y(), 0.5);
    assert_eq!(m.size_to_display(120.0), 60.0);
}

#[test]
fn round_trip_within_image_bounds() {
    let m = CoordinateMapper::new(
        Some(CanonicalImage::new(1920, 1080)),
        Some(DisplayViewport::new(731.3, 411.7)),
    );
    for x in (0..=1920).step_by(97) {
        for y in (0..=1080).step_by(53) {
            let p = Point::new(f64::from(x), f64::from(y));
            let back = m.to_canonical(m.to_display(p));
            assert!((back.x - p.x).abs() < 1e-9, "{p:?} -> {back:?}");
            assert!((back.y - p.y).abs() < 1e-9, "{p:?} -> {back:?}");
        }
    }
}

#[test]
fn axes_scale_independently() {
    let m = CoordinateMapper::new(
        Some(CanonicalImage::new(100, 100)),
        Some(DisplayViewport::new(200.0, 50.0)),
    );
    assert_eq!(m.to_display(Point::new(10.0, 10.0)), Point::new(20.0, 5.0));
    assert_eq!(m.scale_factor_y(), 0.5);
    assert_eq!(
        m.display_transform() * Point::new(10.0, 10.0),
        Point::new(20.0, 5.0)
    );
}

#[test]
fn unknown_dimensions_are_identity() {
    let p = Point::new(42.0, 7.5);
    for m in [
        CoordinateMapper::identity(),
        CoordinateMapper::new(Some(CanonicalImage::new(100, 100)), None),
        CoordinateMapper::new(None, Some(DisplayViewport::new(10.0, 10.0))),
        CoordinateMapper::new(
            Some(CanonicalImage::new(0, 100)),
            Some(DisplayViewport::new(10.0, 10.0)),
        ),
    ] {
        assert!(!m.is_available());
        assert_eq!(m.to_display(p), p);
        assert_eq!(m.to_canonical(p), p);
        assert_eq!(m.scale_factor_y(), 1.0);
        assert_eq!(m.display_transform(), Affine::IDENTITY);
    }
}
