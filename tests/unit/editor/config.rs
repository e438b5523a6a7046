use super::*;
use crate::composition::model::FontName;

#[test]
fn empty_json_is_default() {
    let cfg = EditorConfig::from_json("{}").unwrap();
    assert_eq!(cfg, EditorConfig::default());
    assert_eq!(cfg.fallback_position, Point::new(100.0, 100.0));
    assert!(cfg.select_on_add);
    assert_eq!(cfg.default_style.font_size, 120.0);
}

#[test]
fn partial_json_overrides_fields() {
    let cfg = EditorConfig::from_json(
        r##"{
            "image": { "width": 1000, "height": 500 },
            "default_style": { "font_name": "impact", "color": "#ff0" },
            "select_on_add": false
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.image, Some(CanonicalImage::new(1000, 500)));
    assert_eq!(cfg.default_style.font_name, FontName::Impact);
    assert_eq!(cfg.default_style.font_size, 120.0);
    assert!(!cfg.select_on_add);
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        r#"{ "image": { "width": 0, "height": 10 } }"#,
        r#"{ "viewport": { "width": -1.0, "height": 10.0 } }"#,
        r#"{ "default_style": { "font_size": 0 } }"#,
        r#"{ "advance_ratio": 0 }"#,
    ] {
        let err = EditorConfig::from_json(bad).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)), "{bad}: {err}");
    }

    let err = EditorConfig::from_json("{ nope").unwrap_err();
    assert!(matches!(err, EngineError::Serde(_)));
}
