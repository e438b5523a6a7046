use super::*;
use serde_json::json;

#[test]
fn missing_style_fields_take_defaults() {
    let style: TextStyle = serde_json::from_value(json!({})).unwrap();
    assert_eq!(style, TextStyle::default());
    assert_eq!(style.font_size, 120.0);
    assert_eq!(style.color, HexColor::WHITE);
    assert_eq!(style.font_name, FontName::Anton);
    assert_eq!(style.effect.kind, "none");
}

#[test]
fn font_names_parse_case_insensitively_and_fall_back() {
    assert_eq!(FontName::from_wire("Impact"), Some(FontName::Impact));
    assert_eq!(FontName::from_wire("arial_bold"), Some(FontName::ArialBold));
    assert_eq!(FontName::from_wire("comic sans"), None);

    let f: FontName = serde_json::from_value(json!("Comic Sans")).unwrap();
    assert_eq!(f, FontName::Anton);
    assert_eq!(serde_json::to_value(FontName::SixCaps).unwrap(), json!("sixcaps"));
}

#[test]
fn wire_layer_has_renderer_shape() {
    let layer = TextLayer {
        id: LayerId(3),
        text: "HELLO".to_string(),
        position: Point::new(500.4, 249.6),
        style: TextStyle {
            font_size: 119.6,
            effect: EffectDescriptor::outline(2.0, HexColor::BLACK, 1.0),
            ..TextStyle::default()
        },
    };
    let v = serde_json::to_value(layer.to_wire()).unwrap();
    assert_eq!(
        v,
        json!({
            "text": "HELLO",
            "position": { "x": 500, "y": 250 },
            "style": {
                "font_size": 120,
                "color": "#FFFFFF",
                "font_name": "anton",
                "effects": {
                    "type": "outline",
                    "settings": { "width": 2.0, "color": "#000000", "opacity": 1.0 }
                }
            }
        })
    );
}

#[test]
fn effect_descriptor_decodes_leniently() {
    let d: EffectDescriptor =
        serde_json::from_value(json!({ "type": "glow", "settings": { "radius": 4 } })).unwrap();
    assert_eq!(d.kind, "glow");
    assert_eq!(d.settings, json!({ "radius": 4 }));

    let d: EffectDescriptor = serde_json::from_value(json!({ "type": "glow" })).unwrap();
    assert_eq!(d.settings, json!({}));

    let d: EffectDescriptor =
        serde_json::from_value(json!({ "shadow": { "offset": [1, 2] } })).unwrap();
    assert_eq!(d.kind, "shadow");

    let d: EffectDescriptor = serde_json::from_value(json!(null)).unwrap();
    assert_eq!(d, EffectDescriptor::none());

    let d: EffectDescriptor = serde_json::from_value(json!({ "type": 7 })).unwrap();
    assert_eq!(d.kind, "7");
}

#[test]
fn depth_builder_orders_gradient_nearest_first() {
    let d = EffectDescriptor::depth3d(
        4,
        30.0,
        1.5,
        &[HexColor::parse("#111"), HexColor::parse("#222")],
    );
    assert_eq!(d.kind, "3d_depth");
    assert_eq!(d.settings["color_gradient"], json!(["#111111", "#222222"]));
    assert_eq!(d.settings["layers"], json!(4));
}

#[test]
fn fractional_font_size_survives_style_round_trip() {
    let style = TextStyle {
        font_size: 72.5,
        ..TextStyle::default()
    };
    let v = serde_json::to_value(&style).unwrap();
    assert_eq!(v["font_size"], json!(72.5));
    let back: TextStyle = serde_json::from_value(v).unwrap();
    assert_eq!(back, style);
}
