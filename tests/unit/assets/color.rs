use super::*;
use serde_json::json;

fn full_palette_json() -> serde_json::Value {
    json!({
        "A1": "#ff0000",
        "A2": "#ff8000",
        "B1": "blue",
        "B2": [0.0, 0.5, 1.0],
        "S": {"r": 1.0, "g": 1.0, "b": 0.0},
        "SS": {"h": 300.0, "s": 1.0, "l": 0.5},
        "SSs": "#80008080"
    })
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!(ColorDef::parse("White").unwrap().to_rgba8(), [255, 255, 255, 255]);
    assert_eq!(ColorDef::parse("black").unwrap().to_rgba8(), [0, 0, 0, 255]);
    assert!(matches!(
        ColorDef::parse("not-a-color"),
        Err(HuntmapError::Config(_))
    ));
    assert!(ColorDef::parse("#12345").is_err());
}

#[test]
fn parses_full_css_color_vocabulary() {
    assert_eq!(ColorDef::parse("darkred").unwrap().to_rgba8(), [139, 0, 0, 255]);
    assert_eq!(ColorDef::parse("orchid").unwrap().to_rgba8(), [218, 112, 214, 255]);
    assert_eq!(ColorDef::parse("DarkOrange").unwrap().to_rgba8(), [255, 140, 0, 255]);
    assert_eq!(ColorDef::parse("rgb(255, 0, 0)").unwrap().to_rgba8(), [255, 0, 0, 255]);
    assert_eq!(ColorDef::parse("hsl(240, 100%, 50%)").unwrap().to_rgba8(), [0, 0, 255, 255]);

    let c: ColorDef = serde_json::from_value(json!("rgba(0, 128, 0, 0.5)")).unwrap();
    assert_eq!(c.to_rgba8(), [0, 128, 0, 128]);
}

#[test]
fn parses_hsla_object() {
    let c: ColorDef = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert!((c.r - 1.0).abs() < 1e-9);
    assert!((c.g - 0.0).abs() < 1e-9);
    assert!((c.b - 0.0).abs() < 1e-9);
}

#[test]
fn premul_conversion_scales_channels() {
    let c = ColorDef::rgba(1.0, 0.5, 0.0, 0.5).to_rgba8_premul();
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.g, 64);
    assert_eq!(c.b, 0);
}

#[test]
fn palette_requires_every_rank() {
    let p: Palette = serde_json::from_value(full_palette_json()).unwrap();
    assert_eq!(p.color(RankLabel::A1), ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let mut partial = full_palette_json();
    partial.as_object_mut().unwrap().remove("SSs");
    let err = serde_json::from_value::<Palette>(partial).unwrap_err();
    assert!(err.to_string().contains("SSs"));
}

#[test]
fn palette_rejects_unknown_rank_keys() {
    let mut extra = full_palette_json();
    extra["A3"] = json!("#ffffff");
    assert!(serde_json::from_value::<Palette>(extra).is_err());
}
