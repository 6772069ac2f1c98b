use super::*;

#[test]
fn aspect_ratio_rejects_non_positive_values() {
    assert!(AspectRatio::new(0.0).is_err());
    assert!(AspectRatio::new(-1.0).is_err());
    assert!(AspectRatio::new(f32::NAN).is_err());
    assert_eq!(AspectRatio::new(1.5).unwrap().get(), 1.5);
}

#[test]
fn aspect_ratio_is_bounded() {
    assert!(AspectRatio::new(1e7).is_err());
    assert!(AspectRatio::new(4.5).is_err());
    assert!(AspectRatio::new(0.05).is_err());
    assert!(AspectRatio::new(f32::INFINITY).is_err());
    assert_eq!(AspectRatio::new(AspectRatio::MIN).unwrap().get(), 0.1);
    assert_eq!(AspectRatio::new(AspectRatio::MAX).unwrap().get(), 4.0);
    assert!(serde_json::from_str::<AspectRatio>("10000000").is_err());
}

#[test]
fn aspect_ratio_deserialization_is_validated() {
    let ok: AspectRatio = serde_json::from_str("0.8").unwrap();
    assert_eq!(ok.get(), 0.8);
    assert!(serde_json::from_str::<AspectRatio>("0").is_err());
}

#[test]
fn text_layer_defaults_match_banner_layout() {
    let t: TextLayer = serde_json::from_str(r#"{"text":"Sample"}"#).unwrap();
    assert_eq!(t.text, "Sample");
    assert_eq!(t.size, 100);
    assert_eq!(t.position, Position::new(300, 200));
    assert_eq!(t.family, FontFamily::Gothic);
    assert_eq!(t.weight, FontWeight::W7);
    assert_eq!(t.color.0, Rgba8::BLACK);
    assert!(t.enabled);
    assert_eq!(t.icon_list, IconListStyle::default());
    assert_eq!(t.icon_list.row_spacing, 50);
}

#[test]
fn annotation_defaults_sit_bottom_left() {
    let a: AnnotationLayer = serde_json::from_str(r#"{"text":"Note"}"#).unwrap();
    assert_eq!(a.size, 10);
    assert_eq!(a.position, Position::new(10, 390));
    assert!(!a.fixed_product_name);
}

#[test]
fn synthetic_bold_follows_family_and_weight() {
    let mut t = TextLayer::new("x", Position::new(0, 0));
    assert!(!t.synthetic_bold());
    t.family = FontFamily::Serif;
    assert!(t.synthetic_bold());
    t.weight = FontWeight::W6;
    assert!(!t.synthetic_bold());
}

#[test]
fn scaled_text_layer_scales_every_spatial_field() {
    let mut t = TextLayer::new("x", Position::new(301, 199));
    t.char_spacing = 5;
    t.line_spacing = -3;
    t.aspect_ratio = AspectRatio::new(1.5).unwrap();
    let s = t.scaled(0.5);
    assert_eq!(s.size, 50);
    assert_eq!(s.position, Position::new(150, 99));
    assert_eq!(s.char_spacing, 2);
    assert_eq!(s.line_spacing, -1);
    assert_eq!(s.aspect_ratio.get(), 1.5);
    assert_eq!(s.icon_list.size, 20);
    assert_eq!(s.icon_list.baseline_y, 150);
    assert_eq!(s.icon_list.row_spacing, 25);
}

#[test]
fn scaled_sizes_never_reach_zero() {
    let a = AnnotationLayer::new("n", Position::new(10, 10));
    assert_eq!(a.scaled(0.01).size, 1);
}

#[test]
fn single_row_text_strips_line_breaks() {
    let t = TextLayer::new("ab\ncd\r\n", Position::new(0, 0));
    assert_eq!(t.single_row_text(), "abcd");
}

#[test]
fn image_layer_scaled_size_truncates_and_clamps() {
    let src = SourceImage::from_rgba(image::RgbaImage::new(101, 51));
    let layer = ImageLayer::new(src, Position::new(0, 0)).with_scale(0.5);
    assert_eq!(layer.scaled_size(), (50, 25));
    assert_eq!(layer.clone().with_scale(-2.0).scaled_size(), (0, 0));
    assert_eq!(layer.scaled(0.5).scaled_size(), (25, 12));
}

#[test]
fn no_image_layer_has_no_source() {
    let layer = ImageLayer::default();
    assert!(layer.source.is_none());
    assert_eq!(layer.scale, 1.0);
}
