use super::*;

use crate::assets::color::BorderColor;
use crate::assets::icons::{IconKind, InMemoryIcons};
use crate::foundation::core::Canvas;
use crate::scene::model::ImageLayer;

#[test]
fn kind_parses_labels_and_aliases() {
    for kind in TemplateKind::ALL {
        assert_eq!(kind.label().parse::<TemplateKind>().unwrap(), kind);
    }
    assert_eq!(
        "blinking_border".parse::<TemplateKind>().unwrap(),
        TemplateKind::BlinkingBorder
    );
    assert_eq!("corners".parse::<TemplateKind>().unwrap(), TemplateKind::CornerIcons);
    assert_eq!("list".parse::<TemplateKind>().unwrap(), TemplateKind::IconList);

    let err = "sparkles".parse::<TemplateKind>().unwrap_err();
    assert!(err.to_string().contains("sparkles"), "{err}");
}

#[test]
fn params_report_kind_and_variant() {
    let border = TemplateParams::BlinkingBorder(BlinkingBorder::new(13, BorderColor::Blue));
    assert_eq!(border.kind(), TemplateKind::BlinkingBorder);
    assert_eq!(border.variant_label(), "blue");

    let corners = TemplateParams::CornerIcons(CornerIcons::new(IconKind::Exclamation, 85));
    assert_eq!(corners.kind(), TemplateKind::CornerIcons);
    assert_eq!(corners.variant_label(), "exclamation");

    let list = TemplateParams::IconList(IconList::new(IconKind::Interrobang, 60));
    assert_eq!(list.kind(), TemplateKind::IconList);
    assert_eq!(list.variant_label(), "interrobang");
}

#[test]
fn scaling_params_keeps_variant() {
    let corners = TemplateParams::CornerIcons(CornerIcons::new(IconKind::Check, 85));
    let TemplateParams::CornerIcons(scaled) = corners.scaled(0.5) else {
        panic!("kind changed");
    };
    assert_eq!(scaled.size, 42);
    assert_eq!(scaled.margin, 5);
    assert_eq!(scaled.icon, IconKind::Check);
}

#[test]
fn generate_rejects_zero_frames() {
    let fonts = FontResolver::builtin_only();
    let icons = InMemoryIcons::new();
    let env = RenderEnv::new(&fonts, &icons);
    let image = ImageLayer::none();
    let layers = Layers::new(Canvas::new(20, 10).unwrap(), &image, &[], &[]);
    let params = TemplateParams::BlinkingBorder(BlinkingBorder::default());

    assert!(generate_frames(&env, layers, &params, 0).is_err());
    let frames = generate_frames(&env, layers, &params, 3).unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames.canvas(), Canvas::new(20, 10).unwrap());
}

#[test]
fn blink_alternates_from_frame_zero() {
    let on: Vec<bool> = (0..5).map(blink_on).collect();
    assert_eq!(on, vec![true, false, true, false, true]);
}
