use super::*;

use image::Rgba;

use crate::assets::fonts::FontResolver;
use crate::assets::icons::InMemoryIcons;
use crate::foundation::core::{Canvas, Position, Rgba8};
use crate::scene::model::{AspectRatio, ImageLayer, TextLayer};
use crate::template::{TemplateParams, generate_frames};

fn blue_icons() -> InMemoryIcons {
    InMemoryIcons::new().with_icon(
        IconKind::Check,
        RgbaImage::from_pixel(60, 60, Rgba([0, 0, 255, 255])),
    )
}

fn is_blue(p: &Rgba<u8>) -> bool {
    p.0 == [0, 0, 255, 255]
}

fn leftmost_blue(frame: &RgbaImage, y: u32) -> Option<u32> {
    (0..frame.width()).find(|&x| is_blue(frame.get_pixel(x, y)))
}

fn text_layer() -> TextLayer {
    TextLayer::new("Hi", Position::new(300, 200))
}

#[test]
fn rows_end_on_the_baseline() {
    assert_eq!(icon_list_rows(1, 300, 50), vec![300]);
    assert_eq!(icon_list_rows(3, 300, 50), vec![200, 250, 300]);
    assert!(icon_list_rows(0, 300, 50).is_empty());
}

#[test]
fn row_positions_saturate_instead_of_overflowing() {
    assert_eq!(
        icon_list_rows(3, i32::MAX, i32::MAX),
        vec![0, i32::MAX, i32::MAX]
    );
    assert_eq!(icon_list_rows(2, i32::MIN, 10), vec![i32::MIN, i32::MIN + 10]);

    let rows = icon_list_rows(50_000, 300, 50_000);
    assert_eq!(rows.len(), 50_000);
    assert_eq!(rows[0], 300 - i32::MAX);
    assert_eq!(rows[49_999], 300);
    assert!(rows.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn frame_k_shows_k_plus_one_rows() {
    let fonts = FontResolver::builtin_only();
    let icons = blue_icons();
    let env = RenderEnv::new(&fonts, &icons);
    let image = ImageLayer::none();
    let texts = vec![text_layer()];
    let layers = Layers::new(Canvas::DEFAULT, &image, &texts, &[]);
    let params = TemplateParams::IconList(IconList::new(IconKind::Check, 60));

    let frames = generate_frames(&env, layers, &params, 3).unwrap();

    let first = frames.get(0).unwrap();
    assert!(leftmost_blue(first, 300).is_some());
    assert!(leftmost_blue(first, 260).is_none());

    let third = frames.get(2).unwrap();
    for y in [200, 250, 300] {
        assert!(leftmost_blue(third, y).is_some(), "row {y}");
    }
    // The first icon of three spans 170..230.
    assert!(leftmost_blue(third, 160).is_none());

    // The text layer itself is replaced by the rows.
    for y in 180..220 {
        for x in 250..350 {
            assert_eq!(third.get_pixel(x, y).0, Rgba8::WHITE.to_array());
        }
    }
}

#[test]
fn icon_follows_anchor_policy() {
    let fonts = FontResolver::builtin_only();
    let icons = blue_icons();
    let env = RenderEnv::new(&fonts, &icons);
    let image = ImageLayer::none();
    let mut layer = text_layer();
    layer.icon_list.aspect_ratio = AspectRatio::new(2.0).unwrap();
    let texts = vec![layer.clone()];
    let layers = Layers::new(Canvas::DEFAULT, &image, &texts, &[]);

    let style = &layer.icon_list;
    let font = fonts.resolve(layer.family, layer.weight, style.size);
    let paint = TextPaint::new(&font, layer.color.0, layer.synthetic_bold());
    let edge = TextRow::layout(
        "Hi",
        (style.x as f32, style.baseline_y as f32),
        &paint,
        style.spacing(),
        Anchor::LeftMiddle,
    )
    .left_ink_edge()
    .unwrap();

    let measured = TemplateParams::IconList(IconList::new(IconKind::Check, 60));
    let frame = generate_frames(&env, layers, &measured, 1).unwrap().into_frames();
    assert_eq!(leftmost_blue(&frame[0], 300), Some((edge - 5 - 60) as u32));

    let nominal = TemplateParams::IconList(
        IconList::new(IconKind::Check, 60).with_anchor(IconAnchorPolicy::Nominal),
    );
    let frame = generate_frames(&env, layers, &nominal, 1).unwrap().into_frames();
    assert_eq!(leftmost_blue(&frame[0], 300), Some(120 - 5 - 60));
}

#[test]
fn missing_icon_still_draws_rows() {
    let fonts = FontResolver::builtin_only();
    let icons = InMemoryIcons::new();
    let env = RenderEnv::new(&fonts, &icons);
    let image = ImageLayer::none();
    let texts = vec![text_layer()];
    let layers = Layers::new(Canvas::DEFAULT, &image, &texts, &[]);
    let params = TemplateParams::IconList(IconList::default());

    let frame = generate_frames(&env, layers, &params, 1).unwrap().into_frames();
    let inked = (100..200).any(|x| frame[0].get_pixel(x, 300).0 != Rgba8::WHITE.to_array());
    assert!(inked);
    assert!(!(0..600).any(|x| is_blue(frame[0].get_pixel(x, 300))));
}

#[test]
fn preview_shows_fixed_row_count() {
    assert_eq!(IconList::default().preview_frame(), PREVIEW_ROWS - 1);
    let scaled = IconList::default().scaled(0.5);
    assert_eq!(scaled.size, 30);
    assert_eq!(scaled.gap, 2);
}
