use super::*;

use crate::assets::color::BorderColor;
use crate::assets::decode::SourceImage;
use crate::assets::fonts::FontResolver;
use crate::assets::icons::{IconKind, InMemoryIcons};
use crate::encode::probe::probe_apng;
use crate::foundation::core::{Canvas, Position};
use crate::scene::model::{ImageLayer, TextLayer};
use crate::scene::request::{BorderRequest, CornerIconsRequest, TemplateRequest};

fn request() -> GenerationRequest {
    let mut text = TextLayer::new("Hi", Position::new(30, 20));
    text.size = 16;
    let mut first = AnnotationLayer::new("a", Position::new(2, 35));
    first.size = 8;
    let mut skipped = first.clone();
    skipped.enabled = false;
    let mut fixed = first.clone();
    fixed.fixed_product_name = true;

    GenerationRequest {
        canvas: Canvas::new(60, 40).unwrap(),
        text_layers: vec![text],
        annotations: vec![first, skipped, fixed],
        templates: vec![
            TemplateRequest::BlinkingBorder(BorderRequest {
                width: 2,
                colors: vec![BorderColor::Red, BorderColor::Blue],
                frames: 3,
                loop_count: 4,
            }),
            TemplateRequest::CornerIcons(CornerIconsRequest {
                size: 8,
                icons: vec![IconKind::Check],
                frames: 2,
                loop_count: 0,
            }),
        ],
        ..GenerationRequest::default()
    }
}

fn icons() -> InMemoryIcons {
    InMemoryIcons::new().with_icon(
        IconKind::Check,
        image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 255, 255])),
    )
}

fn green_image() -> ImageLayer {
    let bitmap = image::RgbaImage::from_pixel(60, 40, image::Rgba([0, 200, 0, 255]));
    ImageLayer::new(SourceImage::opaque(bitmap), Position::new(30, 20))
}

#[test]
fn batch_order_and_names_restart_per_annotation() {
    let fonts = FontResolver::builtin_only();
    let icons = icons();
    let env = RenderEnv::new(&fonts, &icons);

    let mut req = request();
    let mut second = TextLayer::new("Yo", Position::new(30, 20));
    second.size = 16;
    req.text_layers.push(second);
    req.images = vec![ImageLayer::none(), green_image()];

    let out = generate_batch(&req, &env, &BatchOpts::default()).unwrap();
    let summary: Vec<(usize, usize, usize, &str, &str, bool)> = out
        .iter()
        .map(|v| {
            (
                v.annotation_index,
                v.text_index,
                v.image_index,
                v.name_fragment.as_str(),
                v.variant,
                v.fixed_product_name,
            )
        })
        .collect();

    // Annotation, then text, then image, then template variant.
    let mut expected = Vec::new();
    for (annotation, fixed) in [(0, false), (2, true)] {
        let mut border = 0;
        let mut corner = 0;
        for text in 0..2 {
            for image in 0..2 {
                for color in ["red", "blue"] {
                    border += 1;
                    let name = format!("border_{border:02}");
                    expected.push((annotation, text, image, name, color, fixed));
                }
                corner += 1;
                expected.push((
                    annotation,
                    text,
                    image,
                    format!("corner_icons_{corner:02}"),
                    "check",
                    fixed,
                ));
            }
        }
    }
    let expected: Vec<(usize, usize, usize, &str, &str, bool)> = expected
        .iter()
        .map(|(a, t, i, n, v, f)| (*a, *t, *i, n.as_str(), *v, *f))
        .collect();
    assert_eq!(summary, expected);
    assert_eq!(out.len(), 24);
    assert_eq!(out[11].name_fragment, "corner_icons_04");

    let border = probe_apng(&out[0].bytes).unwrap();
    assert_eq!((border.width, border.height), (60, 40));
    assert_eq!(border.frame_count, 3);
    assert_eq!(border.loop_count, 4);

    let corners = probe_apng(&out[2].bytes).unwrap();
    assert_eq!(corners.frame_count, 2);
    assert_eq!(corners.loop_count, 0);
}

#[test]
fn each_image_variation_is_drawn_in_its_own_outputs() {
    let fonts = FontResolver::builtin_only();
    let icons = icons();
    let env = RenderEnv::new(&fonts, &icons);
    let mut req = request();
    req.images = vec![ImageLayer::none(), green_image()];

    let out = generate_batch(&req, &env, &BatchOpts::default()).unwrap();
    let plain = image::load_from_memory(&out[0].bytes).unwrap().to_rgba8();
    let with_image = image::load_from_memory(&out[3].bytes).unwrap().to_rgba8();
    assert_eq!((out[0].image_index, out[3].image_index), (0, 1));
    assert_eq!(out[0].variant, out[3].variant);
    // Between the border band and the text.
    assert_eq!(plain.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(with_image.get_pixel(5, 5).0, [0, 200, 0, 255]);
}

#[test]
fn empty_image_list_is_rejected() {
    let fonts = FontResolver::builtin_only();
    let icons = icons();
    let env = RenderEnv::new(&fonts, &icons);
    let mut req = request();
    req.images.clear();
    let err = generate_batch(&req, &env, &BatchOpts::default()).unwrap_err();
    assert!(err.to_string().contains("image list"), "{err}");
}

#[test]
fn parallel_batch_matches_sequential() {
    let fonts = FontResolver::builtin_only();
    let icons = icons();
    let env = RenderEnv::new(&fonts, &icons);
    let req = request();

    let sequential = generate_batch(&req, &env, &BatchOpts::default()).unwrap();
    let parallel = generate_batch(
        &req,
        &env,
        &BatchOpts {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(sequential.len(), parallel.len());
    for (a, b) in sequential.iter().zip(&parallel) {
        assert_eq!(a.name_fragment, b.name_fragment);
        assert_eq!(a.annotation_index, b.annotation_index);
        assert_eq!(a.bytes, b.bytes);
    }
}

#[test]
fn zero_threads_is_rejected() {
    let fonts = FontResolver::builtin_only();
    let icons = icons();
    let env = RenderEnv::new(&fonts, &icons);
    let opts = BatchOpts {
        parallel: true,
        threads: Some(0),
    };
    let err = generate_batch(&request(), &env, &opts).unwrap_err();
    assert!(err.to_string().contains("threads"), "{err}");
}

#[test]
fn invalid_request_fails_before_rendering() {
    let fonts = FontResolver::builtin_only();
    let icons = icons();
    let env = RenderEnv::new(&fonts, &icons);
    let mut req = request();
    req.text_layers.clear();
    assert!(generate_batch(&req, &env, &BatchOpts::default()).is_err());
}
