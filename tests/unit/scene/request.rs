use super::*;

fn minimal_json() -> &'static str {
    r#"{
        "text_layers": [{ "text": "Sample" }],
        "annotations": [{ "text": "Note" }]
    }"#
}

#[test]
fn minimal_request_takes_defaults() {
    let req = GenerationRequest::from_reader(minimal_json().as_bytes()).unwrap();
    req.validate().unwrap();
    assert_eq!(req.canvas, Canvas::DEFAULT);
    assert_eq!(req.frame_delay, FrameDelay::Millis(100));
    assert_eq!(req.images.len(), 1);
    assert!(req.images[0].source.is_none());
    assert_eq!(req.templates.len(), 1);
    let border = &req.templates[0];
    assert_eq!(border.kind(), TemplateKind::BlinkingBorder);
    assert_eq!(border.frames(), 5);
    assert_eq!(border.loop_count(), 4);
    assert_eq!(
        border.variants(),
        vec![TemplateParams::BlinkingBorder(BlinkingBorder::new(
            13,
            BorderColor::Red
        ))]
    );
}

#[test]
fn template_requests_expand_variants_in_order() {
    let json = r#"{
        "text_layers": [{ "text": "a" }],
        "annotations": [{ "text": "n" }],
        "templates": [
            { "kind": "blinking_border", "width": 8, "colors": ["blue", "purple"] },
            { "kind": "corner_icons", "icons": ["exclamation", "check"], "loop_count": 0 },
            { "kind": "icon_list", "anchor": "nominal", "frames": 3 }
        ],
        "frame_delay": "spread_over_second"
    }"#;
    let req = GenerationRequest::from_reader(json.as_bytes()).unwrap();
    req.validate().unwrap();

    let border = req.templates[0].variants();
    assert_eq!(border.len(), 2);
    assert_eq!(border[0].variant_label(), "blue");
    // Unknown palette names fall back to red.
    assert_eq!(border[1].variant_label(), "red");

    let corners = req.templates[1].variants();
    assert_eq!(corners[0].variant_label(), "exclamation");
    assert_eq!(req.templates[1].loop_count(), 0);

    let list = &req.templates[2];
    assert_eq!(list.frames(), 3);
    assert_eq!(
        list.variants(),
        vec![TemplateParams::IconList(
            IconList::new(IconKind::Check, 60).with_anchor(IconAnchorPolicy::Nominal)
        )]
    );
    assert_eq!(req.frame_delay, FrameDelay::SpreadOverSecond);
}

#[test]
fn empty_enabled_layer_sets_fail_validation() {
    let json = r#"{
        "text_layers": [{ "text": "a", "enabled": false }],
        "annotations": [{ "text": "n" }]
    }"#;
    let req = GenerationRequest::from_reader(json.as_bytes()).unwrap();
    let err = req.validate().unwrap_err();
    assert!(err.to_string().contains("no enabled text layer"), "{err}");

    let json = r#"{ "text_layers": [{ "text": "a" }] }"#;
    let req = GenerationRequest::from_reader(json.as_bytes()).unwrap();
    let err = req.validate().unwrap_err();
    assert!(err.to_string().contains("no enabled annotation layer"), "{err}");
}

#[test]
fn zero_frames_and_empty_variants_fail_validation() {
    let json = r#"{
        "text_layers": [{ "text": "a" }],
        "annotations": [{ "text": "n" }],
        "templates": [{ "kind": "corner_icons", "frames": 0 }]
    }"#;
    let req = GenerationRequest::from_reader(json.as_bytes()).unwrap();
    assert!(matches!(req.validate(), Err(ApngenError::Validation(_))));

    let json = r#"{
        "text_layers": [{ "text": "a" }],
        "annotations": [{ "text": "n" }],
        "templates": [{ "kind": "icon_list", "icons": [] }]
    }"#;
    let req = GenerationRequest::from_reader(json.as_bytes()).unwrap();
    assert!(matches!(req.validate(), Err(ApngenError::Validation(_))));
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = GenerationRequest::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(err.to_string().starts_with("validation error: parse request JSON"));

    let err = GenerationRequest::from_reader(r#"{"canvas":{"width":0,"height":10}}"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, ApngenError::Validation(_)));
}

#[test]
fn image_path_resolves_relative_to_request_file() {
    let dir = std::env::temp_dir().join(format!("apngen-request-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    image::RgbaImage::from_pixel(40, 20, image::Rgba([0, 0, 255, 255]))
        .save(dir.join("photo.png"))
        .unwrap();
    let req_path = dir.join("req.json");
    std::fs::write(
        &req_path,
        r#"{
            "text_layers": [{ "text": "a" }],
            "annotations": [{ "text": "n" }],
            "image": { "path": "photo.png", "scale": 2.0 }
        }"#,
    )
    .unwrap();

    let req = GenerationRequest::from_path(&req_path).unwrap();
    assert_eq!(req.images.len(), 1);
    let image = &req.images[0];
    assert!(image.source.is_some());
    assert_eq!((image.original_width, image.original_height), (40, 20));
    assert_eq!(image.scaled_size(), (80, 40));
    assert_eq!(image.position, Position::new(300, 200));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_image_file_is_a_decode_error() {
    let json = r#"{ "image": { "path": "/definitely/not/here.png" } }"#;
    let err = GenerationRequest::from_reader(json.as_bytes()).unwrap_err();
    assert!(matches!(err, ApngenError::Decode(_)));
}

#[test]
fn template_lookup_falls_back_to_defaults() {
    let req = GenerationRequest::default();
    assert_eq!(
        req.template(TemplateKind::CornerIcons),
        TemplateRequest::CornerIcons(CornerIconsRequest::default())
    );
}

fn request_with(extra: &str) -> GenerationRequest {
    let json = format!(
        r#"{{
            "text_layers": [{{ "text": "Sample", "size": 40 }}],
            "annotations": [{{ "text": "Note" }}]
            {extra}
        }}"#
    );
    GenerationRequest::from_reader(json.as_bytes()).unwrap()
}

fn rejection(req: &GenerationRequest) -> String {
    match req.validate() {
        Err(ApngenError::Validation(msg)) => msg,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn oversized_numbers_are_rejected() {
    let cases = [
        (r#", "canvas": { "width": 3000, "height": 400 }"#, "canvas width"),
        (
            r#", "templates": [{ "kind": "corner_icons", "frames": 50000000 }]"#,
            "frame count",
        ),
        (
            r#", "templates": [{ "kind": "blinking_border", "width": 3000000000 }]"#,
            "border width",
        ),
        (
            r#", "templates": [{ "kind": "icon_list", "size": 0 }]"#,
            "icon size",
        ),
        (r#", "frame_delay": { "millis": 0 }"#, "frame delay"),
        (r#", "frame_delay": { "millis": 70000 }"#, "frame delay"),
    ];
    for (extra, needle) in cases {
        let msg = rejection(&request_with(extra));
        assert!(msg.contains(needle), "{extra}: {msg}");
    }
}

#[test]
fn layer_fields_out_of_range_are_rejected() {
    let base = request_with("");
    base.validate().unwrap();

    let mut req = base.clone();
    req.text_layers[0].size = 3_000_000_000;
    assert!(rejection(&req).contains("font size"));

    let mut req = base.clone();
    req.text_layers[0].char_spacing = i32::MAX;
    assert!(rejection(&req).contains("char spacing"));

    let mut req = base.clone();
    req.text_layers[0].icon_list.row_spacing = -5;
    assert!(rejection(&req).contains("row spacing"));

    let mut req = base.clone();
    req.text_layers[0].icon_list.baseline_y = i32::MIN;
    assert!(rejection(&req).contains("baseline"));

    let mut req = base.clone();
    req.annotations[0].position = Position::new(10, 1_000_000);
    assert!(rejection(&req).contains("annotation 0: position y"));

    let mut req = base.clone();
    req.annotations[0].size = 501;
    assert!(rejection(&req).contains("annotation 0: font size"));
}

#[test]
fn image_scale_and_scaled_size_are_bounded() {
    let bitmap = image::RgbaImage::from_pixel(200, 100, image::Rgba([0, 0, 0, 255]));
    let layer = ImageLayer::new(SourceImage::opaque(bitmap), Position::new(300, 200));

    let mut req = request_with("");
    req.images = vec![layer.clone().with_scale(10.0)];
    req.validate().unwrap();

    req.images = vec![layer.clone().with_scale(11.0)];
    assert!(rejection(&req).contains("scaled size 2200x1100"));

    req.images = vec![layer.clone().with_scale(f32::INFINITY)];
    assert!(rejection(&req).contains("scale"));

    req.images = vec![layer.with_scale(0.0)];
    assert!(rejection(&req).contains("scale"));

    req.images.clear();
    assert!(rejection(&req).contains("image list"));
}

#[test]
fn image_list_and_shorthand_are_exclusive() {
    let json = r#"{
        "image": { "path": "a.png" },
        "images": [{ "path": "b.png" }]
    }"#;
    let err = GenerationRequest::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("not both"), "{err}");
}

#[test]
fn image_variations_load_in_order() {
    let dir = std::env::temp_dir().join(format!("apngen-images-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]))
        .save(dir.join("a.png"))
        .unwrap();
    image::RgbaImage::from_pixel(30, 20, image::Rgba([0, 255, 0, 255]))
        .save(dir.join("b.png"))
        .unwrap();
    let req_path = dir.join("req.json");
    std::fs::write(
        &req_path,
        r#"{
            "canvas": { "width": 200, "height": 100 },
            "text_layers": [{ "text": "a" }],
            "annotations": [{ "text": "n" }],
            "images": [
                { "path": "a.png" },
                { "path": "b.png", "scale": 0.5, "position": { "x": 20, "y": 30 } }
            ]
        }"#,
    )
    .unwrap();

    let req = GenerationRequest::from_path(&req_path).unwrap();
    req.validate().unwrap();
    let sizes: Vec<_> = req.images.iter().map(ImageLayer::scaled_size).collect();
    assert_eq!(sizes, vec![(10, 10), (15, 10)]);
    assert_eq!(req.images[0].position, Position::new(100, 50));
    assert_eq!(req.images[1].position, Position::new(20, 30));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn text_position_defaults_to_request_canvas_centre() {
    let json = r#"{
        "canvas": { "width": 200, "height": 100 },
        "text_layers": [
            { "text": "centred", "size": 20 },
            { "text": "placed", "position": { "x": 7, "y": 9 }, "char_spacing": 3 }
        ],
        "annotations": [{ "text": "n" }]
    }"#;
    let req = GenerationRequest::from_reader(json.as_bytes()).unwrap();
    assert_eq!(req.text_layers[0].position, Position::new(100, 50));
    assert_eq!(req.text_layers[0].size, 20);
    assert_eq!(req.text_layers[1].position, Position::new(7, 9));
    assert_eq!(req.text_layers[1].char_spacing, 3);
}

#[test]
fn variant_layers_select_one_of_each() {
    let json = r#"{
        "text_layers": [{ "text": "a" }, { "text": "b" }, { "text": "off", "enabled": false }],
        "annotations": [{ "text": "n" }]
    }"#;
    let req = GenerationRequest::from_reader(json.as_bytes()).unwrap();

    let layers = req.variant_layers(0, 1, 0).unwrap();
    assert_eq!(layers.texts.len(), 1);
    assert_eq!(layers.texts[0].text, "b");
    assert_eq!(layers.annotations.len(), 1);

    assert!(req.variant_layers(0, 2, 0).unwrap_err().to_string().contains("disabled"));
    assert!(req.variant_layers(0, 3, 0).unwrap_err().to_string().contains("out of range"));
    assert!(req.variant_layers(1, 0, 0).is_err());
    assert!(req.variant_layers(0, 0, 1).is_err());
}
