use super::*;

#[test]
fn zero_denominator_means_hundredths() {
    assert_eq!(delay_ms(10, 0), 100);
    assert_eq!(delay_ms(100, 1000), 100);
    assert_eq!(delay_ms(1, 3), 333);
}

#[test]
fn still_png_reports_one_frame() {
    let img = image::RgbaImage::new(5, 7);
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();

    let info = probe_apng(&bytes).unwrap();
    assert_eq!((info.width, info.height), (5, 7));
    assert_eq!(info.frame_count, 1);
    assert!(info.delays_ms.is_empty());
}

#[test]
fn garbage_is_a_decode_error() {
    assert!(matches!(
        probe_apng(b"definitely not a png"),
        Err(ApngenError::Decode(_))
    ));
}
