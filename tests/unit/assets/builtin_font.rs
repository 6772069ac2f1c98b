use super::*;

fn lit(face: BuiltinFace, ch: char) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    face.draw_char(ch, 0, 0, &mut |x, y, _| out.push((x, y)));
    out
}

#[test]
fn magnification_tracks_requested_size() {
    assert_eq!(BuiltinFace::for_size(1.0).advance(), 6.0);
    assert_eq!(BuiltinFace::for_size(16.0).advance(), 12.0);
    assert_eq!(BuiltinFace::for_size(100.0).advance(), 78.0);
}

#[test]
fn metrics_scale_with_magnification() {
    let face = BuiltinFace::for_size(24.0);
    assert_eq!(face.ascent(), 21.0);
    assert_eq!(face.descent(), -3.0);
    assert_eq!(face.advance(), 18.0);
}

#[test]
fn space_has_no_ink_and_letters_do() {
    let face = BuiltinFace::for_size(8.0);
    assert!(lit(face, ' ').is_empty());
    let pipe = lit(face, '|');
    assert_eq!(pipe.len(), 7);
    assert!(pipe.iter().all(|&(x, _)| x == 2));
}

#[test]
fn unknown_characters_draw_a_box() {
    let face = BuiltinFace::for_size(8.0);
    let boxed = lit(face, 'あ');
    assert!(boxed.contains(&(0, 0)));
    assert!(boxed.contains(&(4, 6)));
    assert!(!boxed.contains(&(2, 3)));
}

#[test]
fn magnified_pixels_fill_blocks() {
    let face = BuiltinFace::for_size(16.0);
    assert_eq!(lit(face, '|').len(), 7 * 4);
}
