use image::{Rgba, RgbaImage};

/// Scale an integer pixel quantity, truncating toward zero.
pub(crate) fn scale_px(v: i32, factor: f32) -> i32 {
    (v as f32 * factor) as i32
}

/// Straight-alpha "over" of `src` (weighted by `coverage`) onto `dst`.
pub(crate) fn blend_over(dst: &mut Rgba<u8>, src: [u8; 4], coverage: f32) {
    let sa = (f32::from(src[3]) / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// `true` when `coverage` leaves a mark: its 8-bit alpha rounds to at least 1.
pub(crate) fn coverage_is_visible(coverage: f32) -> bool {
    (coverage.clamp(0.0, 1.0) * 255.0).round() >= 1.0
}

/// Blend one pixel at signed coordinates; out-of-bounds writes are dropped.
pub(crate) fn blend_pixel(surface: &mut RgbaImage, x: i32, y: i32, src: [u8; 4], coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= surface.width() || y as u32 >= surface.height() {
        return;
    }
    blend_over(surface.get_pixel_mut(x as u32, y as u32), src, coverage);
}

/// Paste `src` with its top-left corner at `(x, y)`.
///
/// With `use_alpha` the source alpha acts as the paste mask; otherwise pixels are copied
/// verbatim. Pixels falling outside `dst` are clipped.
pub(crate) fn paste(dst: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32, use_alpha: bool) {
    let (dw, dh) = (dst.width() as i64, dst.height() as i64);
    for (sx, sy, px) in src.enumerate_pixels() {
        let tx = i64::from(x) + i64::from(sx);
        let ty = i64::from(y) + i64::from(sy);
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let out = dst.get_pixel_mut(tx as u32, ty as u32);
        if use_alpha {
            blend_over(out, px.0, 1.0);
        } else {
            *out = *px;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
