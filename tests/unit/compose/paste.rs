use super::*;

#[test]
fn transparent_src_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(blend_masked(dst, src), dst);
}

#[test]
fn opaque_src_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(blend_masked(dst, src), src);
}

#[test]
fn half_alpha_blends_every_channel() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 128];
    // red: (255*128 + 127) / 255 = 128; alpha: (128*128 + 255*127 + 127) / 255 = 191.
    assert_eq!(blend_masked(dst, src), [128, 0, 0, 191]);
}

#[test]
fn blend_rounds_once_over_the_weighted_sum() {
    // red: (3*43 + 1*212 + 127) / 255 = 468 / 255 = 1; rounding each term first would give 2.
    assert_eq!(blend_masked([1, 0, 0, 255], [3, 0, 0, 43]), [1, 0, 0, 219]);
}

#[test]
fn blend_matches_weighted_formula_for_partial_alpha() {
    for m in [1u32, 43, 128, 200, 254] {
        for s in (0u32..=255).step_by(17) {
            for d in (0u32..=255).step_by(15) {
                let expected = ((s * m + d * (255 - m) + 127) / 255) as u8;
                let out = blend_masked([d as u8, 0, 0, 255], [s as u8, 0, 0, m as u8]);
                assert_eq!(out[0], expected, "s={s} d={d} m={m}");
            }
        }
    }
}

#[test]
fn paste_clips_negative_offsets() {
    let mut dst = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(3, 3, image::Rgba([255, 255, 255, 255]));
    paste_masked(&mut dst, &src, -2, -2);

    assert_eq!(dst.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(1, 0).0, [0, 0, 0, 255]);
    assert_eq!(dst.get_pixel(0, 1).0, [0, 0, 0, 255]);
}

#[test]
fn paste_clips_past_the_far_edge() {
    let mut dst = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(3, 3, image::Rgba([9, 9, 9, 255]));
    paste_masked(&mut dst, &src, 3, 3);

    assert_eq!(dst.get_pixel(3, 3).0, [9, 9, 9, 255]);
    assert_eq!(dst.get_pixel(2, 3).0, [0, 0, 0, 255]);
}

#[test]
fn paste_fully_outside_is_noop() {
    let mut dst = RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
    let before = dst.clone();
    let src = RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255]));
    paste_masked(&mut dst, &src, 10, -10);
    assert_eq!(dst, before);
}
