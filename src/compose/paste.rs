use image::RgbaImage;

/// Straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Blend `src` into `dst` using `src`'s own alpha as the mask.
///
/// Every channel, alpha included, becomes `(src * m + dst * (255 - m) + 127) / 255` with
/// `m = src.alpha`: opaque sources replace, fully transparent sources leave `dst` untouched.
pub fn blend_masked(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let m = u32::from(src[3]);
    if m == 0 {
        return dst;
    }
    if m == 255 {
        return src;
    }

    let inv = 255 - m;
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = lerp_div255(u32::from(src[i]), u32::from(dst[i]), m, inv);
    }
    out
}

/// Paste `src` onto `dst` with its top-left corner at `(x, y)`, masked by `src`'s alpha.
///
/// Parts of `src` that fall outside `dst` are clipped; negative offsets are allowed.
pub fn paste_masked(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            // In range by construction: 0 <= dx < dw and 0 <= dx - x < sw.
            let s = src.get_pixel((dx - x) as u32, (dy - y) as u32).0;
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            d.0 = blend_masked(d.0, s);
        }
    }
}

// Single rounding step; the weights sum to 255 so the result never exceeds 255.
fn lerp_div255(s: u32, d: u32, m: u32, inv: u32) -> u8 {
    ((s * m + d * inv + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/paste.rs"]
mod tests;
