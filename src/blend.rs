use image::RgbaImage;

/// Straight (non-premultiplied) RGBA8, matching the decoded canvas layout.
pub type Rgba8 = [u8; 4];

/// Source-over blend of one straight-alpha pixel onto another.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let da_inv = u16::from(mul_div255(u16::from(dst[3]), inv));
    let out_a = sa + da_inv;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    out[3] = out_a as u8;
    for i in 0..3 {
        let num = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da_inv);
        out[i] = ((num + u32::from(out_a) / 2) / u32::from(out_a)) as u8;
    }
    out
}

/// Source-over blit of `src` onto `dst` with its top-left corner at (`dx`, `dy`).
/// Regions falling outside `dst` are clipped.
pub fn draw_over(dst: &mut RgbaImage, src: &RgbaImage, dx: i64, dy: i64) {
    blit(dst, src, dx, dy, |d, s| over(d, s));
}

/// Source-copy blit: `src` pixels replace `dst` pixels, alpha included.
pub fn draw_copy(dst: &mut RgbaImage, src: &RgbaImage, dx: i64, dy: i64) {
    blit(dst, src, dx, dy, |_, s| s);
}

fn blit(dst: &mut RgbaImage, src: &RgbaImage, dx: i64, dy: i64, op: impl Fn(Rgba8, Rgba8) -> Rgba8) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for (sx, sy, px) in src.enumerate_pixels() {
        let tx = dx + i64::from(sx);
        let ty = dy + i64::from(sy);
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(tx as u32, ty as u32);
        d.0 = op(d.0, px.0);
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
