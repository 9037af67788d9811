use image::{Rgba, RgbaImage};

use crate::blend::Rgba8;

/// Paints one outline ring around the occupied silhouette of `img`, in place.
///
/// Every pixel that is empty under `alpha_threshold` (alpha <= threshold) and lies
/// within Chebyshev distance `width` of an occupied pixel is overwritten with
/// `color` — replaced, not blended. Occupancy is snapshotted before painting, so a
/// single call produces a ring of exactly `width` pixels and never cascades.
///
/// Calls compose: repeated invocations with different colors/thresholds build the
/// layered soft halo used by the text-layer renderer.
pub fn add_border(img: &mut RgbaImage, color: Rgba8, width: u32, alpha_threshold: u8) {
    if width == 0 {
        return;
    }
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }

    let occupied: Vec<bool> = img
        .pixels()
        .map(|px| px.0[3] > alpha_threshold)
        .collect();
    let idx = |x: u32, y: u32| (y as usize) * (w as usize) + (x as usize);

    let r = i64::from(width);
    for y in 0..h {
        for x in 0..w {
            if occupied[idx(x, y)] {
                continue;
            }
            if near_occupied(&occupied, w, h, x, y, r) {
                img.put_pixel(x, y, Rgba(color));
            }
        }
    }
}

fn near_occupied(occupied: &[bool], w: u32, h: u32, x: u32, y: u32, r: i64) -> bool {
    let x0 = (i64::from(x) - r).max(0) as u32;
    let y0 = (i64::from(y) - r).max(0) as u32;
    let x1 = (i64::from(x) + r).min(i64::from(w) - 1) as u32;
    let y1 = (i64::from(y) + r).min(i64::from(h) - 1) as u32;
    for ny in y0..=y1 {
        for nx in x0..=x1 {
            if occupied[(ny as usize) * (w as usize) + (nx as usize)] {
                return true;
            }
        }
    }
    false
}
