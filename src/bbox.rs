use image::RgbaImage;

/// Tight enclosure of the occupied pixels of a raster, in image coordinates.
///
/// `width == 0 || height == 0` is the valid degenerate result for an all-empty
/// raster; callers must not assume a minimum size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    pub const EMPTY: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Scans `img` for the tight bounding box of pixels whose alpha exceeds
/// `alpha_threshold`, expanded by a 1-pixel margin (clamped to the image bounds)
/// so anti-aliased edges are not hard-clipped.
///
/// Four independent early-exit sweeps: top-to-bottom, bottom-to-top,
/// left-to-right, right-to-left.
pub fn occupied_area(img: &RgbaImage, alpha_threshold: u8) -> BoundingRect {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return BoundingRect::EMPTY;
    }

    let row_occupied = |y: u32| (0..w).any(|x| img.get_pixel(x, y).0[3] > alpha_threshold);
    let col_occupied = |x: u32| (0..h).any(|y| img.get_pixel(x, y).0[3] > alpha_threshold);

    let Some(min_y) = (0..h).find(|&y| row_occupied(y)) else {
        return BoundingRect::EMPTY;
    };
    // At least one occupied pixel exists, so the remaining sweeps always hit.
    let max_y = (0..h).rev().find(|&y| row_occupied(y)).unwrap_or(min_y);
    let min_x = (0..w).find(|&x| col_occupied(x)).unwrap_or(0);
    let max_x = (0..w).rev().find(|&x| col_occupied(x)).unwrap_or(min_x);

    let x0 = min_x.saturating_sub(1);
    let y0 = min_y.saturating_sub(1);
    let x1 = (max_x + 1).min(w - 1);
    let y1 = (max_y + 1).min(h - 1);

    BoundingRect {
        x: x0,
        y: y0,
        width: x1 - x0 + 1,
        height: y1 - y0 + 1,
    }
}
