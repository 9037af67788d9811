use image::{RgbaImage, imageops};

use crate::{
    bbox::{self, BoundingRect},
    blend,
    config::{CornerAnchor, Placement},
    error::{ThumbError, ThumbResult},
};

/// Pixel margin between an anchored text layer and the canvas corner.
const CORNER_MARGIN: i64 = 25;

/// How the background layer lands on the fresh canvas.
///
/// Static mode copies (the background defines the canvas outright); dynamic mode
/// blends source-over so per-frame sources with alpha still composite cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundDraw {
    Copy,
    Over,
}

#[derive(Clone, Copy, Debug)]
pub struct CompositeOpts {
    pub background_draw: BackgroundDraw,
    pub placement: Placement,
    pub target_width: u32,
    pub target_height: u32,
}

/// Top-left offset for the cropped text layer on a `canvas_w` x `canvas_h` canvas.
pub fn placement_offset(
    placement: Placement,
    canvas_w: u32,
    canvas_h: u32,
    text_w: u32,
    text_h: u32,
) -> (i64, i64) {
    match placement {
        Placement::Manual { x, y } => (x, y),
        Placement::Corner(CornerAnchor::LowerRight) => (
            i64::from(canvas_w) - i64::from(text_w) - CORNER_MARGIN,
            i64::from(canvas_h) - i64::from(text_h) - CORNER_MARGIN,
        ),
        Placement::Corner(CornerAnchor::UpperRight) => (
            i64::from(canvas_w) - i64::from(text_w) - CORNER_MARGIN,
            CORNER_MARGIN,
        ),
    }
}

/// Layers background, optional title overlay and the cropped text layer onto one
/// canvas, then downscales to the target dimensions if the canvas exceeds them.
///
/// The downscale is a direct resize to exactly `target_width` x `target_height`
/// (Catmull-Rom), not an aspect-preserving fit; callers arrange the background
/// aspect ratio.
pub fn composite(
    background: &RgbaImage,
    title: Option<&RgbaImage>,
    text_layer: &RgbaImage,
    opts: &CompositeOpts,
) -> ThumbResult<RgbaImage> {
    let (bw, bh) = background.dimensions();
    if bw == 0 || bh == 0 {
        return Err(ThumbError::render("background raster has zero size"));
    }

    let mut canvas = RgbaImage::new(bw, bh);
    match opts.background_draw {
        BackgroundDraw::Copy => blend::draw_copy(&mut canvas, background, 0, 0),
        BackgroundDraw::Over => blend::draw_over(&mut canvas, background, 0, 0),
    }

    if let Some(title) = title {
        blend::draw_over(&mut canvas, title, 0, 0);
    }

    let rect = bbox::occupied_area(text_layer, 0);
    if !rect.is_empty() {
        let cropped = crop(text_layer, rect);
        let (ox, oy) = placement_offset(opts.placement, bw, bh, rect.width, rect.height);
        blend::draw_over(&mut canvas, &cropped, ox, oy);
    }

    if bw > opts.target_width || bh > opts.target_height {
        canvas = imageops::resize(
            &canvas,
            opts.target_width,
            opts.target_height,
            imageops::FilterType::CatmullRom,
        );
    }

    Ok(canvas)
}

fn crop(img: &RgbaImage, rect: BoundingRect) -> RgbaImage {
    imageops::crop_imm(img, rect.x, rect.y, rect.width, rect.height).to_image()
}
