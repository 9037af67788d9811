use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};

use crate::{
    blend::{self, Rgba8},
    config::Config,
    error::{ThumbError, ThumbResult},
    halo,
};

/// Fixed rasterisation resolution for the label glyphs. Point sizes are converted
/// to pixels at this DPI, matching the metrics the anchor math is derived from.
pub const RENDER_DPI: f32 = 300.0;

/// Gap kept between the glyph extent and the halo on each side, before the
/// border width is added.
const EDGE_MARGIN: i32 = 2;

const SOFT_RING_ALPHA: u8 = 150;
const SOFTER_RING_ALPHA: u8 = 65;
const SOFTER_RING_THRESHOLD: u8 = 149;

/// Seam between label layout and glyph rasterisation.
///
/// The production implementation wraps a parsed font; tests substitute a stub so
/// the pipeline can run without a font file on disk.
pub trait GlyphPainter {
    /// Draws `text` onto `canvas` with its baseline origin at `anchor`,
    /// source-over blending `color` scaled by glyph coverage.
    fn paint(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        anchor: (i32, i32),
        color: Rgba8,
    ) -> ThumbResult<()>;
}

/// Glyph painter backed by a parsed TrueType/OpenType font.
pub struct FontPainter {
    font: Font<'static>,
    scale: Scale,
}

impl FontPainter {
    pub fn new(font: Font<'static>, font_size_pt: f32) -> Self {
        let px = font_size_pt * RENDER_DPI / 72.0;
        Self {
            font,
            scale: Scale::uniform(px),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>, font_size_pt: f32) -> ThumbResult<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| ThumbError::resource_load("font data did not parse"))?;
        Ok(Self::new(font, font_size_pt))
    }
}

impl GlyphPainter for FontPainter {
    fn paint(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        anchor: (i32, i32),
        color: Rgba8,
    ) -> ThumbResult<()> {
        let (w, h) = canvas.dimensions();
        let origin = point(anchor.0 as f32, anchor.1 as f32);
        for glyph in self.font.layout(text, self.scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= w || py as u32 >= h {
                    return;
                }
                let a = (v * f32::from(color[3])).round() as u8;
                if a == 0 {
                    return;
                }
                let dst = canvas.get_pixel_mut(px as u32, py as u32);
                dst.0 = blend::over(dst.0, [color[0], color[1], color[2], a]);
            });
        }
        Ok(())
    }
}

/// Text-layer parameters, extracted from the run configuration.
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    pub font_size_pt: f32,
    pub text_color: Rgba8,
    pub border_color: Rgba8,
    pub border_width: u32,
    pub border_alpha_threshold: u8,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl From<&Config> for TextStyle {
    fn from(cfg: &Config) -> Self {
        Self {
            font_size_pt: cfg.font_size_pt,
            text_color: cfg.text_color,
            border_color: cfg.border_color,
            border_width: cfg.border_width,
            border_alpha_threshold: cfg.border_alpha_threshold,
            canvas_width: cfg.text_layer_width,
            canvas_height: cfg.text_layer_height,
        }
    }
}

/// Baseline origin for the label draw.
///
/// The vertical coordinate is the point-size extent at [`RENDER_DPI`], pushed
/// down by twice the edge margin plus border width so the halo's outward growth
/// stays inside the canvas.
pub fn baseline_anchor(font_size_pt: f32, border_width: u32) -> (i32, i32) {
    let margin = EDGE_MARGIN + border_width as i32;
    let extent = (font_size_pt * RENDER_DPI / 72.0).ceil() as i32;
    (margin, extent + margin * 2)
}

/// Rasterises `"#<label>"` onto a transparent canvas and builds the halo.
///
/// Pass order: glyphs, hard border ring, glyphs again (the border pass leaves
/// anti-aliased interior edges under-saturated), then the two soft rings that
/// fake anti-aliasing on the outline. The full canvas is returned; cropping to
/// the occupied area is the caller's responsibility.
pub fn render_label(
    painter: &dyn GlyphPainter,
    style: &TextStyle,
    label: &str,
) -> ThumbResult<RgbaImage> {
    if style.canvas_width == 0 || style.canvas_height == 0 {
        return Err(ThumbError::render("text layer canvas has zero size"));
    }

    let mut canvas = RgbaImage::from_pixel(
        style.canvas_width,
        style.canvas_height,
        Rgba([0, 0, 0, 0]),
    );
    let anchor = baseline_anchor(style.font_size_pt, style.border_width);
    let text = format!("#{label}");

    painter.paint(&mut canvas, &text, anchor, style.text_color)?;
    halo::add_border(
        &mut canvas,
        style.border_color,
        style.border_width,
        style.border_alpha_threshold,
    );
    painter.paint(&mut canvas, &text, anchor, style.text_color)?;

    let [r, g, b, _] = style.border_color;
    halo::add_border(
        &mut canvas,
        [r, g, b, SOFT_RING_ALPHA],
        1,
        style.border_alpha_threshold,
    );
    halo::add_border(
        &mut canvas,
        [r, g, b, SOFTER_RING_ALPHA],
        1,
        SOFTER_RING_THRESHOLD,
    );

    Ok(canvas)
}
