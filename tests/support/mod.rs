use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use thumbseq::{Config, CornerAnchor, FrameSource, GlyphPainter, Placement, Rgba8, ThumbResult};

/// Deterministic glyph painter: stamps an opaque 8x4 block at the anchor so the
/// pipeline runs without a font file on disk.
pub struct BlockPainter;

impl GlyphPainter for BlockPainter {
    fn paint(
        &self,
        canvas: &mut RgbaImage,
        _text: &str,
        anchor: (i32, i32),
        color: Rgba8,
    ) -> ThumbResult<()> {
        for dy in 0..4i32 {
            for dx in 0..8i32 {
                let x = anchor.0 + dx;
                let y = anchor.1 - dy;
                if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                    canvas.put_pixel(x as u32, y as u32, Rgba(color));
                }
            }
        }
        Ok(())
    }
}

pub fn write_png(path: &Path, w: u32, h: u32, color: [u8; 4]) {
    RgbaImage::from_pixel(w, h, Rgba(color)).save(path).unwrap();
}

/// A small config with the text layer sized for BlockPainter output.
pub fn test_config(dest_dir: PathBuf, source: FrameSource) -> Config {
    Config {
        base_name: "ep".to_string(),
        dest_dir,
        font_size_pt: 4.0,
        seq_digits: 2,
        seq_start: 1,
        seq_end: 3,
        text_color: [0, 0, 0, 255],
        border_color: [255, 255, 255, 255],
        border_width: 2,
        border_alpha_threshold: 0,
        text_layer_width: 64,
        text_layer_height: 48,
        target_width: 64,
        target_height: 64,
        placement: Placement::Corner(CornerAnchor::LowerRight),
        source,
        debug_text_layer: false,
    }
}
