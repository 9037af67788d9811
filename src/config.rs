use std::path::PathBuf;

use crate::{
    blend::Rgba8,
    error::{ThumbError, ThumbResult},
};

/// Where each frame's background comes from.
///
/// Static: one shared background composited behind every sequence number.
/// Dynamic: one distinct source image per frame, named
/// `<source_dir>/<file_prefix><n>.<file_extension>`, with an optional shared
/// title overlay.
#[derive(Clone, Debug)]
pub enum FrameSource {
    Static {
        background: PathBuf,
    },
    Dynamic {
        source_dir: PathBuf,
        file_prefix: String,
        file_extension: String,
        title_overlay: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerAnchor {
    UpperRight,
    LowerRight,
}

/// Placement of the cropped text layer on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Fixed top-left offset, used as-is.
    Manual { x: i64, y: i64 },
    /// Anchored to a canvas corner with a fixed pixel margin.
    Corner(CornerAnchor),
}

/// Immutable per-run configuration.
///
/// Caller contract (not runtime-checked): the text-layer canvas must be at least
/// as large as the rendered label extent plus `2 + border_width` margin on each
/// side, or glyphs are silently clipped.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_name: String,
    pub dest_dir: PathBuf,
    pub font_size_pt: f32,
    pub seq_digits: u32,
    pub seq_start: u32,
    pub seq_end: u32,
    pub text_color: Rgba8,
    pub border_color: Rgba8,
    pub border_width: u32,
    pub border_alpha_threshold: u8,
    pub text_layer_width: u32,
    pub text_layer_height: u32,
    pub target_width: u32,
    pub target_height: u32,
    pub placement: Placement,
    pub source: FrameSource,
    /// Also export the pre-crop text layer per frame for diagnostics.
    pub debug_text_layer: bool,
}

impl Config {
    pub fn validate(&self) -> ThumbResult<()> {
        if self.seq_end == 0 {
            return Err(ThumbError::config("sequence end must be > 0"));
        }
        if self.seq_start > self.seq_end {
            return Err(ThumbError::config(format!(
                "sequence start {} is after end {}",
                self.seq_start, self.seq_end
            )));
        }
        if self.base_name.is_empty() {
            return Err(ThumbError::config("base name must not be empty"));
        }
        if self.text_layer_width == 0 || self.text_layer_height == 0 {
            return Err(ThumbError::config("text layer width/height must be > 0"));
        }
        if self.target_width == 0 || self.target_height == 0 {
            return Err(ThumbError::config("target width/height must be > 0"));
        }
        if self.font_size_pt <= 0.0 {
            return Err(ThumbError::config("font size must be > 0"));
        }
        if let FrameSource::Dynamic { file_extension, .. } = &self.source
            && file_extension.is_empty()
        {
            return Err(ThumbError::config("frame file extension must not be empty"));
        }
        Ok(())
    }

    pub fn is_static(&self) -> bool {
        matches!(self.source, FrameSource::Static { .. })
    }
}
