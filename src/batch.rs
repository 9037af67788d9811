use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::{
    assets,
    compositor::{self, BackgroundDraw, CompositeOpts},
    config::{Config, FrameSource},
    error::{ThumbError, ThumbResult},
    text::{self, GlyphPainter, TextStyle},
};

/// Resources shared across every frame of a run: the glyph painter and, per
/// mode, the static background or the dynamic title overlay. Loaded once and
/// only ever read afterwards.
pub struct ResourceBundle<'a> {
    pub painter: &'a dyn GlyphPainter,
    pub background: Option<RgbaImage>,
    pub title: Option<RgbaImage>,
}

impl std::fmt::Debug for ResourceBundle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceBundle")
            .field("background", &self.background)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl<'a> ResourceBundle<'a> {
    /// Loads the mode's shared rasters. Failures here are always fatal; the
    /// per-frame skip policy only applies to resources loaded inside the loop.
    pub fn prepare(cfg: &Config, painter: &'a dyn GlyphPainter) -> ThumbResult<Self> {
        match &cfg.source {
            FrameSource::Static { background } => Ok(Self {
                painter,
                background: Some(assets::load_raster(background)?),
                title: None,
            }),
            FrameSource::Dynamic { title_overlay, .. } => {
                let title = title_overlay
                    .as_deref()
                    .map(assets::load_raster)
                    .transpose()?;
                Ok(Self {
                    painter,
                    background: None,
                    title,
                })
            }
        }
    }
}

/// One iteration's working state.
pub struct FrameContext<'a> {
    pub number: u32,
    pub label: String,
    pub background: &'a RgbaImage,
    pub title: Option<&'a RgbaImage>,
}

/// Cooperative cancellation, checked at the per-frame loop boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunResult {
    pub frames_written: u64,
    pub skipped: Vec<SkippedFrame>,
    pub cancelled: bool,
}

#[derive(Clone, Debug)]
pub struct SkippedFrame {
    pub number: u32,
    pub reason: String,
}

/// Zero-pads the decimal form of `n` to `digits` characters. A pure no-op when
/// the natural length already meets the width; padding only adds, never
/// truncates, so `len == max(digits, decimal_len(n))`.
pub fn padded_label(n: u32, digits: u32) -> String {
    format!("{n:0width$}", width = digits as usize)
}

/// Iterates the configured sequence range, rendering and exporting one
/// thumbnail per number.
///
/// Failure policy: in static mode the first error of any kind aborts the run.
/// In dynamic mode a failing frame is logged and skipped and the run continues;
/// only up-front problems (invalid config, shared resource load) are fatal.
pub fn run(cfg: &Config, resources: &ResourceBundle<'_>, cancel: &CancelToken) -> ThumbResult<RunResult> {
    cfg.validate()?;
    if cfg.is_static() && resources.background.is_none() {
        return Err(ThumbError::config(
            "static mode requires a shared background raster",
        ));
    }
    debug!(config = ?cfg, "starting run");

    let style = TextStyle::from(cfg);
    let mut result = RunResult::default();

    for number in cfg.seq_start..=cfg.seq_end {
        if cancel.is_cancelled() {
            info!(frame = number, "run cancelled");
            result.cancelled = true;
            break;
        }

        match render_and_export(cfg, resources, &style, number) {
            Ok(()) => result.frames_written += 1,
            Err(err) if cfg.is_static() => return Err(err),
            Err(err) => {
                warn!(frame = number, error = %err, "skipping frame");
                result.skipped.push(SkippedFrame {
                    number,
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        written = result.frames_written,
        skipped = result.skipped.len(),
        "run complete"
    );
    Ok(result)
}

fn render_and_export(
    cfg: &Config,
    resources: &ResourceBundle<'_>,
    style: &TextStyle,
    number: u32,
) -> ThumbResult<()> {
    let label = padded_label(number, cfg.seq_digits);

    let per_frame_background;
    let background: &RgbaImage = match &cfg.source {
        FrameSource::Static { .. } => resources
            .background
            .as_ref()
            .ok_or_else(|| ThumbError::config("static background missing"))?,
        FrameSource::Dynamic {
            source_dir,
            file_prefix,
            file_extension,
            ..
        } => {
            let path = source_dir.join(format!("{file_prefix}{number}.{file_extension}"));
            per_frame_background = assets::load_raster(&path)?;
            &per_frame_background
        }
    };

    let frame = FrameContext {
        number,
        label,
        background,
        title: resources.title.as_ref(),
    };

    let text_layer = text::render_label(resources.painter, style, &frame.label)?;
    if cfg.debug_text_layer {
        let debug_path = cfg.dest_dir.join(format!(
            "thumbnail_{}_{}_debug_textlayer.png",
            cfg.base_name, frame.label
        ));
        assets::save_png(&text_layer, &debug_path)?;
    }

    let opts = CompositeOpts {
        background_draw: if cfg.is_static() {
            BackgroundDraw::Copy
        } else {
            BackgroundDraw::Over
        },
        placement: cfg.placement,
        target_width: cfg.target_width,
        target_height: cfg.target_height,
    };
    let final_raster = compositor::composite(frame.background, frame.title, &text_layer, &opts)?;

    let out_path = cfg
        .dest_dir
        .join(format!("thumbnail_{}_{}.png", cfg.base_name, frame.label));
    assets::save_png(&final_raster, &out_path)?;
    debug!(frame = frame.number, path = %out_path.display(), "wrote thumbnail");
    Ok(())
}
