#![forbid(unsafe_code)]

pub mod assets;
pub mod batch;
pub mod bbox;
pub mod blend;
pub mod compositor;
pub mod config;
pub mod error;
pub mod halo;
pub mod text;

pub use batch::{CancelToken, ResourceBundle, RunResult, SkippedFrame, run};
pub use bbox::{BoundingRect, occupied_area};
pub use blend::Rgba8;
pub use config::{Config, CornerAnchor, FrameSource, Placement};
pub use error::{ThumbError, ThumbResult};
pub use text::{FontPainter, GlyphPainter, TextStyle, render_label};
