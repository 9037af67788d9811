use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use thumbseq::{
    CancelToken, Config, CornerAnchor, FontPainter, FrameSource, Placement, ResourceBundle, Rgba8,
    assets,
};

#[derive(Parser, Debug)]
#[command(name = "thumbseq", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate thumbnails over one shared background image.
    Static(StaticArgs),
    /// Generate thumbnails from one source image per frame.
    Dynamic(DynamicArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Base name used in output file names.
    #[arg(long = "base-name")]
    base_name: String,

    /// Output destination directory.
    #[arg(long = "output-dest")]
    dest: PathBuf,

    /// TrueType/OpenType font file for the sequence number.
    #[arg(long = "font-file")]
    font_file: PathBuf,

    /// Font size in points.
    #[arg(long = "font-size", default_value_t = 30.0)]
    font_size: f32,

    /// Sequence number text color (6 character RGB hex code).
    #[arg(long = "font-color", default_value = "000000", value_parser = parse_hex_color)]
    font_color: Rgba8,

    /// Sequence number outline color (6 character RGB hex code).
    #[arg(long = "font-border-color", default_value = "FFFFFF", value_parser = parse_hex_color)]
    border_color: Rgba8,

    /// Sequence number outline thickness in pixels.
    #[arg(long = "font-border-width", default_value_t = 2)]
    border_width: u32,

    /// Alpha value at or below which a pixel counts as empty for the border pass.
    #[arg(long = "font-border-alpha-thresh", default_value_t = 0)]
    border_alpha_thresh: u8,

    /// First sequence number (inclusive).
    #[arg(long = "seq-start", default_value_t = 1)]
    seq_start: u32,

    /// Last sequence number (inclusive).
    #[arg(long = "seq-end", default_value_t = 10)]
    seq_end: u32,

    /// Zero-pad sequence numbers to this many digits.
    #[arg(long = "seq-num-digits", default_value_t = 2)]
    seq_digits: u32,

    /// Fixed X coordinate for the sequence number (requires --seq-num-pos-y).
    #[arg(long = "seq-num-pos-x")]
    pos_x: Option<i64>,

    /// Fixed Y coordinate for the sequence number (requires --seq-num-pos-x).
    #[arg(long = "seq-num-pos-y")]
    pos_y: Option<i64>,

    /// Corner to anchor the sequence number to when no fixed position is given.
    #[arg(long, value_enum, default_value_t = AnchorChoice::LowerRight)]
    anchor: AnchorChoice,

    /// Width of the temporary canvas the text is drawn onto.
    #[arg(long = "text-layer-width", default_value_t = 1920)]
    text_layer_width: u32,

    /// Height of the temporary canvas the text is drawn onto.
    #[arg(long = "text-layer-height", default_value_t = 1080)]
    text_layer_height: u32,

    /// Output width; larger canvases are downscaled to exactly this.
    #[arg(long = "target-width", default_value_t = 1280)]
    target_width: u32,

    /// Output height; larger canvases are downscaled to exactly this.
    #[arg(long = "target-height", default_value_t = 720)]
    target_height: u32,

    /// Debug logging plus per-frame export of the pre-crop text layer.
    #[arg(long)]
    debug: bool,
}

#[derive(Args, Debug)]
struct StaticArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Full path to the shared background image.
    #[arg(long = "bg-image")]
    bg_image: PathBuf,
}

#[derive(Args, Debug)]
struct DynamicArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory holding one source image per sequence number.
    #[arg(long = "source-dir")]
    source_dir: PathBuf,

    /// Source file name prefix; frame N is read from <prefix>N.<ext>.
    #[arg(long = "frame-prefix", default_value = "frame")]
    frame_prefix: String,

    /// Source file name extension.
    #[arg(long = "frame-ext", default_value = "png")]
    frame_ext: String,

    /// Optional title overlay blended over every frame's background.
    #[arg(long = "title-image")]
    title_image: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AnchorChoice {
    UpperRight,
    LowerRight,
}

fn parse_hex_color(s: &str) -> Result<Rgba8, String> {
    if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("'{s}' is not a 6 character RGB hex code"));
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string());
    Ok([channel(0)?, channel(2)?, channel(4)?, 0xFF])
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn placement(common: &CommonArgs) -> anyhow::Result<Placement> {
    match (common.pos_x, common.pos_y) {
        (Some(x), Some(y)) => Ok(Placement::Manual { x, y }),
        (None, None) => Ok(Placement::Corner(match common.anchor {
            AnchorChoice::UpperRight => CornerAnchor::UpperRight,
            AnchorChoice::LowerRight => CornerAnchor::LowerRight,
        })),
        _ => anyhow::bail!("--seq-num-pos-x and --seq-num-pos-y must be given together"),
    }
}

fn build_config(common: &CommonArgs, source: FrameSource) -> anyhow::Result<Config> {
    Ok(Config {
        base_name: common.base_name.clone(),
        dest_dir: common.dest.clone(),
        font_size_pt: common.font_size,
        seq_digits: common.seq_digits,
        seq_start: common.seq_start,
        seq_end: common.seq_end,
        text_color: common.font_color,
        border_color: common.border_color,
        border_width: common.border_width,
        border_alpha_threshold: common.border_alpha_thresh,
        text_layer_width: common.text_layer_width,
        text_layer_height: common.text_layer_height,
        target_width: common.target_width,
        target_height: common.target_height,
        placement: placement(common)?,
        source,
        debug_text_layer: common.debug,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (common, source) = match &cli.cmd {
        Command::Static(args) => (
            &args.common,
            FrameSource::Static {
                background: args.bg_image.clone(),
            },
        ),
        Command::Dynamic(args) => (
            &args.common,
            FrameSource::Dynamic {
                source_dir: args.source_dir.clone(),
                file_prefix: args.frame_prefix.clone(),
                file_extension: args.frame_ext.clone(),
                title_overlay: args.title_image.clone(),
            },
        ),
    };

    init_tracing(common.debug);

    let cfg = build_config(common, source)?;
    cfg.validate()?;

    let font = assets::load_font(&common.font_file)?;
    let painter = FontPainter::new(font, cfg.font_size_pt);
    let resources =
        ResourceBundle::prepare(&cfg, &painter).context("prepare shared resources")?;

    let result = thumbseq::run(&cfg, &resources, &CancelToken::new())?;

    eprintln!(
        "wrote {} thumbnails to {} ({} skipped)",
        result.frames_written,
        cfg.dest_dir.display(),
        result.skipped.len()
    );
    Ok(())
}
