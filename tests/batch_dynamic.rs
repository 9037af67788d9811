mod support;

use std::path::PathBuf;

use support::{BlockPainter, test_config, write_png};
use thumbseq::{CancelToken, FrameSource, ResourceBundle, run};

fn dynamic_source(source_dir: PathBuf, title: Option<PathBuf>) -> FrameSource {
    FrameSource::Dynamic {
        source_dir,
        file_prefix: "frame".to_string(),
        file_extension: "png".to_string(),
        title_overlay: title,
    }
}

#[test]
fn missing_middle_frame_is_skipped_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).unwrap();
    for n in [1u32, 2, 4, 5] {
        write_png(&frames.join(format!("frame{n}.png")), 64, 64, [10, 20, 30, 255]);
    }

    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let mut cfg = test_config(out.clone(), dynamic_source(frames, None));
    cfg.seq_start = 1;
    cfg.seq_end = 5;

    let painter = BlockPainter;
    let resources = ResourceBundle::prepare(&cfg, &painter).unwrap();
    let result = run(&cfg, &resources, &CancelToken::new()).unwrap();

    assert_eq!(result.frames_written, 4);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].number, 3);

    for label in ["01", "02", "04", "05"] {
        assert!(out.join(format!("thumbnail_ep_{label}.png")).exists());
    }
    assert!(!out.join("thumbnail_ep_03.png").exists());
}

#[test]
fn title_overlay_is_blended_over_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).unwrap();
    write_png(&frames.join("frame1.png"), 64, 64, [0, 0, 0, 255]);

    let title_path = dir.path().join("title.png");
    let mut title = image::RgbaImage::from_pixel(64, 64, image::Rgba([0, 0, 0, 0]));
    title.put_pixel(5, 5, image::Rgba([255, 255, 255, 255]));
    title.save(&title_path).unwrap();

    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let mut cfg = test_config(out.clone(), dynamic_source(frames, Some(title_path)));
    cfg.seq_start = 1;
    cfg.seq_end = 1;

    let painter = BlockPainter;
    let resources = ResourceBundle::prepare(&cfg, &painter).unwrap();
    run(&cfg, &resources, &CancelToken::new()).unwrap();

    let img = image::open(out.join("thumbnail_ep_01.png")).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0, 255]);
}

#[test]
fn cancelled_token_stops_before_first_frame() {
    let dir = tempfile::tempdir().unwrap();
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).unwrap();
    write_png(&frames.join("frame1.png"), 16, 16, [0, 0, 0, 255]);

    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let mut cfg = test_config(out.clone(), dynamic_source(frames, None));
    cfg.seq_start = 1;
    cfg.seq_end = 1;

    let cancel = CancelToken::new();
    cancel.cancel();

    let painter = BlockPainter;
    let resources = ResourceBundle::prepare(&cfg, &painter).unwrap();
    let result = run(&cfg, &resources, &cancel).unwrap();

    assert!(result.cancelled);
    assert_eq!(result.frames_written, 0);
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn debug_flag_exports_pre_crop_text_layer() {
    let dir = tempfile::tempdir().unwrap();
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).unwrap();
    write_png(&frames.join("frame1.png"), 64, 64, [10, 20, 30, 255]);

    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let mut cfg = test_config(out.clone(), dynamic_source(frames, None));
    cfg.seq_start = 1;
    cfg.seq_end = 1;
    cfg.debug_text_layer = true;

    let painter = BlockPainter;
    let resources = ResourceBundle::prepare(&cfg, &painter).unwrap();
    run(&cfg, &resources, &CancelToken::new()).unwrap();

    let debug_path = out.join("thumbnail_ep_01_debug_textlayer.png");
    assert!(debug_path.exists());
    // Pre-crop layer keeps the full configured canvas size.
    let img = image::open(&debug_path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 48));
}
