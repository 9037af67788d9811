use std::path::Path;

use image::RgbaImage;
use rusttype::Font;

use crate::error::{ThumbError, ThumbResult};

/// Decodes an image file and normalises it to straight RGBA8.
pub fn load_raster(path: &Path) -> ThumbResult<RgbaImage> {
    let img = image::open(path)
        .map_err(|e| ThumbError::resource_load(format!("decode '{}': {e}", path.display())))?;
    Ok(img.to_rgba8())
}

/// Reads and parses a TrueType/OpenType font file.
pub fn load_font(path: &Path) -> ThumbResult<Font<'static>> {
    let bytes = std::fs::read(path)
        .map_err(|e| ThumbError::resource_load(format!("read font '{}': {e}", path.display())))?;
    Font::try_from_vec(bytes)
        .ok_or_else(|| ThumbError::resource_load(format!("parse font '{}'", path.display())))
}

/// Encodes a raster as PNG at `path`.
pub fn save_png(img: &RgbaImage, path: &Path) -> ThumbResult<()> {
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ThumbError::encode(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn load_raster_missing_file_is_resource_load_error() {
        let err = load_raster(Path::new("/nonexistent/bg.png")).unwrap_err();
        assert!(matches!(err, ThumbError::ResourceLoad(_)));
        assert!(err.to_string().contains("/nonexistent/bg.png"));
    }

    #[test]
    fn load_font_rejects_garbage_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_font.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        assert!(matches!(load_font(&path), Err(ThumbError::ResourceLoad(_))));
    }

    #[test]
    fn save_and_reload_roundtrips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        save_png(&img, &path).unwrap();
        let back = load_raster(&path).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn save_png_into_missing_dir_is_encode_error() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let err = save_png(&img, Path::new("/nonexistent/dir/out.png")).unwrap_err();
        assert!(matches!(err, ThumbError::Encode(_)));
    }
}
