//! Shared test utilities for the marker-mill test suite.
//!
//! Provides the standard project-layout fixture used by conversion tests and
//! small image writers used by imaging tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::{setup_project, write_material};
//!
//! let tmp = TempDir::new().unwrap();
//! let paths = setup_project(tmp.path());
//! write_material(&paths, r#"{"groups": [], "markers": []}"#);
//! ```

use crate::convert::ConvertPaths;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbImage, RgbaImage};
use std::fs;
use std::io::BufWriter;
use std::path::Path;

// =========================================================================
// Project layout fixture
// =========================================================================

/// Create the standard three-root layout under `root` and return the
/// resolved paths.
///
/// ```text
/// <root>/material/           # input root (manifest + source files)
/// <root>/content/            # web root (receives markers.json)
/// <root>/content/markers/    # output root (receives marker directories)
/// ```
pub fn setup_project(root: &Path) -> ConvertPaths {
    fs::create_dir(root.join("material")).unwrap();
    fs::create_dir(root.join("content")).unwrap();
    fs::create_dir(root.join("content/markers")).unwrap();
    ConvertPaths::new(root.join("material"), root.join("content"), "markers")
}

/// Write `material.json` into the project's input root.
pub fn write_material(paths: &ConvertPaths, json: &str) {
    fs::write(paths.manifest_path(), json).unwrap();
}

// =========================================================================
// Image writers
// =========================================================================

/// Write an RGB JPEG test image filled with a diagonal gradient (keeps the
/// encoder honest without blowing up file size).
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let file = fs::File::create(path).unwrap();
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, 90);
    DynamicImage::ImageRgb8(gradient(width, height))
        .write_with_encoder(encoder)
        .unwrap();
}

/// Write an RGB PNG test image.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let file = fs::File::create(path).unwrap();
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new(writer);
    DynamicImage::ImageRgb8(gradient(width, height))
        .write_with_encoder(encoder)
        .unwrap();
}

/// Write an RGBA PNG with a semi-transparent upper half, for tests that
/// exercise alpha flattening.
pub fn create_test_rgba_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if y < height / 2 { 128 } else { 255 };
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 90, alpha])
    });
    let file = fs::File::create(path).unwrap();
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new(writer);
    DynamicImage::ImageRgba8(img)
        .write_with_encoder(encoder)
        .unwrap();
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}
