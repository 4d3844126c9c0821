//! End-to-end tests driving the public pipeline: discover, compress, write.
//!
//! Everything here goes through the crate's public API the way `main` does,
//! with fixture trees built in temp directories. Fixture images are small so
//! Lanczos3 resampling stays fast in debug builds.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use upshrink::compress::{CompressionOptions, OutputFormat};
use upshrink::process::{self, FailurePolicy, ProcessConfig};
use upshrink::scan;

fn bitmap(width: u32, height: u32) -> image::DynamicImage {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    image::DynamicImage::ImageRgb8(img)
}

/// Write a PNG fixture, creating parent directories as needed.
fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    bitmap(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn small_bounds(format: OutputFormat) -> CompressionOptions {
    CompressionOptions {
        max_width: 150,
        max_height: 100,
        format,
        ..CompressionOptions::default()
    }
}

#[test]
fn compresses_a_directory_tree_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("photos");
    let output = tmp.path().join("compressed");
    write_png(&input.join("dawn.png"), 300, 200);
    write_png(&input.join("trips/rome.png"), 240, 160);
    fs::write(input.join("notes.txt"), "not an image").unwrap();

    let files = scan::discover(&[input.clone()]).unwrap();
    assert_eq!(files.len(), 2, "notes.txt must not be scanned");

    let config = ProcessConfig {
        options: small_bounds(OutputFormat::Jpeg),
        policy: FailurePolicy::Strict,
    };
    let summary = process::process(&files, &output, &config).unwrap();

    // Outputs mirror the input layout with the extension renamed.
    let dawn = output.join("dawn.jpg");
    let rome = output.join("trips/rome.jpg");
    assert!(dawn.exists());
    assert!(rome.exists());
    assert!(!output.join("notes.txt").exists());
    assert!(!output.join("notes.jpg").exists());

    // Both land exactly on the bounding box: 300x200 and 240x160 share the
    // 3:2 shape that (150, 100) cuts off at.
    assert_eq!(image::image_dimensions(&dawn).unwrap(), (150, 100));
    assert_eq!(image::image_dimensions(&rome).unwrap(), (150, 100));
    let magic = fs::read(&dawn).unwrap();
    assert_eq!(&magic[..2], &[0xFF, 0xD8], "output must be JPEG");

    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(summary.passed_through, 0);
    assert_eq!(summary.outcomes[0].source_dimensions, Some((300, 200)));
    assert_eq!(summary.outcomes[0].output_dimensions, Some((150, 100)));

    let input_bytes = fs::metadata(input.join("dawn.png")).unwrap().len()
        + fs::metadata(input.join("trips/rome.png")).unwrap().len();
    assert_eq!(summary.totals.original_size, input_bytes);
    let output_bytes = fs::metadata(&dawn).unwrap().len() + fs::metadata(&rome).unwrap().len();
    assert_eq!(summary.totals.compressed_size, output_bytes);
}

#[test]
fn strict_run_with_a_bad_file_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("photos");
    let output = tmp.path().join("compressed");
    write_png(&input.join("good.png"), 64, 64);
    fs::write(input.join("zz-broken.jpg"), b"definitely not a jpeg").unwrap();

    let files = scan::discover(&[input]).unwrap();
    let config = ProcessConfig {
        options: small_bounds(OutputFormat::Jpeg),
        policy: FailurePolicy::Strict,
    };

    let err = process::process(&files, &output, &config).unwrap_err();
    assert!(err.to_string().contains("zz-broken.jpg"));
    assert!(!output.exists(), "strict failure must leave no output behind");
}

#[test]
fn keep_failed_run_passes_originals_through() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("photos");
    let output = tmp.path().join("compressed");
    write_png(&input.join("good.png"), 64, 64);
    let junk = b"definitely not a jpeg".to_vec();
    fs::write(input.join("broken.jpg"), &junk).unwrap();

    let files = scan::discover(&[input]).unwrap();
    let config = ProcessConfig {
        options: small_bounds(OutputFormat::Jpeg),
        policy: FailurePolicy::KeepFailed,
    };
    let summary = process::process(&files, &output, &config).unwrap();

    assert_eq!(summary.passed_through, 1);
    assert_eq!(fs::read(output.join("broken.jpg")).unwrap(), junk);
    assert!(output.join("good.jpg").exists());

    let broken = summary
        .outcomes
        .iter()
        .find(|o| o.passed_through)
        .unwrap();
    assert_eq!(broken.savings.saved_bytes, 0);
}

#[test]
fn webp_output_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("photos");
    let output = tmp.path().join("compressed");
    write_png(&input.join("dawn.png"), 120, 90);

    let files = scan::discover(&[input]).unwrap();
    let config = ProcessConfig {
        options: small_bounds(OutputFormat::WebP),
        policy: FailurePolicy::Strict,
    };
    process::process(&files, &output, &config).unwrap();

    let bytes = fs::read(output.join("dawn.webp")).unwrap();
    assert_eq!(&bytes[..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WEBP");
}

#[test]
fn plan_reports_without_writing() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("photos");
    let output = tmp.path().join("compressed");
    write_png(&input.join("big.png"), 400, 300);

    let files = scan::discover(&[input]).unwrap();
    let planned = process::plan(&files, &small_bounds(OutputFormat::Jpeg)).unwrap();

    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0].source_dimensions, Some((400, 300)));
    assert_eq!(planned[0].planned_dimensions, Some((133, 100)));
    assert_eq!(planned[0].output_name, "big.jpg");
    assert!(!output.exists(), "planning must not create the output directory");
}
