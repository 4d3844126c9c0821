//! Shared test utilities for the upshrink test suite.
//!
//! Provides synthetic bitmaps and encoded in-memory fixtures so tests never
//! depend on binary image files checked into the repository.

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

use crate::compress::SourceImage;

// =========================================================================
// Synthetic bitmaps
// =========================================================================

/// A gradient bitmap of the given size.
///
/// The gradient gives encoders real content to chew on; a flat color
/// compresses so well that size accounting tests stop meaning anything.
pub fn test_bitmap(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    DynamicImage::ImageRgb8(img)
}

// =========================================================================
// Encoded fixtures
// =========================================================================

/// JPEG-encoded gradient bitmap.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    test_bitmap(width, height)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .unwrap();
    buf
}

/// PNG-encoded gradient bitmap.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    test_bitmap(width, height)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

// =========================================================================
// In-memory sources
// =========================================================================

/// A JPEG [`SourceImage`] with the given name and dimensions.
pub fn jpeg_source(name: &str, width: u32, height: u32) -> SourceImage {
    SourceImage::new(name, "image/jpeg", jpeg_bytes(width, height))
}

/// A PNG [`SourceImage`] with the given name and dimensions.
pub fn png_source(name: &str, width: u32, height: u32) -> SourceImage {
    SourceImage::new(name, "image/png", png_bytes(width, height))
}
