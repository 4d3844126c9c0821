//! High-level compression operations.
//!
//! These functions combine the dimension calculations with codec execution.
//! They take a source image and options, compute the output geometry, and
//! run decode → resize → encode, rewriting the filename to match.

use super::calculations::fit_within;
use super::codec::{self, CompressError};
use super::options::CompressionOptions;
use crate::naming;
use image::imageops::FilterType;
use rayon::prelude::*;

/// Result type for compression operations.
pub type Result<T> = std::result::Result<T, CompressError>;

/// An image as handed in by the caller: encoded bytes plus logical identity.
///
/// Compression never mutates a source; it produces a new
/// [`CompressedImage`] and leaves the input untouched.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Logical filename, used to derive the output name.
    pub name: String,
    /// MIME type as supplied by the caller. Informational only; decoding
    /// sniffs the real format from the bytes.
    pub content_type: String,
    /// Encoded image bytes.
    pub data: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Byte size of the encoded input.
    pub fn byte_size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Pixel dimensions read from the image header, without a full decode.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        codec::probe_dimensions(&self.data)
    }
}

/// A re-encoded image produced by [`compress`].
///
/// Carries the same logical identity as its source, with the extension
/// rewritten for the output format.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CompressedImage {
    /// Byte size of the encoded output.
    pub fn byte_size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Compress a single image to fit the configured bounding box.
///
/// Decodes the source, applies the scale-down-only fit (aspect ratio
/// preserved, never upscaled), re-encodes in the requested format, and
/// rewrites the filename extension. Sources already inside the box keep
/// their dimensions and are only re-encoded.
///
/// Failures name the source, so batch callers can report the culprit.
pub fn compress(source: &SourceImage, options: &CompressionOptions) -> Result<CompressedImage> {
    let decoded = codec::decode(&source.data).map_err(|e| e.with_context(&source.name))?;
    let source_dims = (decoded.width(), decoded.height());
    let (width, height) = fit_within(source_dims, (options.max_width, options.max_height));

    let rendered = if (width, height) == source_dims {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Lanczos3)
    };

    let data = codec::encode(&rendered, options.format, options.quality.as_percent())
        .map_err(|e| e.with_context(&source.name))?;

    Ok(CompressedImage {
        name: naming::replace_extension(&source.name, options.format.extension()),
        content_type: options.format.content_type().to_string(),
        data,
        width,
        height,
    })
}

/// Compress a batch of images with shared options.
///
/// All-or-nothing: the first failure fails the whole batch. On success the
/// returned vector corresponds index-for-index to the input slice, whatever
/// order the rayon pool finished in.
pub fn compress_all(
    sources: &[SourceImage],
    options: &CompressionOptions,
) -> Result<Vec<CompressedImage>> {
    sources
        .par_iter()
        .map(|source| compress(source, options))
        .collect()
}
