//! In-memory decode and encode on top of the pure Rust `image` codecs.
//!
//! Everything here works on byte slices, not files; callers own all I/O.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (any supported input) | `image::load_from_memory` (format sniffed from content) |
//! | Header probe | `image::ImageReader::into_dimensions` (no pixel decode) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with quality, RGB8 |
//! | Encode → PNG | `DynamicImage::write_to` (lossless) |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless only), RGBA8 |

use super::options::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use thiserror::Error;

/// Why a compression failed. The two stages that can reject an image are
/// decoding the input and encoding the output; everything in between is
/// infallible pixel math.
#[derive(Error, Debug)]
pub enum CompressError {
    /// Input bytes could not be decoded as an image.
    #[error("decode failed: {0}")]
    Decode(String),
    /// The output encoder rejected the bitmap.
    #[error("encode failed: {0}")]
    Encode(String),
}

impl CompressError {
    /// Prefix the failing image's name onto the message.
    pub(crate) fn with_context(self, name: &str) -> Self {
        match self {
            Self::Decode(msg) => Self::Decode(format!("{name}: {msg}")),
            Self::Encode(msg) => Self::Encode(format!("{name}: {msg}")),
        }
    }
}

/// Decode raw bytes into a bitmap. Format is sniffed from the content, so
/// a mislabeled extension does not matter here.
pub(crate) fn decode(data: &[u8]) -> Result<DynamicImage, CompressError> {
    image::load_from_memory(data).map_err(|e| CompressError::Decode(e.to_string()))
}

/// Read pixel dimensions from the image header without a full decode.
pub(crate) fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), CompressError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CompressError::Decode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| CompressError::Decode(e.to_string()))
}

/// Encode a bitmap in the requested format.
///
/// `quality_percent` applies to JPEG only. PNG is lossless by nature, and
/// the `image` crate's WebP encoder is lossless-only, so both ignore it.
/// JPEG has no alpha channel, so the bitmap is flattened to RGB8 first;
/// WebP keeps alpha via RGBA8.
pub(crate) fn encode(
    img: &DynamicImage,
    format: OutputFormat,
    quality_percent: u8,
) -> Result<Vec<u8>, CompressError> {
    let mut buf = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality_percent);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| CompressError::Encode(format!("JPEG: {e}")))?;
        }
        OutputFormat::Png => {
            img.write_to(&mut buf, ImageFormat::Png)
                .map_err(|e| CompressError::Encode(format!("PNG: {e}")))?;
        }
        OutputFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buf);
            img.to_rgba8()
                .write_with_encoder(encoder)
                .map_err(|e| CompressError::Encode(format!("WebP: {e}")))?;
        }
    }

    let data = buf.into_inner();
    if data.is_empty() {
        return Err(CompressError::Encode(format!(
            "{format} encoder produced no output"
        )));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_bitmap;

    #[test]
    fn encode_jpeg_starts_with_jpeg_magic() {
        let bytes = encode(&test_bitmap(32, 24), OutputFormat::Jpeg, 80).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_png_starts_with_png_magic() {
        let bytes = encode(&test_bitmap(32, 24), OutputFormat::Png, 80).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn encode_webp_is_a_riff_container() {
        let bytes = encode(&test_bitmap(32, 24), OutputFormat::WebP, 80).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn lower_jpeg_quality_yields_smaller_output() {
        let img = test_bitmap(128, 96);
        let high = encode(&img, OutputFormat::Jpeg, 95).unwrap();
        let low = encode(&img, OutputFormat::Jpeg, 10).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn decode_rejects_garbage() {
        let result = decode(b"definitely not an image");
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }

    #[test]
    fn decode_accepts_own_jpeg_output() {
        let bytes = encode(&test_bitmap(40, 30), OutputFormat::Jpeg, 80).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn probe_reads_dimensions_without_decoding() {
        let bytes = encode(&test_bitmap(123, 45), OutputFormat::Png, 80).unwrap();
        assert_eq!(probe_dimensions(&bytes).unwrap(), (123, 45));
    }

    #[test]
    fn probe_rejects_garbage() {
        assert!(probe_dimensions(b"not an image either").is_err());
    }
}
