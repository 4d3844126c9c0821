//! Parameter types for compression operations.
//!
//! These structs describe *what* to produce, not *how* to produce it. They
//! are the interface between callers (CLI flags, config files, library
//! users) and the [`compressor`](super::compressor), which does the actual
//! pixel work.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality as a 0.0–1.0 factor (default 0.8). Clamped on construction.
//! - [`OutputFormat`] — Target encoding: JPEG, PNG, or WebP. Owns the extension and MIME mappings.
//! - [`CompressionOptions`] — Everything one compression needs: bounding box, quality, format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quality setting for lossy image encoding, as a 0.0–1.0 factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

impl Quality {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Encoder-facing percentage. A factor of 0.0 maps to 1, not 0, since
    /// encoders treat quality as a 1–100 scale.
    pub(crate) fn as_percent(self) -> u8 {
        ((self.0 * 100.0).round() as u8).clamp(1, 100)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.8)
    }
}

/// Target encoding for compressed output.
///
/// Serialized form (config files, reports) is the lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Canonical file extension. JPEG output gets the short `.jpg` form.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    /// MIME type of the encoded bytes.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            other => Err(format!(
                "unknown output format '{other}' (expected jpeg, png, or webp)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
        };
        f.write_str(name)
    }
}

/// Everything a compression pass needs to know.
///
/// Outputs fit within `max_width` x `max_height` with aspect ratio
/// preserved; images already inside the box keep their dimensions and are
/// only re-encoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// Applies to JPEG. PNG is lossless, and WebP output is written by a
    /// lossless encoder, so both ignore it.
    pub quality: Quality,
    pub format: OutputFormat,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            quality: Quality::default(),
            format: OutputFormat::Jpeg,
        }
    }
}
