//! Compression outcome metrics.
//!
//! [`describe_savings`] compares a source against its compressed output and
//! yields a [`Savings`]: absolute sizes, the signed byte delta, and the
//! percentage shaved off. Negative savings are a legitimate outcome when
//! re-encoding an already-tight input grows it, so `saved_bytes` is signed
//! and the display says "larger" instead of pretending.

use crate::compress::{CompressedImage, SourceImage};
use serde::Serialize;
use std::fmt;

/// Size delta between a source image and its compressed output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Savings {
    /// Byte size of the source.
    pub original_size: u64,
    /// Byte size of the output.
    pub compressed_size: u64,
    /// `original - compressed`; negative when the output grew.
    pub saved_bytes: i64,
    /// Percentage of the original shaved off; negative when the output grew.
    pub ratio_percent: f64,
}

impl Savings {
    /// Build a [`Savings`] from raw byte counts.
    ///
    /// A zero-byte original reports 0.0 percent rather than dividing by
    /// zero, so aggregated totals stay finite.
    pub fn from_sizes(original_size: u64, compressed_size: u64) -> Self {
        let saved_bytes = original_size as i64 - compressed_size as i64;
        let ratio_percent = if original_size == 0 {
            0.0
        } else {
            saved_bytes as f64 / original_size as f64 * 100.0
        };
        Self {
            original_size,
            compressed_size,
            saved_bytes,
            ratio_percent,
        }
    }

    /// A pass-through: output identical to input, nothing saved.
    pub fn unchanged(size: u64) -> Self {
        Self::from_sizes(size, size)
    }
}

/// Compare a compressed image against its source.
pub fn describe_savings(original: &SourceImage, compressed: &CompressedImage) -> Savings {
    Savings::from_sizes(original.byte_size(), compressed.byte_size())
}

impl fmt::Display for Savings {
    /// Renders as `2.31 MB → 412.8 KB (82.6% smaller)`, flipping to
    /// `(3.2% larger)` when the output grew.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.saved_bytes < 0 { "larger" } else { "smaller" };
        write!(
            f,
            "{} → {} ({:.1}% {})",
            format_file_size(self.original_size),
            format_file_size(self.compressed_size),
            self.ratio_percent.abs(),
            direction
        )
    }
}

/// Format a byte count for humans: base-1024 units up to GB, at most two
/// decimals, trailing zeros trimmed.
///
/// # Examples
/// ```
/// # use upshrink::savings::format_file_size;
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(1048576), "1 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    let exponent = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}
