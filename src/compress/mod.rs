//! Image compression — decode, scale-down-only resize, re-encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory` |
//! | **Fit** | [`fit_within`] (pure math, never upscales) |
//! | **Resize** | `DynamicImage::resize_exact` (Lanczos3) |
//! | **Encode** | `image` codecs: JPEG at quality, PNG, lossless WebP |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Options**: Data structures describing a compression pass
//! - **Codec**: Byte-level decode and encode
//! - **Compressor**: High-level [`compress`] / [`compress_all`] operations

mod calculations;
mod codec;
mod compressor;
mod options;

pub use calculations::fit_within;
pub use codec::CompressError;
pub use compressor::{CompressedImage, Result, SourceImage, compress, compress_all};
pub use options::{CompressionOptions, OutputFormat, Quality};
