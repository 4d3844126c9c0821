//! # Upshrink
//!
//! A scale-down image compressor that trims upload payloads. Images are
//! resized to fit inside a bounding box (never enlarged), re-encoded in the
//! target format, and renamed to match it. Directories are scanned
//! recursively and their layout is mirrored under the output directory.
//!
//! # Architecture: Scan, Compress, Write
//!
//! A run moves through three steps, each a function you can call on its own:
//!
//! ```text
//! 1. Scan      paths        →  ScannedFile list    (filesystem → work list)
//! 2. Compress  image bytes  →  CompressedImage     (in-memory, parallel)
//! 3. Write     compressed   →  output directory    (mirrors input layout)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Safety**: every source is read and compressed before anything is
//!   written, so a failed batch leaves the output directory untouched.
//! - **Testability**: compression is a pure function from bytes to bytes.
//!   Unit tests exercise resize and encode logic without touching the
//!   filesystem.
//! - **Parallelism**: independent in-memory jobs spread across a rayon
//!   worker pool; only the final writes are sequential.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks input paths, filters to supported image files, produces the work list |
//! | [`compress`] | The core pipeline: fit dimensions, resize, re-encode, rename |
//! | [`process`] | Batch orchestration — reading, parallel compression, output writing, totals |
//! | [`config`] | `upshrink.toml` loading, validation, and the documented stock config |
//! | [`naming`] | Supported extensions, MIME lookup, output filename derivation |
//! | [`savings`] | Byte accounting: per-file and batch size deltas, human-readable sizes |
//! | [`output`] | CLI output formatting — entity display of per-file outcomes |
//!
//! # Design Decisions
//!
//! ## Scale Down, Never Up
//!
//! [`compress::fit_within`] only ever shrinks. An image already inside the
//! bounding box keeps its dimensions, and an upscale can never be produced
//! by rounding. Enlarging adds bytes and invents pixels; a compressor has no
//! business doing either.
//!
//! ## Whole Batch In Memory
//!
//! Sources and results are byte buffers ([`compress::SourceImage`],
//! [`compress::CompressedImage`]), not paths. Uploads in the tens of
//! megabytes fit comfortably in memory, and keeping compression free of I/O
//! is what makes the strict failure policy possible: under
//! [`process::FailurePolicy::Strict`] a single bad file aborts the batch
//! before any output exists.
//!
//! ## Pure-Rust Codecs (No ImageMagick, No libvips)
//!
//! Decoding and encoding use the `image` crate (Lanczos3 resampling) end to
//! end. This eliminates system dependencies entirely: no `apt install`, no
//! Homebrew, no version conflicts. The binary is fully self-contained and
//! behaves identically on every machine.
//!
//! ## Output Mirrors Input
//!
//! A scanned directory's relative structure is reproduced under the output
//! directory, with only the file extension changed:
//!
//! ```text
//! photos/trips/rome.tiff  →  compressed/trips/rome.jpg
//! ```
//!
//! Outputs land under their own directory (`compressed` by default), and a
//! batch where two inputs map to the same output file is refused up front.
//! A compressed tree can be synced or uploaded as a drop-in replacement for
//! the original.

pub mod compress;
pub mod config;
pub mod naming;
pub mod output;
pub mod process;
pub mod savings;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
