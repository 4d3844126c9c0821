//! Batch compression driver.
//!
//! Stage 2 of a compression run. Takes the file list from the scan stage,
//! reads each source, runs the compressor, and writes outputs under the
//! output directory. Produces a [`ProcessSummary`] with one outcome per
//! input plus batch totals, which the CLI renders and can serialize as a
//! JSON report.
//!
//! ## Failure Policy
//!
//! Two policies, chosen per run:
//!
//! - [`FailurePolicy::Strict`] (default): the batch is all-or-nothing.
//!   Sources are read and compressed entirely before any output is
//!   written, so a compression failure leaves the output directory
//!   untouched.
//! - [`FailurePolicy::KeepFailed`]: an image that fails to compress is
//!   written through unmodified, flagged in the summary, and logged. The
//!   rest of the batch proceeds.
//!
//! ## Output Structure
//!
//! Outputs mirror each input's path relative to its scan root, with the
//! extension rewritten for the output format:
//!
//! ```text
//! compressed/
//! ├── dawn.jpg               # from photos/dawn.png
//! └── trips/
//!     └── rome.jpg           # from photos/trips/rome.png
//! ```
//!
//! Extension rewriting can fold sibling inputs onto one output (`a.png`
//! and `a.jpg` both map to `a.jpg`); such batches are refused before
//! anything is read or written.
//!
//! ## Parallel Processing
//!
//! Per-image compression runs on the [rayon](https://docs.rs/rayon) pool;
//! reads and writes stay sequential so outcomes keep scan order.

use crate::compress::{
    self, CompressError, CompressedImage, CompressionOptions, Quality, SourceImage, fit_within,
};
use crate::config::ToolConfig;
use crate::naming;
use crate::savings::{Savings, describe_savings};
use crate::scan::ScannedFile;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Compression failed: {0}")]
    Compress(#[from] CompressError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Output collision: {first} and {second} both map to {output}")]
    Collision {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },
}

/// What to do when a single image fails to compress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail the whole batch; write nothing.
    Strict,
    /// Write the original bytes through unmodified and flag the file.
    KeepFailed,
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub options: CompressionOptions,
    pub policy: FailurePolicy,
}

impl ProcessConfig {
    /// Build a ProcessConfig from tool config values.
    pub fn from_tool_config(config: &ToolConfig) -> Self {
        Self {
            options: CompressionOptions {
                max_width: config.limits.max_width,
                max_height: config.limits.max_height,
                quality: Quality::new(config.output.quality),
                format: config.output.format,
            },
            policy: FailurePolicy::Strict,
        }
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::from_tool_config(&ToolConfig::default())
    }
}

/// Outcome for a single input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Where the input came from.
    pub source_path: PathBuf,
    /// Where the output was written.
    pub output_path: PathBuf,
    /// Input dimensions from the header probe, when readable.
    pub source_dimensions: Option<(u32, u32)>,
    /// Output dimensions. Equals `source_dimensions` for a pass-through.
    pub output_dimensions: Option<(u32, u32)>,
    #[serde(flatten)]
    pub savings: Savings,
    /// True when the original bytes were written through unmodified.
    pub passed_through: bool,
}

/// Summary of a whole batch run.
#[derive(Debug, Serialize)]
pub struct ProcessSummary {
    /// Per-file outcomes, in scan order.
    pub outcomes: Vec<FileOutcome>,
    /// Byte totals across the whole batch.
    pub totals: Savings,
    /// Number of inputs written through unmodified.
    pub passed_through: usize,
}

/// Compress every scanned file into `output_dir`.
///
/// Sources are read into memory and compressed before anything is written,
/// so under [`FailurePolicy::Strict`] a failed compression leaves the
/// output directory untouched.
pub fn process(
    files: &[ScannedFile],
    output_dir: &Path,
    config: &ProcessConfig,
) -> Result<ProcessSummary, ProcessError> {
    check_collisions(files, &config.options)?;
    let sources = read_sources(files)?;

    let compressed: Vec<Option<CompressedImage>> = match config.policy {
        FailurePolicy::Strict => compress::compress_all(&sources, &config.options)?
            .into_iter()
            .map(Some)
            .collect(),
        FailurePolicy::KeepFailed => sources
            .par_iter()
            .map(
                |source| match compress::compress(source, &config.options) {
                    Ok(image) => Some(image),
                    Err(e) => {
                        log::warn!("writing original through unmodified: {e}");
                        None
                    }
                },
            )
            .collect(),
    };

    let mut outcomes = Vec::with_capacity(files.len());
    for ((file, source), result) in files.iter().zip(&sources).zip(compressed) {
        outcomes.push(write_output(file, source, result, output_dir)?);
    }

    let totals = Savings::from_sizes(
        outcomes.iter().map(|o| o.savings.original_size).sum(),
        outcomes.iter().map(|o| o.savings.compressed_size).sum(),
    );
    let passed_through = outcomes.iter().filter(|o| o.passed_through).count();

    Ok(ProcessSummary {
        outcomes,
        totals,
        passed_through,
    })
}

/// Write one result (or pass the original through) and record the outcome.
fn write_output(
    file: &ScannedFile,
    source: &SourceImage,
    compressed: Option<CompressedImage>,
    output_dir: &Path,
) -> Result<FileOutcome, ProcessError> {
    let source_dimensions = source.dimensions().ok();

    let (relative, bytes, output_dimensions, savings) = match &compressed {
        Some(image) => (
            file.relative.with_file_name(&image.name),
            &image.data,
            Some((image.width, image.height)),
            describe_savings(source, image),
        ),
        None => (
            file.relative.clone(),
            &source.data,
            source_dimensions,
            Savings::unchanged(source.byte_size()),
        ),
    };

    let output_path = output_dir.join(relative);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, bytes).map_err(|e| ProcessError::Write {
        path: output_path.clone(),
        source: e,
    })?;

    Ok(FileOutcome {
        source_path: file.path.clone(),
        output_path,
        source_dimensions,
        output_dimensions,
        savings,
        passed_through: compressed.is_none(),
    })
}

/// Refuse batches where two inputs land on the same output file.
///
/// Extension rewriting folds sibling names together (`a.png` and `a.jpg`
/// both become `a.jpg`), and the same name can arrive from two scan
/// roots. The later write would silently replace the earlier one.
fn check_collisions(
    files: &[ScannedFile],
    options: &CompressionOptions,
) -> Result<(), ProcessError> {
    let mut planned: HashMap<PathBuf, &Path> = HashMap::new();
    for file in files {
        let name = naming::replace_extension(&source_name(file), options.format.extension());
        let output = file.relative.with_file_name(name);
        if let Some(first) = planned.insert(output.clone(), &file.path) {
            return Err(ProcessError::Collision {
                first: first.to_path_buf(),
                second: file.path.clone(),
                output,
            });
        }
    }
    Ok(())
}

/// Read scanned files into in-memory sources, preserving order.
fn read_sources(files: &[ScannedFile]) -> Result<Vec<SourceImage>, ProcessError> {
    files
        .iter()
        .map(|file| {
            let data = fs::read(&file.path).map_err(|e| ProcessError::Read {
                path: file.path.clone(),
                source: e,
            })?;
            let name = source_name(file);
            let content_type = naming::content_type_for(&name);
            Ok(SourceImage::new(name, content_type, data))
        })
        .collect()
}

/// Logical filename for a scanned file.
fn source_name(file: &ScannedFile) -> String {
    file.relative
        .file_name()
        .unwrap_or(file.relative.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Planned result for one input of the `check` command.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub byte_size: u64,
    /// Dimensions from the header probe; `None` when the file is not a
    /// decodable image.
    pub source_dimensions: Option<(u32, u32)>,
    /// Dimensions a compression run would produce.
    pub planned_dimensions: Option<(u32, u32)>,
    /// Filename a compression run would write.
    pub output_name: String,
}

/// Probe every scanned file and compute the dimensions a compression run
/// would produce, without decoding or encoding any pixels.
pub fn plan(
    files: &[ScannedFile],
    options: &CompressionOptions,
) -> Result<Vec<PlannedFile>, ProcessError> {
    check_collisions(files, options)?;
    files
        .iter()
        .map(|file| {
            let data = fs::read(&file.path).map_err(|e| ProcessError::Read {
                path: file.path.clone(),
                source: e,
            })?;
            let name = source_name(file);
            let source = SourceImage::new(name.clone(), naming::content_type_for(&name), data);
            let source_dimensions = source.dimensions().ok();
            let planned_dimensions = source_dimensions
                .map(|dims| fit_within(dims, (options.max_width, options.max_height)));
            Ok(PlannedFile {
                path: file.path.clone(),
                byte_size: source.byte_size(),
                source_dimensions,
                planned_dimensions,
                output_name: naming::replace_extension(&name, options.format.extension()),
            })
        })
        .collect()
}
