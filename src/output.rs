//! CLI output formatting for both commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every file is its identity and what happened to its pixels — the
//! dimension transition — with filesystem paths shown as secondary context
//! via indented lines.
//!
//! # Entity Display Contract
//!
//! Every file follows a consistent two-level pattern across both commands:
//!
//! 1. **Header line**: positional index + filename + dimension transition
//! 2. **Context lines**: indented `Output:` / `Source:` and `Size:` details
//!
//! # Output Format
//!
//! ## Compress
//!
//! ```text
//! 001 dawn.png (3000x2000 → 1620x1080)
//!     Output: compressed/dawn.jpg
//!     Size: 2.31 MB → 412.8 KB (82.6% smaller)
//! 002 logo.png (200x100)
//!     Output: compressed/logo.jpg
//!     Size: 4.2 KB → 5.1 KB (21.4% larger)
//!
//! Compressed 2 images: 2.31 MB → 417.9 KB (82.4% smaller)
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 dawn.png (3000x2000 → 1620x1080)
//!     Source: photos/dawn.png, 2.31 MB
//! 002 logo.png (200x100, fits)
//!     Source: photos/logo.png, 4.2 KB
//!
//! Checked 2 files: 1 would be resized, 1 already fits
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::process::{FileOutcome, PlannedFile, ProcessSummary};
use crate::savings::format_file_size;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `1 image`, `2 images`.
fn count_noun(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// `3000x2000`.
fn format_dimensions(dims: (u32, u32)) -> String {
    format!("{}x{}", dims.0, dims.1)
}

/// The parenthesized part of a header line: what happens to the pixels.
///
/// - resized: `3000x2000 → 1620x1080`
/// - unchanged: `200x100` (compress) or `200x100, fits` (check)
/// - unreadable: `not a decodable image`
fn format_transition(
    source: Option<(u32, u32)>,
    output: Option<(u32, u32)>,
    fits_label: bool,
) -> String {
    match (source, output) {
        (Some(s), Some(o)) if s != o => {
            format!("{} \u{2192} {}", format_dimensions(s), format_dimensions(o))
        }
        (Some(s), Some(_)) if fits_label => format!("{}, fits", format_dimensions(s)),
        (Some(s), Some(_)) => format_dimensions(s),
        _ => "not a decodable image".to_string(),
    }
}

/// File name of a path, for header lines.
fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// Compress output
// ============================================================================

fn format_outcome(index: usize, outcome: &FileOutcome) -> Vec<String> {
    let header = if outcome.passed_through {
        format!(
            "{} {} (passed through unmodified)",
            format_index(index),
            display_name(&outcome.source_path)
        )
    } else {
        format!(
            "{} {} ({})",
            format_index(index),
            display_name(&outcome.source_path),
            format_transition(outcome.source_dimensions, outcome.output_dimensions, false)
        )
    };

    let size = if outcome.passed_through {
        format!(
            "    Size: {} (unchanged)",
            format_file_size(outcome.savings.original_size)
        )
    } else {
        format!("    Size: {}", outcome.savings)
    };

    vec![
        header,
        format!("    Output: {}", outcome.output_path.display()),
        size,
    ]
}

/// Format compress command output: one entity per input, then batch totals.
pub fn format_compress_summary(summary: &ProcessSummary) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, outcome) in summary.outcomes.iter().enumerate() {
        lines.extend(format_outcome(i + 1, outcome));
    }

    lines.push(String::new());
    let compressed = summary.outcomes.len() - summary.passed_through;
    let tail = if summary.passed_through > 0 {
        format!(
            "Compressed {} ({} passed through): {}",
            count_noun(compressed, "image"),
            summary.passed_through,
            summary.totals
        )
    } else {
        format!(
            "Compressed {}: {}",
            count_noun(compressed, "image"),
            summary.totals
        )
    };
    lines.push(tail);

    lines
}

/// Print compress output to stdout.
pub fn print_compress_summary(summary: &ProcessSummary) {
    for line in format_compress_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format check command output: planned transitions, nothing written.
pub fn format_check_output(planned: &[PlannedFile]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut resized = 0;
    let mut fits = 0;
    let mut undecodable = 0;

    for (i, file) in planned.iter().enumerate() {
        match (file.source_dimensions, file.planned_dimensions) {
            (Some(s), Some(p)) if s != p => resized += 1,
            (Some(_), Some(_)) => fits += 1,
            _ => undecodable += 1,
        }
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            display_name(&file.path),
            format_transition(file.source_dimensions, file.planned_dimensions, true)
        ));
        lines.push(format!(
            "    Source: {}, {}",
            file.path.display(),
            format_file_size(file.byte_size)
        ));
    }

    lines.push(String::new());
    let mut parts = Vec::new();
    if resized > 0 {
        parts.push(format!("{resized} would be resized"));
    }
    if fits > 0 {
        parts.push(format!("{fits} already fit{}", if fits == 1 { "s" } else { "" }));
    }
    if undecodable > 0 {
        parts.push(format!("{undecodable} not decodable"));
    }
    if parts.is_empty() {
        parts.push("nothing to do".to_string());
    }
    lines.push(format!(
        "Checked {}: {}",
        count_noun(planned.len(), "file"),
        parts.join(", ")
    ));

    lines
}

/// Print check output to stdout.
pub fn print_check_output(planned: &[PlannedFile]) {
    for line in format_check_output(planned) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
