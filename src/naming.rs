//! Centralized filename and extension handling.
//!
//! Compression changes an image's encoding, so its logical filename has to
//! follow. This module owns that rewrite plus the two extension tables the
//! rest of the tool consults: which extensions the scanner picks up, and
//! the extension-to-MIME mapping used when reading sources from disk.
//!
//! ## Extension Rewrite
//!
//! Only the final `.suffix` changes; the rest of the name is preserved:
//! - `dawn.png` → `dawn.jpg`
//! - `archive.tar.gz` → `archive.tar.jpg`
//! - `photo` → `photo.jpg` (no extension to replace, so one is appended)

use std::path::{Path, PathBuf};

/// File extensions the directory scanner treats as image inputs.
///
/// Decoders for all of these are compiled into the binary; anything else
/// found while scanning is skipped silently. Files named explicitly on the
/// command line bypass this list and fail at decode time instead.
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp"];

/// Returns true when `path` has a supported image extension.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_INPUT_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// MIME type for a filename, derived from its extension.
///
/// Unknown extensions fall back to `application/octet-stream`. The value is
/// informational; decoding sniffs the real format from the bytes.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Rewrite `name`'s extension to `extension`.
///
/// Replaces only the final `.suffix`; a name without one gets the extension
/// appended. Dotfiles follow `Path` semantics: `.hidden` has no extension,
/// so it becomes `.hidden.jpg`.
pub fn replace_extension(name: &str, extension: &str) -> String {
    let mut path = PathBuf::from(name);
    path.set_extension(extension);
    path.to_string_lossy().into_owned()
}
