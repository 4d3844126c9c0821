//! Input discovery.
//!
//! Stage 1 of a compression run. Expands the paths given on the command
//! line into one flat, ordered list of image files for the process stage.
//!
//! ## Path Arguments
//!
//! Two kinds of arguments, handled differently:
//!
//! - **Directories** are walked recursively and filtered to the supported
//!   image extensions. Non-image files are skipped silently so a photo
//!   folder with stray `.txt` or `.DS_Store` files just works.
//! - **Files** are taken as-is, whatever their extension. Naming a file
//!   means the user wants it compressed; if it turns out not to be an
//!   image, the decoder reports that instead of the file vanishing from
//!   the run without a word.
//!
//! ## Relative Paths
//!
//! Each discovered file carries the path it had under its scan root:
//!
//! ```text
//! photos/               # argument
//! ├── dawn.jpg          # relative: dawn.jpg
//! └── trips/
//!     └── rome.png      # relative: trips/rome.png
//! single.jpg            # argument — relative: single.jpg
//! ```
//!
//! The process stage mirrors these under the output directory, so scanned
//! trees keep their structure and explicitly named files land at the root.
//!
//! ## Ordering
//!
//! Discovery order is deterministic: arguments in the order given, walked
//! entries name-sorted. Reports stay diffable across runs.

use crate::naming;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("No such file or directory: {0}")]
    NotFound(PathBuf),
    #[error("No images found under: {0}")]
    NoImages(PathBuf),
}

/// A discovered input file: where it is, and where it sits relative to its
/// scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

/// Expand path arguments into the ordered list of files to process.
///
/// A directory argument containing no images at all is an error; silently
/// compressing nothing hides a mistyped path.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<ScannedFile>, ScanError> {
    let mut files = Vec::new();
    for path in paths {
        // Stat once; a permission or traversal failure is not "not found"
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(path.clone()),
            _ => ScanError::Io(e),
        })?;
        if metadata.is_dir() {
            files.extend(scan_directory(path)?);
        } else {
            files.push(ScannedFile {
                path: path.clone(),
                relative: PathBuf::from(path.file_name().unwrap_or(path.as_os_str())),
            });
        }
    }
    Ok(files)
}

/// Recursively collect supported image files under `root`, name-sorted.
fn scan_directory(root: &Path) -> Result<Vec<ScannedFile>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && naming::is_supported_image(entry.path()) {
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(ScannedFile {
                path: entry.path().to_path_buf(),
                relative,
            });
        }
    }
    if files.is_empty() {
        return Err(ScanError::NoImages(root.to_path_buf()));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"stub").unwrap();
    }

    #[test]
    fn scan_filters_and_sorts_directory_entries() {
        let tmp = tempfile::TempDir::new().unwrap();
        touch(&tmp.path().join("b.png"));
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("notes.txt"));
        fs::create_dir(tmp.path().join("trips")).unwrap();
        touch(&tmp.path().join("trips/rome.webp"));

        let files = discover(&[tmp.path().to_path_buf()]).unwrap();
        let relatives: Vec<_> = files.iter().map(|f| f.relative.clone()).collect();
        assert_eq!(
            relatives,
            vec![
                PathBuf::from("a.jpg"),
                PathBuf::from("b.png"),
                PathBuf::from("trips/rome.webp"),
            ]
        );
    }

    #[test]
    fn scan_extension_match_is_case_insensitive() {
        let tmp = tempfile::TempDir::new().unwrap();
        touch(&tmp.path().join("SCAN.JPG"));

        let files = discover(&[tmp.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, PathBuf::from("SCAN.JPG"));
    }

    #[test]
    fn explicit_file_bypasses_extension_filter() {
        let tmp = tempfile::TempDir::new().unwrap();
        let odd = tmp.path().join("photo.dat");
        touch(&odd);

        let files = discover(&[odd.clone()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, odd);
        assert_eq!(files[0].relative, PathBuf::from("photo.dat"));
    }

    #[test]
    fn arguments_keep_their_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let z = tmp.path().join("z.jpg");
        let a = tmp.path().join("a.jpg");
        touch(&z);
        touch(&a);

        let files = discover(&[z.clone(), a.clone()]).unwrap();
        assert_eq!(files[0].path, z);
        assert_eq!(files[1].path, a);
    }

    #[test]
    fn missing_path_is_an_error() {
        let err = discover(&[PathBuf::from("/no/such/place.jpg")]).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[test]
    fn stat_failures_are_not_reported_as_missing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("photo.jpg");
        touch(&file);

        // Traversing through a regular file fails with ENOTDIR, not ENOENT
        let err = discover(&[file.join("inside.jpg")]).unwrap_err();
        assert!(matches!(err, ScanError::Io(_)));
    }

    #[test]
    fn directory_without_images_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        touch(&tmp.path().join("readme.md"));

        let err = discover(&[tmp.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, ScanError::NoImages(_)));
    }

    #[test]
    fn empty_argument_list_yields_empty_result() {
        assert!(discover(&[]).unwrap().is_empty());
    }
}
