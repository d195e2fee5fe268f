//! Source directory scanning.
//!
//! Stage 1 of the batch pipeline. Enumerates the JPEG files in the source
//! directory, producing a deterministic list that the resize stage consumes.
//!
//! ## Selection Rules
//!
//! - Only regular files with a `jpg` or `jpeg` extension (case-insensitive)
//!   are selected. Everything else — sidecar files, `config.toml`, dotfiles
//!   — is ignored.
//! - By default only the top level of the source directory is scanned.
//!   Recursive mode walks subdirectories and records paths relative to the
//!   source root, so the resize stage can mirror the layout in the output
//!   directory.
//! - Results are sorted by relative path. Batch order, progress output, and
//!   the run manifest are deterministic for the same directory contents.

use crate::imaging::SUPPORTED_EXTENSIONS;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// One input file discovered by the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceImage {
    /// Path relative to the source root. The resize stage writes the output
    /// under the same relative path.
    pub relative_path: PathBuf,
    /// Base name, shown in progress output.
    pub filename: String,
}

/// Returns true if the path has a supported image extension.
fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// Enumerate the JPEG files under `source`, sorted by relative path.
pub fn scan(source: &Path, recursive: bool) -> Result<Vec<SourceImage>, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::NotADirectory(source.to_path_buf()));
    }

    let mut images = if recursive {
        scan_recursive(source)?
    } else {
        scan_flat(source)?
    };

    images.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(images)
}

fn source_image(root: &Path, path: &Path) -> SourceImage {
    // strip_prefix cannot fail: every scanned path is under the root
    let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    SourceImage {
        relative_path: relative,
        filename,
    }
}

fn scan_flat(source: &Path) -> Result<Vec<SourceImage>, ScanError> {
    let mut images = Vec::new();
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && has_image_extension(&path) {
            images.push(source_image(source, &path));
        }
    }
    Ok(images)
}

fn scan_recursive(source: &Path) -> Result<Vec<SourceImage>, ScanError> {
    let mut images = Vec::new();
    for entry in WalkDir::new(source) {
        let entry = entry?;
        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            images.push(source_image(source, entry.path()));
        }
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn finds_jpeg_files_sorted() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("b.jpg"));
        touch(&tmp.path().join("a.jpeg"));
        touch(&tmp.path().join("c.JPG"));

        let images = scan(tmp.path(), false).unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["a.jpeg", "b.jpg", "c.JPG"]);
    }

    #[test]
    fn ignores_non_image_files() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("photo.jpg"));
        touch(&tmp.path().join("notes.txt"));
        touch(&tmp.path().join("config.toml"));
        touch(&tmp.path().join("sidecar.png"));

        let images = scan(tmp.path(), false).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].filename, "photo.jpg");
    }

    #[test]
    fn flat_scan_ignores_subdirectories() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("top.jpg"));
        touch(&tmp.path().join("nested/deep.jpg"));

        let images = scan(tmp.path(), false).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].filename, "top.jpg");
    }

    #[test]
    fn recursive_scan_records_relative_paths() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("top.jpg"));
        touch(&tmp.path().join("nested/deep.jpg"));

        let images = scan(tmp.path(), true).unwrap();
        assert_eq!(images.len(), 2);
        let paths: Vec<&Path> = images.iter().map(|i| i.relative_path.as_path()).collect();
        assert_eq!(paths, vec![Path::new("nested/deep.jpg"), Path::new("top.jpg")]);
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let tmp = TempDir::new().unwrap();
        let images = scan(tmp.path(), false).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn missing_source_errors() {
        let result = scan(Path::new("/nonexistent/input"), false);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn file_as_source_errors() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("image.jpg");
        touch(&file);

        let result = scan(&file, false);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }
}
