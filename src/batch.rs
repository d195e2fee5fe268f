//! Parallel batch resizing.
//!
//! Stage 2 of the batch pipeline. Takes the file list from the scan stage
//! and resizes every image to the target resolution, writing each result
//! under its original base name in the output directory.
//!
//! ## Parallel Processing
//!
//! Files are processed in parallel using [rayon](https://docs.rs/rayon).
//! Each per-file task is independent — no shared mutable state, no ordering
//! requirement. A failed file is recorded and does not stop its siblings.
//!
//! ## Progress Events
//!
//! When a sender is supplied, every completed file emits a [`BatchEvent`]
//! over the channel. The CLI runs a printer thread on the receiving end so
//! progress lines stream while workers are busy.
//!
//! ## Run Manifest
//!
//! [`write_manifest`] serializes the [`BatchReport`] to `manifest.json` in
//! the output directory: one entry per produced file with its dimensions,
//! one failure record per file that could not be processed.

use crate::imaging::{ImageBackend, Quality, ResizeParams, TargetSize};
use crate::scan::SourceImage;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Name of the run manifest file within the output directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for a batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub size: TargetSize,
    pub quality: Quality,
}

/// Progress event emitted once per completed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Resized {
        filename: String,
        width: u32,
        height: u32,
    },
    Failed {
        filename: String,
        reason: String,
    },
}

/// One successfully produced output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub source: String,
    pub output: String,
    pub width: u32,
    pub height: u32,
}

/// One input file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    pub source: String,
    pub reason: String,
}

/// Outcome of a batch run, serialized to the run manifest.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub target: [u32; 2],
    pub entries: Vec<ReportEntry>,
    pub failures: Vec<FailureEntry>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resize every scanned image into the output directory.
///
/// Returns the full report; per-file failures are collected, not propagated.
/// Only batch-level problems (e.g. the output directory cannot be created)
/// are errors.
pub fn resize_batch(
    backend: &impl ImageBackend,
    source_root: &Path,
    output_dir: &Path,
    images: &[SourceImage],
    options: &BatchOptions,
    events: Option<Sender<BatchEvent>>,
) -> Result<BatchReport, BatchError> {
    fs::create_dir_all(output_dir)?;
    create_output_subdirs(output_dir, images)?;

    let results: Vec<Result<ReportEntry, FailureEntry>> = images
        .par_iter()
        .map_with(events, |tx, image| {
            let outcome = resize_one(backend, source_root, output_dir, image, options);
            if let Some(tx) = tx {
                let _ = tx.send(event_for(image, &outcome));
            }
            outcome
        })
        .collect();

    let mut entries = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(entry) => entries.push(entry),
            Err(failure) => failures.push(failure),
        }
    }
    // par_iter preserves input order, but sort anyway so the report stays
    // deterministic if the collection strategy ever changes
    entries.sort_by(|a, b| a.source.cmp(&b.source));
    failures.sort_by(|a, b| a.source.cmp(&b.source));

    Ok(BatchReport {
        target: [options.size.width, options.size.height],
        entries,
        failures,
    })
}

/// Pre-create the output subdirectories for recursive layouts.
///
/// Done up front and sequentially so parallel workers never race on
/// directory creation.
fn create_output_subdirs(output_dir: &Path, images: &[SourceImage]) -> Result<(), BatchError> {
    let parents: BTreeSet<&Path> = images
        .iter()
        .filter_map(|image| image.relative_path.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    for parent in parents {
        fs::create_dir_all(output_dir.join(parent))?;
    }
    Ok(())
}

/// Resize a single file. The per-file unit of work run by the pool.
fn resize_one(
    backend: &impl ImageBackend,
    source_root: &Path,
    output_dir: &Path,
    image: &SourceImage,
    options: &BatchOptions,
) -> Result<ReportEntry, FailureEntry> {
    let source = source_root.join(&image.relative_path);
    let output = output_dir.join(&image.relative_path);

    let params = ResizeParams {
        source,
        output: output.clone(),
        width: options.size.width,
        height: options.size.height,
        quality: options.quality,
    };

    match backend.resize(&params) {
        Ok(()) => Ok(ReportEntry {
            source: image.relative_path.display().to_string(),
            output: output.display().to_string(),
            width: options.size.width,
            height: options.size.height,
        }),
        Err(e) => {
            // A failed task must not leave a partial output behind
            if output.exists() {
                let _ = fs::remove_file(&output);
            }
            Err(FailureEntry {
                source: image.relative_path.display().to_string(),
                reason: e.to_string(),
            })
        }
    }
}

fn event_for(image: &SourceImage, outcome: &Result<ReportEntry, FailureEntry>) -> BatchEvent {
    match outcome {
        Ok(entry) => BatchEvent::Resized {
            filename: image.filename.clone(),
            width: entry.width,
            height: entry.height,
        },
        Err(failure) => BatchEvent::Failed {
            filename: image.filename.clone(),
            reason: failure.reason.clone(),
        },
    }
}

/// Write the run manifest into the output directory.
pub fn write_manifest(report: &BatchReport, output_dir: &Path) -> Result<PathBuf, BatchError> {
    let path = output_dir.join(MANIFEST_FILENAME);
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;
    Ok(path)
}
