//! CLI output formatting for both pipeline stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! Found 3 images in input
//! 001 cat.jpg
//! 002 dog.jpg
//! 003 owl.jpg
//! ```
//!
//! ## Resize (streamed per file, order follows worker completion)
//!
//! ```text
//!     cat.jpg: 64x64
//!     dog.jpg: FAILED (Failed to decode input/dog.jpg: ...)
//! ```
//!
//! ## Summary
//!
//! ```text
//! Resized 2 of 3 images to 64x64
//! Failed 1:
//!     dog.jpg: Failed to decode input/dog.jpg: ...
//! ```

use crate::batch::{BatchEvent, BatchReport};
use crate::scan::SourceImage;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format the scan listing: count header plus one indexed line per file.
pub fn format_scan_output(images: &[SourceImage], source: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Found {} image{} in {}",
        images.len(),
        if images.len() == 1 { "" } else { "s" },
        source.display()
    )];
    for (i, image) in images.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            format_index(i + 1),
            image.relative_path.display()
        ));
    }
    lines
}

pub fn print_scan_output(images: &[SourceImage], source: &Path) {
    for line in format_scan_output(images, source) {
        println!("{}", line);
    }
}

/// Format a single progress line for a completed file.
pub fn format_batch_event(event: &BatchEvent) -> String {
    match event {
        BatchEvent::Resized {
            filename,
            width,
            height,
        } => format!("    {}: {}x{}", filename, width, height),
        BatchEvent::Failed { filename, reason } => {
            format!("    {}: FAILED ({})", filename, reason)
        }
    }
}

/// Format the end-of-run summary: totals plus one line per failure.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    let total = report.entries.len() + report.failures.len();
    let mut lines = vec![format!(
        "Resized {} of {} image{} to {}x{}",
        report.entries.len(),
        total,
        if total == 1 { "" } else { "s" },
        report.target[0],
        report.target[1]
    )];
    if !report.failures.is_empty() {
        lines.push(format!("Failed {}:", report.failures.len()));
        for failure in &report.failures {
            lines.push(format!("    {}: {}", failure.source, failure.reason));
        }
    }
    lines
}

pub fn print_summary(report: &BatchReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}
