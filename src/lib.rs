//! # batchpix
//!
//! A parallel batch resizer for JPEG image datasets. Point it at a directory
//! of JPEGs and it writes every one of them — resized to a fixed resolution
//! — into an output directory under the original base names.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan     source/  →  file list              (filesystem → structured data)
//! 2. Resize   list     →  output/ + manifest.json (parallel decode/resize/encode)
//! ```
//!
//! The split keeps the parallel fan-out trivially simple: scan produces a
//! sorted, deterministic list; resize maps one pure per-file operation over
//! it with a rayon worker pool. Tasks share nothing and never talk to each
//! other, so a corrupt file only costs its own output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — enumerates the JPEG files in the source directory |
//! | [`batch`] | Stage 2 — parallel resize fan-out, progress events, run report |
//! | [`imaging`] | Backend trait + pure-Rust decode/resize/encode |
//! | [`config`] | Optional `config.toml` loading, validation, worker-count resolution |
//! | [`output`] | CLI output formatting — pure `format_*` functions |
//!
//! # Design Decisions
//!
//! ## Exact Resize, Bilinear Filter
//!
//! Every output has exactly the configured target dimensions; aspect ratio
//! is not preserved. Datasets destined for model training want uniform
//! tensors, not letterboxing. The filter is `Triangle` (bilinear) — the
//! standard choice when throughput matters more than the last bit of
//! downscale quality.
//!
//! ## Backend Trait
//!
//! The pixel work sits behind the [`imaging::ImageBackend`] trait, so batch
//! orchestration is tested against a recording mock without encoding a
//! single JPEG. The production [`imaging::RustBackend`] is pure Rust via the
//! `image` crate — no ImageMagick, no system dependencies.
//!
//! ## Streaming Progress Over a Channel
//!
//! Workers report per-file completion through an mpsc channel to a printer
//! thread. Progress lines stream as files finish, in completion order, and
//! the batch code never touches stdout.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;
pub mod scan;
