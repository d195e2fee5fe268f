//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, zero
//! external dependencies. Everything is statically linked into the binary.

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Both operations must be implemented so batch logic stays backend-agnostic.
/// `Sync` is required because batch fan-out shares one backend across rayon
/// worker threads.
pub trait ImageBackend: Sync {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Execute a resize operation: decode, resize to the exact target
    /// dimensions, encode to the output path.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
