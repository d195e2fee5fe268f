//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize → JPEG** | `resize_exact` (Triangle/bilinear) + `JpegEncoder` |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use params::{ParseTargetSizeError, Quality, ResizeParams, TargetSize};
pub use rust_backend::{RustBackend, SUPPORTED_EXTENSIONS};
