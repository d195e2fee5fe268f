//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header read, no full decode) |
//! | Decode (JPEG) | `image` crate (pure Rust decoder) |
//! | Resize | `image::DynamicImage::resize_exact` with `Triangle` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ResizeParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Extensions whose decoders are compiled in and known to work.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode and save as JPEG at the given quality.
///
/// The output file is created only after a successful decode and resize, so
/// an unreadable source never leaves an empty file behind.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality as u8);
    img.write_with_encoder(encoder).map_err(|e| {
        BackendError::ProcessingFailed(format!("JPEG encode failed for {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        // Triangle is bilinear. resize_exact stretches to the target
        // dimensions without preserving aspect ratio.
        let resized = img.resize_exact(params.width, params.height, FilterType::Triangle);
        save_jpeg(&resized, &params.output, params.quality.value())
    }
}
