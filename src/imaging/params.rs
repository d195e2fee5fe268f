//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`batch`](crate::batch) module (which decides which
//! files to resize) and the [`backend`](super::backend) (which does the
//! actual pixel work). This separation allows swapping backends (e.g. for
//! testing with a mock) without changing batch logic.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// The fixed output resolution every image is resized to.
///
/// Parsed from `WIDTHxHEIGHT` on the command line (`--size 64x64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTargetSizeError {
    #[error("expected WIDTHxHEIGHT, got '{0}'")]
    Malformed(String),
    #[error("target dimensions must be non-zero, got '{0}'")]
    Zero(String),
}

impl FromStr for TargetSize {
    type Err = ParseTargetSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| ParseTargetSizeError::Malformed(s.to_string()))?;
        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| ParseTargetSizeError::Malformed(s.to_string()))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| ParseTargetSizeError::Malformed(s.to_string()))?;
        if width == 0 || height == 0 {
            return Err(ParseTargetSizeError::Zero(s.to_string()));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parameters for a single resize operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn target_size_parses_wxh() {
        let size: TargetSize = "64x64".parse().unwrap();
        assert_eq!(size.width, 64);
        assert_eq!(size.height, 64);
    }

    #[test]
    fn target_size_accepts_uppercase_separator() {
        let size: TargetSize = "320X240".parse().unwrap();
        assert_eq!(size.width, 320);
        assert_eq!(size.height, 240);
    }

    #[test]
    fn target_size_rejects_missing_separator() {
        assert!(matches!(
            "64".parse::<TargetSize>(),
            Err(ParseTargetSizeError::Malformed(_))
        ));
    }

    #[test]
    fn target_size_rejects_non_numeric() {
        assert!(matches!(
            "axb".parse::<TargetSize>(),
            Err(ParseTargetSizeError::Malformed(_))
        ));
    }

    #[test]
    fn target_size_rejects_zero_dimension() {
        assert!(matches!(
            "0x64".parse::<TargetSize>(),
            Err(ParseTargetSizeError::Zero(_))
        ));
        assert!(matches!(
            "64x0".parse::<TargetSize>(),
            Err(ParseTargetSizeError::Zero(_))
        ));
    }

    #[test]
    fn target_size_display_roundtrips() {
        let size = TargetSize {
            width: 128,
            height: 96,
        };
        assert_eq!(size.to_string().parse::<TargetSize>().unwrap(), size);
    }
}
