//! Batch configuration module.
//!
//! Handles loading and validating an optional `config.toml` placed in the
//! source directory. Configuration files are sparse — override just the
//! values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! size = [64, 64]      # Target width, height in pixels
//! quality = 90         # JPEG quality (1-100)
//!
//! [processing]
//! max_workers = 12     # Max parallel workers (omit for auto = CPU cores)
//! recursive = false    # Recurse into subdirectories
//! ```
//!
//! Command-line flags override config file values, which override the
//! built-in defaults. Unknown keys are rejected to catch typos early.

use crate::imaging::TargetSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the source directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Batch configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Output settings (target size, JPEG quality).
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Target resolution as `[width, height]`. Every output image has
    /// exactly these dimensions.
    pub size: [u32; 2],
    /// JPEG encoding quality (1-100).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            size: [64, 64],
            quality: 90,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel resize workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
    /// Recurse into subdirectories, mirroring the layout in the output.
    pub recursive: bool,
}

impl BatchConfig {
    /// Load from `config.toml` in the source directory. Returns defaults if
    /// the file doesn't exist; parse and validation errors are fatal.
    pub fn load(source_dir: &Path) -> Result<Self, ConfigError> {
        let path = source_dir.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.quality == 0 || self.output.quality > 100 {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.output.size[0] == 0 || self.output.size[1] == 0 {
            return Err(ConfigError::Validation(
                "output.size values must be non-zero".into(),
            ));
        }
        if self.processing.max_workers == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_workers must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Target size as the imaging-layer type.
    pub fn target_size(&self) -> TargetSize {
        TargetSize {
            width: self.output.size[0],
            height: self.output.size[1],
        }
    }
}

/// Resolve the effective worker count.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(requested: Option<usize>) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    requested.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Stock `config.toml` with all options documented, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# batchpix configuration. Place this file in the source directory.
# All options are optional - defaults shown below.

[output]
size = [64, 64]      # Target width, height in pixels
quality = 90         # JPEG quality (1-100)

[processing]
# max_workers = 12   # Max parallel workers (omit for auto = CPU cores)
recursive = false    # Recurse into subdirectories
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = BatchConfig::default();
        assert_eq!(config.output.size, [64, 64]);
        assert_eq!(config.output.quality, 90);
        assert_eq!(config.processing.max_workers, None);
        assert!(!config.processing.recursive);
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = BatchConfig::load(tmp.path()).unwrap();
        assert_eq!(config, BatchConfig::default());
    }

    #[test]
    fn load_partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[output]\nsize = [128, 96]\n",
        )
        .unwrap();

        let config = BatchConfig::load(tmp.path()).unwrap();
        assert_eq!(config.output.size, [128, 96]);
        assert_eq!(config.output.quality, 90);
        assert_eq!(config.processing.max_workers, None);
    }

    #[test]
    fn load_full_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[output]\nsize = [32, 32]\nquality = 75\n\n\
             [processing]\nmax_workers = 4\nrecursive = true\n",
        )
        .unwrap();

        let config = BatchConfig::load(tmp.path()).unwrap();
        assert_eq!(config.output.size, [32, 32]);
        assert_eq!(config.output.quality, 75);
        assert_eq!(config.processing.max_workers, Some(4));
        assert!(config.processing.recursive);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[output]\nsizes = [64, 64]\n",
        )
        .unwrap();

        assert!(matches!(
            BatchConfig::load(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn zero_quality_fails_validation() {
        let mut config = BatchConfig::default();
        config.output.quality = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn excessive_quality_fails_validation() {
        let mut config = BatchConfig::default();
        config.output.quality = 101;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn zero_size_fails_validation() {
        let mut config = BatchConfig::default();
        config.output.size = [0, 64];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn zero_workers_fails_validation() {
        let mut config = BatchConfig::default();
        config.processing.max_workers = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn target_size_conversion() {
        let config = BatchConfig::default();
        let size = config.target_size();
        assert_eq!(size.width, 64);
        assert_eq!(size.height, 64);
    }

    #[test]
    fn effective_workers_defaults_to_all_cores() {
        let cores = std::thread::available_parallelism().unwrap().get();
        assert_eq!(effective_workers(None), cores);
    }

    #[test]
    fn effective_workers_clamps_to_core_count() {
        let cores = std::thread::available_parallelism().unwrap().get();
        assert_eq!(effective_workers(Some(cores + 100)), cores);
        assert_eq!(effective_workers(Some(1)), 1);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: BatchConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, BatchConfig::default());
    }
}
