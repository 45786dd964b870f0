//! Converter configuration module.
//!
//! Handles loading and validating the optional `config.toml` in the input
//! root (next to `material.json`). A missing file means stock defaults; a
//! present file only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnails]
//! max_width = 150   # Maximum thumbnail width in pixels
//! max_height = 96   # Maximum thumbnail height in pixels
//! quality = 90      # JPEG quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Filename of the optional configuration file, resolved under the input root.
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

/// Converter configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Thumbnail generation settings.
    pub thumbnails: ThumbnailsConfig,
}

/// Bounding box and encoding quality for generated `thumb.jpg` files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Maximum thumbnail width in pixels.
    pub max_width: u32,
    /// Maximum thumbnail height in pixels.
    pub max_height: u32,
    /// JPEG encoding quality (1-100).
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            max_width: 150,
            max_height: 96,
            quality: 90,
        }
    }
}

impl ThumbnailsConfig {
    /// Bounding box as (width, height).
    pub fn bounds(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }
}

impl ConverterConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.max_width == 0 || self.thumbnails.max_height == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.max_width and thumbnails.max_height must be non-zero".into(),
            ));
        }
        if self.thumbnails.quality == 0 || self.thumbnails.quality > 100 {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Load and validate `config.toml` from the input root.
///
/// A missing file yields the stock defaults; a present file is parsed with
/// unknown keys rejected, then validated.
pub fn load_config(input_root: &Path) -> Result<ConverterConfig, ConfigError> {
    let config_path = input_root.join(CONFIG_FILENAME);
    let config: ConverterConfig = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        ConverterConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Marker Mill Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the input root, next to material.json.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Thumbnail generation
# ---------------------------------------------------------------------------
[thumbnails]
# Maximum bounding box for generated thumb.jpg files, in pixels.
# Source images are shrunk to fit inside the box, never enlarged.
max_width = 150
max_height = 96

# JPEG encoding quality (1 = worst, 100 = best).
quality = 90
"##
}
