//! Tool configuration module.
//!
//! Handles loading and validating `upshrink.toml`. Configuration has three
//! layers: stock defaults, overridden by an optional config file, overridden
//! by command-line flags (flag resolution happens in `main`).
//!
//! ## Config File Location
//!
//! The loader looks for `upshrink.toml` in the working directory; `--config
//! <path>` points it somewhere else, in which case the file must exist.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [limits]
//! max_width = 1920      # Output width bound in pixels
//! max_height = 1080     # Output height bound in pixels
//!
//! [output]
//! format = "jpeg"       # jpeg | png | webp
//! quality = 0.8         # 0.0-1.0, JPEG only (png/webp output is lossless)
//! directory = "compressed"
//!
//! [processing]
//! max_jobs = 4          # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only cap the output width
//! [limits]
//! max_width = 1280
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::compress::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Filename probed in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "upshrink.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `upshrink.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Output bounding box.
    pub limits: LimitsConfig,
    /// Output encoding and destination.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_width == 0 || self.limits.max_height == 0 {
            return Err(ConfigError::Validation(
                "limits.max_width and limits.max_height must be non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be between 0.0 and 1.0".into(),
            ));
        }
        if self.output.directory.is_empty() {
            return Err(ConfigError::Validation(
                "output.directory must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Output bounding box settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Upper bound for output width in pixels.
    pub max_width: u32,
    /// Upper bound for output height in pixels.
    pub max_height: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
        }
    }
}

/// Output encoding and destination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Target encoding for compressed images.
    pub format: OutputFormat,
    /// Encoding quality factor, 0.0 to 1.0. Applies to JPEG.
    pub quality: f32,
    /// Directory compressed images are written into.
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: 0.8,
            directory: "compressed".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel compression workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_jobs: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_jobs(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_jobs.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load configuration from an explicit file path.
///
/// The file must exist. Parse errors, unknown keys, and out-of-range values
/// are all reported as errors.
pub fn load_file(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ToolConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load `upshrink.toml` from the working directory, falling back to stock
/// defaults when the file does not exist.
pub fn load_default() -> Result<ToolConfig, ConfigError> {
    let path = Path::new(DEFAULT_CONFIG_FILENAME);
    if path.exists() {
        load_file(path)
    } else {
        Ok(ToolConfig::default())
    }
}

/// Returns a fully-commented stock `upshrink.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# upshrink configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override config file values, which override these
# defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output bounding box
# ---------------------------------------------------------------------------
[limits]
# Compressed images fit within max_width x max_height, aspect ratio
# preserved. Images already inside the box are re-encoded at their
# original dimensions; nothing is ever upscaled.
max_width = 1920
max_height = 1080

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# Target format: "jpeg", "png", or "webp".
# jpeg output uses the short .jpg extension.
format = "jpeg"

# Encoding quality factor, 0.0 (worst) to 1.0 (best). JPEG only;
# png and webp output is lossless and ignores this.
quality = 0.8

# Directory compressed images are written into. Scanned directory trees
# keep their structure underneath it.
directory = "compressed"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel compression workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_jobs = 4
"##
}
