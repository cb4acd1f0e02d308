//! Tool configuration.
//!
//! Handles loading and validating `webshrink.toml`. Configuration is flat
//! and entirely optional: the tool runs with built-in defaults when no
//! file exists.
//!
//! ## Config File Location
//!
//! `--config <path>` points at an explicit file (missing file is an
//! error). Without the flag, `webshrink.toml` in the current directory is
//! used when present.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [processing]
//! max_workers = 4                 # Parallel workers for batch mode
//!                                 # (omit for auto = CPU cores)
//!
//! [batch]
//! extensions = ["jpg", "jpeg", "png", "tif", "tiff", "webp"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::supported_input_extensions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `webshrink.toml`.
///
/// All fields have sensible defaults. Config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
    /// Batch discovery settings.
    pub batch: BatchConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "batch.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers for batch mode.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Batch discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Input extensions eligible for batch discovery (case-insensitive).
    pub extensions: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: supported_input_extensions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load configuration.
///
/// An explicit path must exist and parse. With no path, `webshrink.toml`
/// in the current directory is used when present, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(p) => parse_file(p)?,
        None => {
            let default_path = Path::new("webshrink.toml");
            if default_path.exists() {
                parse_file(default_path)?
            } else {
                Config::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// A stock `webshrink.toml` with every option documented.
///
/// Commented-out values show the effective defaults; parsing this file
/// yields exactly `Config::default()`.
pub fn stock_config_toml() -> &'static str {
    r#"# webshrink configuration. All values are optional - defaults shown.

[processing]
# Maximum parallel workers for batch mode. Omit for auto (= CPU cores).
# Values above the core count are clamped down.
# max_workers = 4

[batch]
# Input extensions considered during batch discovery (case-insensitive).
extensions = ["jpg", "jpeg", "png", "tif", "tiff", "webp"]
"#
}
