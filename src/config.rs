//! TOML-backed application settings.
//!
//! The settings file lives under the `.donorsight` app directory and carries
//! the dataset location plus the two behavior knobs that historically varied
//! between deployments: how strictly form input is validated and how the
//! prediction is worded. A missing file yields defaults; a malformed file is
//! a startup error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::app_dirs;

/// Name of the settings file inside the app directory.
pub const CONFIG_FILE_NAME: &str = "settings.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be resolved or created.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the settings file.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the settings file as TOML.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// How strictly the donor form input is checked before prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Non-negative numbers; whole numbers required for the month/count fields.
    Numeric,
    /// Every field must be a plain unsigned digit string.
    DigitsOnly,
}

/// How the prediction is worded in the result label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// A percentage likelihood of donating again.
    Probability,
    /// A fixed likely/unlikely verdict.
    Verdict,
}

/// Application settings loaded at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the donation dataset file.
    pub dataset_path: PathBuf,
    /// Validation strictness for the donor form.
    pub validation_mode: ValidationMode,
    /// Wording of the prediction result.
    pub output_format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("assets/transfusion.data"),
            validation_mode: ValidationMode::Numeric,
            output_format: OutputFormat::Probability,
        }
    }
}

/// Resolve the configuration file path, ensuring the app directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_from(&path)
}

/// Load configuration from an explicit settings file path.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
