//! Configuration management and validation.
//!
//! Provides the importer configuration and its layered loading: an optional
//! JSON config file, then environment variables, then CLI overrides applied
//! by the caller.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_MAX_FILE_BYTES, ENV_DEFAULT_POPULATION_ID,
    ENV_MAX_FILE_BYTES, ENV_STRICT_QUOTES,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for one importer instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Maximum input size in bytes, checked before parsing
    pub max_file_bytes: u64,

    /// Reject lines that end inside a quoted field
    pub strict_quotes: bool,

    /// Population assigned to records that do not name one
    pub default_population_id: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            strict_quotes: false,
            default_population_id: None,
        }
    }
}

impl ImportConfig {
    /// Set the input size cap
    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Enable strict quote checking
    pub fn with_strict_quotes(mut self) -> Self {
        self.strict_quotes = true;
        self
    }

    /// Assign a population to records that lack one
    pub fn with_default_population(mut self, population_id: impl Into<String>) -> Self {
        self.default_population_id = Some(population_id.into());
        self
    }

    /// Default config file location (`<config dir>/bulk-user-import/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid config file {}", path.display()), e)
        })
    }

    /// Load configuration with layered approach (file -> env)
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!("Loaded import configuration: {:?}", config);
        Ok(config)
    }

    /// Apply overrides from environment variables
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_FILE_BYTES) {
            self.max_file_bytes = value.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_MAX_FILE_BYTES, value
                ))
            })?;
        }

        if let Some(value) = lookup(ENV_STRICT_QUOTES) {
            self.strict_quotes = match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(Error::configuration(format!(
                        "{} must be true or false, got '{}'",
                        ENV_STRICT_QUOTES, other
                    )));
                }
            };
        }

        if let Some(value) = lookup(ENV_DEFAULT_POPULATION_ID) {
            let trimmed = value.trim();
            self.default_population_id = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_file_bytes == 0 {
            return Err(Error::configuration(
                "max_file_bytes must be greater than 0".to_string(),
            ));
        }

        if let Some(population_id) = &self.default_population_id {
            if population_id.trim().is_empty() {
                return Err(Error::configuration(
                    "default_population_id cannot be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}
