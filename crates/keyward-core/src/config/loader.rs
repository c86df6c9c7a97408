//! Configuration loading and persistence.

use super::{BackendKind, Config};
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::Path;
use tracing::warn;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Some(file) = &self.logging.file {
            if file.as_os_str().is_empty() {
                errors.push("logging.file must not be empty".to_string());
            } else if file.is_dir() {
                errors.push(format!(
                    "logging.file points at a directory: {}",
                    file.display()
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Load the default config file, falling back to defaults when it is
    /// missing or unreadable. Environment overrides are applied either way.
    pub fn load_or_default() -> Self {
        let mut config = match Self::load_default() {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Self::default(),
            Err(e) => {
                warn!("ignoring unreadable config file: {e}");
                Self::default()
            }
        };
        config.apply_env_overrides();
        config
    }

    /// Apply `KEYWARD_*` environment overrides on top of this configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = env::get_var(env::vars::KEYWARD_BACKEND) {
            match value.parse::<BackendKind>() {
                Ok(kind) => self.store.backend = kind,
                Err(e) => warn!("ignoring {}: {e}", env::vars::KEYWARD_BACKEND),
            }
        }
    }
}
