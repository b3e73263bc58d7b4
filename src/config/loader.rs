use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::auth::validation::is_plausible_email;
use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/authflow/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("authflow").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise behaves like [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads, parses and validates the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The minimum password length is at least one character
    /// - Seeded accounts have valid, unique emails and long enough passwords
    /// - Seeded reset codes are non-empty and unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        let auth = &self.auth;
        if auth.min_password_length == 0 {
            return Err(ConfigError::ValidationError {
                message: "min_password_length must be at least 1".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for account in &auth.accounts {
            if !is_plausible_email(&account.email) {
                return Err(ConfigError::ValidationError {
                    message: format!("Account email '{}' is not valid", account.email),
                });
            }
            if !seen.insert(account.email.to_lowercase()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Account email '{}' is configured twice", account.email),
                });
            }
            if account.password.chars().count() < auth.min_password_length {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "Password for '{}' is shorter than {} characters",
                        account.email, auth.min_password_length
                    ),
                });
            }
        }

        let mut codes = HashSet::new();
        for reset in &auth.reset_codes {
            if reset.code.is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Reset codes must not be empty".to_string(),
                });
            }
            if !codes.insert(reset.code.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Reset code '{}' is configured twice", reset.code),
                });
            }
            if !seen.contains(&reset.email.to_lowercase()) {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "Reset code '{}' points at unknown account '{}'",
                        reset.code, reset.email
                    ),
                });
            }
        }

        Ok(())
    }
}
