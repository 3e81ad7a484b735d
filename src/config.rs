//! Settings for the game binary.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`Settings::db_path`].
pub const DB_PATH_ENV: &str = "TALLY_TOE_DB";

/// Runtime settings, read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite file holding the scores.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// File the TUI logs to.
    #[serde(default = "default_log_file")]
    log_file: String,

    /// Play the confetti burst on a win.
    #[serde(default = "default_true")]
    confetti: bool,

    /// Ask before restarting a game or resetting scores.
    #[serde(default = "default_true")]
    confirm_destructive: bool,

    /// Frame interval for the TUI loop, in milliseconds.
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
}

fn default_db_path() -> String {
    "tally_toe.db".to_string()
}

fn default_log_file() -> String {
    "tally_toe.log".to_string()
}

fn default_true() -> bool {
    true
}

fn default_frame_ms() -> u64 {
    33
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_file: default_log_file(),
            confetti: true,
            confirm_destructive: true,
            frame_ms: default_frame_ms(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text. Missing keys take their defaults.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings = Self::from_toml(&content)?;
        info!(db_path = %settings.db_path, "Config loaded successfully");
        Ok(settings)
    }

    /// Loads settings from `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies the environment override for the database path.
    #[instrument(skip(self))]
    pub fn apply_env(self) -> Self {
        match std::env::var(DB_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                debug!(%path, "Database path overridden from environment");
                self.with_db_path(path)
            }
            _ => self,
        }
    }

    /// Replaces the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Frame interval as a [`Duration`], at least 1 ms.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let settings = Settings::from_toml("db_path = \"scores.db\"\nconfetti = false\n").unwrap();
        assert_eq!(settings.db_path(), "scores.db");
        assert!(!settings.confetti());
        assert!(*settings.confirm_destructive());
        assert_eq!(*settings.frame_ms(), 33);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let err = Settings::from_toml("frame_ms = \"fast\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_frame_interval_never_zero() {
        let settings = Settings::from_toml("frame_ms = 0").unwrap();
        assert_eq!(settings.frame_interval(), Duration::from_millis(1));
    }
}
