//! Configuration management for Actionflow.
//!
//! Handles loading and saving client configuration from TOML files, with an
//! environment override for the backend URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "ACTIONFLOW_API_URL";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL.
    pub api_url: String,

    /// Timing parameters for the stores.
    pub timing: Timing,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), timing: Timing::default() }
    }
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

/// Timing parameters, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// How long a transient notification stays visible.
    pub display_duration_ms: u64,

    /// Per-index delay between assignee notification dispatches.
    pub stagger_delay_ms: u64,

    /// Quiet window after the last settings edit before persisting.
    pub save_debounce_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self { display_duration_ms: 2500, stagger_delay_ms: 500, save_debounce_ms: 1000 }
    }
}

impl Timing {
    /// Notification display duration.
    pub const fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_duration_ms)
    }

    /// Notification stagger delay.
    pub const fn stagger_delay(&self) -> Duration {
        Duration::from_millis(self.stagger_delay_ms)
    }

    /// Settings save debounce window.
    pub const fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid TOML.
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ClientConfig {
    /// Default config file location (`<config dir>/actionflow/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("actionflow").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// Reads the given file (or the default location) when it exists, falls
    /// back to defaults otherwise, then applies the `ACTIONFLOW_API_URL`
    /// environment override.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(ref p) if p.exists() => {
                let contents = std::fs::read_to_string(p)?;
                toml::from_str(&contents)?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }

        Ok(config)
    }

    /// Write this configuration to the given file, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
