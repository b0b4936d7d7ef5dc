use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{
    APP_DIR_NAME, DEFAULT_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS, PREFERENCES_FILE_NAME,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Runtime knobs for the theme engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSyncConfig {
    /// Where preferences are persisted. `None` means the platform config dir.
    pub store_path: Option<PathBuf>,
    pub poll_interval_ms: u64,
}

impl Default for ThemeSyncConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ThemeSyncConfig {
    /// Load a JSON config file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Explicit store path, or the platform default if one can be determined.
    pub fn resolved_store_path(&self) -> Option<PathBuf> {
        self.store_path.clone().or_else(default_store_path)
    }
}

/// Platform-specific preferences file.
///
/// - macOS: `~/Library/Application Support/ThemeSync/preferences.json`
/// - Linux: `$XDG_CONFIG_HOME/ThemeSync/preferences.json`
/// - Windows: `%APPDATA%/ThemeSync/preferences.json`
pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME))
}
