//! Optional daemon configuration loaded from `~/.laptop-daemon/config.toml`.
//!
//! Every field has a default, so a missing file or a missing table is not an
//! error. A different file can be selected with `--config`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum UserConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Default number of search results buffered ahead of a slow client.
pub const DEFAULT_STREAM_BUFFER: usize = 16;

/// `[search]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Capacity of the channel between the store scan and the response
    /// stream. The scan blocks, holding the store's read lock, while it is
    /// full.
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,
}

fn default_stream_buffer() -> usize {
    DEFAULT_STREAM_BUFFER
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stream_buffer: DEFAULT_STREAM_BUFFER,
        }
    }
}

impl SearchConfig {
    /// The configured buffer, never less than one.
    #[must_use]
    pub fn effective_stream_buffer(&self) -> usize {
        self.stream_buffer.max(1)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub search: SearchConfig,
}

/// Default config location, next to the default log directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".laptop-daemon").join("config.toml"))
}

/// Load the config from `path`, or from [`user_config_path`] when `None`.
///
/// Returns the defaults when the file does not exist.
pub fn load_user_config(path: Option<&Path>) -> Result<UserConfig, UserConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(user_config_path) {
        Some(p) => p,
        None => {
            debug!("No home directory; using default config");
            return Ok(UserConfig::default());
        }
    };

    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config: UserConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
