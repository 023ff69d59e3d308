//! Loads the store configuration from `config.toml`.

use std::fs;
use std::path::Path;

use livechat_core::config::StoreConfig;
use livechat_core::error::{Result, StoreError};

use crate::paths::LiveChatPaths;

pub struct ConfigService;

impl ConfigService {
    /// Loads the config from the default location.
    ///
    /// A missing config directory or file yields the default config.
    pub fn load_default() -> Result<StoreConfig> {
        match LiveChatPaths::config_file() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!("Config location unavailable, using defaults: {}", e);
                Ok(StoreConfig::default())
            }
        }
    }

    /// Loads the config from `path`.
    ///
    /// # Returns
    ///
    /// - `Ok(StoreConfig::default())`: File does not exist
    /// - `Ok(config)`: File parsed
    /// - `Err(StoreError::Config)`: File unreadable or not valid TOML
    pub fn load_from(path: &Path) -> Result<StoreConfig> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(StoreConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::config(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            StoreError::config(format!("Failed to parse '{}': {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}
