//! Path resolution for the config file and the data directory.

use std::env;
use std::path::PathBuf;

use livechat_core::config::StoreConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LIVECHAT_DATA_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
    /// Current working directory is unavailable.
    CurrentDirUnavailable(std::io::Error),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::CurrentDirUnavailable(e) => {
                write!(f, "Cannot determine current directory: {}", e)
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Path management for livechat.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/livechat/          # Config directory (platform specific)
/// └── config.toml              # Optional store configuration
///
/// ./data/                      # Default data directory
/// ├── chats.json
/// ├── messages.json
/// ├── ...
/// └── analytics.json
/// ```
pub struct LiveChatPaths;

impl LiveChatPaths {
    /// Returns the livechat configuration directory (e.g. `~/.config/livechat/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("livechat"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns `./data` relative to the current working directory.
    pub fn default_data_dir() -> Result<PathBuf, PathError> {
        env::current_dir()
            .map(|cwd| cwd.join("data"))
            .map_err(PathError::CurrentDirUnavailable)
    }

    /// Resolves the data directory.
    ///
    /// Order: `explicit` argument, then `LIVECHAT_DATA_DIR`, then
    /// `data_dir` from the config, then `./data`.
    pub fn resolve_data_dir(
        explicit: Option<PathBuf>,
        config: &StoreConfig,
    ) -> Result<PathBuf, PathError> {
        let from_env = env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::resolve_data_dir_with(explicit, from_env, config)
    }

    fn resolve_data_dir_with(
        explicit: Option<PathBuf>,
        from_env: Option<PathBuf>,
        config: &StoreConfig,
    ) -> Result<PathBuf, PathError> {
        if let Some(dir) = explicit.or(from_env).or_else(|| config.data_dir.clone()) {
            return Ok(dir);
        }
        Self::default_data_dir()
    }
}
