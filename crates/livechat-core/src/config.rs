use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Store settings read from `config.toml`.
///
/// Every field is optional in the file; missing keys take the defaults below.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the collection files. `None` means `./data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Pretty-print collection files (two-space indent).
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            pretty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: StoreConfig = toml::from_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert!(config.pretty);
    }

    #[test]
    fn test_partial_toml() {
        let config: StoreConfig = toml::from_str("data_dir = \"/var/lib/livechat\"").unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/livechat")));
        assert!(config.pretty);
    }
}
