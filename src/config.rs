use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = ".storefront/config.yml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
}

/// Where and how the review collection is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the JSON storage files
    pub dir: PathBuf,
    /// Storage key of the serialized review array
    pub key: String,
    pub on_corrupt: CorruptionPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".storefront"),
            key: "dnj-reviews".to_string(),
            on_corrupt: CorruptionPolicy::default(),
        }
    }
}

/// What `load` does when the persisted collection can't be read or parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionPolicy {
    /// Log and show the default sample reviews
    #[default]
    Fallback,
    /// Surface a store error to the caller
    Error,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Load configuration from the default location (.storefront/config.yml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.key, "dnj-reviews");
        assert_eq!(config.store.dir, PathBuf::from(".storefront"));
        assert_eq!(config.store.on_corrupt, CorruptionPolicy::Fallback);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
store:
  dir: /var/lib/storefront
  on_corrupt: error
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.store.dir, PathBuf::from("/var/lib/storefront"));
        assert_eq!(config.store.on_corrupt, CorruptionPolicy::Error);
        // Unset fields keep their defaults
        assert_eq!(config.store.key, "dnj-reviews");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path().join("nope.yml")).unwrap();
        assert_eq!(config.store.key, "dnj-reviews");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "store:\n  key: shop-reviews\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.store.key, "shop-reviews");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "store: [unterminated").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
