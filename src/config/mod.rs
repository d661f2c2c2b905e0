//! Configuration management for Tarpon

pub mod schema;

pub use schema::Config;

use crate::error::{TarponError, TarponResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tarpon")
            .join("config.toml")
    }

    /// Default directory for the persistent metadata cache
    pub fn metadata_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tarpon")
            .join("metadata")
    }

    /// Load configuration, using defaults if no file exists
    pub async fn load(&self) -> TarponResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> TarponResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| TarponError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| TarponError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> TarponResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            TarponError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> TarponResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TarponError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the effective cache directory from config
pub fn cache_dir(config: &Config) -> PathBuf {
    config
        .cache
        .dir
        .clone()
        .unwrap_or_else(ConfigManager::metadata_cache_dir)
}

/// Resolve the effective download directory from config
pub fn download_dir(config: &Config) -> PathBuf {
    config
        .download
        .dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.registry.url, crate::registry::DEFAULT_REGISTRY);
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.registry.url = "https://registry.internal".to_string();

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.registry.url, "https://registry.internal");
    }

    #[tokio::test]
    async fn invalid_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "registry = not valid").unwrap();
        let manager = ConfigManager::with_path(path);

        assert!(matches!(
            manager.load().await,
            Err(TarponError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn effective_dirs_fall_back() {
        let config = Config::default();
        assert_eq!(cache_dir(&config), ConfigManager::metadata_cache_dir());
        assert_eq!(download_dir(&config), PathBuf::from("."));

        let mut config = Config::default();
        config.cache.dir = Some(PathBuf::from("/tmp/meta"));
        assert_eq!(cache_dir(&config), PathBuf::from("/tmp/meta"));
    }
}
