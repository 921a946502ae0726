//! Configuration management for draftpad

pub mod schema;

pub use schema::Config;

use crate::error::{DraftpadError, DraftpadResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_NAME: &str = ".draftpad.toml";

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
            .join("draftpad")
            .join("config.toml")
    }

    /// Get the default state directory path
    pub fn default_state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("draftpad")
    }

    /// Resolve the state directory, honoring the config override
    pub fn state_dir(config: &Config) -> PathBuf {
        config
            .general
            .state_dir
            .clone()
            .unwrap_or_else(Self::default_state_dir)
    }

    /// Get the documents directory path
    pub fn documents_dir(config: &Config) -> PathBuf {
        Self::state_dir(config).join("documents")
    }

    /// Get the asset cache directory path
    pub fn cache_dir(config: &Config) -> PathBuf {
        Self::state_dir(config).join("cache")
    }

    /// Path of the persisted document for the configured storage key
    pub fn document_path(config: &Config) -> PathBuf {
        Self::documents_dir(config).join(&config.editor.storage_key)
    }

    /// Load configuration, creating default if not exists
    pub async fn load(&self) -> DraftpadResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> DraftpadResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DraftpadError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| DraftpadError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load the global config and overlay a project-local file on top
    pub async fn load_merged(&self, local: Option<&Path>) -> DraftpadResult<Config> {
        let global = self.load().await?;

        let Some(local_path) = local else {
            return Ok(global);
        };

        let content = fs::read_to_string(local_path).await.map_err(|e| {
            DraftpadError::io(format!("reading config from {}", local_path.display()), e)
        })?;

        let local_value: toml::Value =
            toml::from_str(&content).map_err(|e| DraftpadError::ConfigInvalid {
                path: local_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut merged = toml::Value::try_from(&global)?;
        overlay(&mut merged, local_value);

        merged
            .try_into()
            .map_err(|e: toml::de::Error| DraftpadError::ConfigInvalid {
                path: local_path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Walk up from `start` looking for a project-local config file
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        let mut dir = Some(start);
        while let Some(current) = dir {
            let candidate = current.join(LOCAL_CONFIG_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = current.parent();
        }
        None
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> DraftpadResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            DraftpadError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> DraftpadResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DraftpadError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Ensure all state directories exist
    pub async fn ensure_state_dirs(config: &Config) -> DraftpadResult<()> {
        let dirs = [Self::documents_dir(config), Self::cache_dir(config)];

        for dir in &dirs {
            fs::create_dir_all(dir).await.map_err(|e| {
                DraftpadError::io(format!("creating directory {}", dir.display()), e)
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

/// Recursively overlay `patch` onto `base`; tables merge key-wise,
/// everything else replaces wholesale.
fn overlay(base: &mut toml::Value, patch: toml::Value) {
    match (base, patch) {
        (toml::Value::Table(base_table), toml::Value::Table(patch_table)) => {
            for (key, value) in patch_table {
                match base_table.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base_slot, replacement) => *base_slot = replacement,
    }
}
