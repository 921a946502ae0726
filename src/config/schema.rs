//! Configuration schema for draftpad
//!
//! Configuration is stored at `~/.config/draftpad/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Editor session settings
    pub editor: EditorConfig,

    /// Asset cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,

    /// Override the state directory (documents and cache live here).
    /// Defaults to the platform state dir when unset.
    pub state_dir: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
            state_dir: None,
        }
    }
}

/// Editor session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Enable debounced autosave
    pub autosave: bool,

    /// Autosave debounce delay in milliseconds
    pub autosave_delay_ms: u64,

    /// Key under which the document is persisted
    pub storage_key: String,

    /// Default filename for exported documents
    pub export_filename: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave: true,
            autosave_delay_ms: 800,
            storage_key: "pwa-editor-content-v1".to_string(),
            export_filename: "document.txt".to_string(),
        }
    }
}

/// Asset cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Version tag naming the current cache generation
    pub version_tag: String,

    /// Base URL the asset manifest paths are resolved against
    pub base_url: String,

    /// Root-relative paths that must all be fetchable at install time
    pub assets: Vec<String>,

    /// Root-relative path of the application shell document,
    /// served as the offline fallback for HTML navigations
    pub shell: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            version_tag: "v1".to_string(),
            base_url: "http://localhost:8080".to_string(),
            assets: vec![
                "/index.html".to_string(),
                "/styles.css".to_string(),
                "/manifest.webmanifest".to_string(),
                "/sw.js".to_string(),
                "/icons/icon-192.png".to_string(),
                "/icons/icon-512.png".to_string(),
            ],
            shell: "/index.html".to_string(),
        }
    }
}
