//! Error types for draftpad
//!
//! All modules use `DraftpadResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for draftpad operations
pub type DraftpadResult<T> = Result<T, DraftpadError>;

/// All errors that can occur in draftpad
#[derive(Error, Debug)]
pub enum DraftpadError {
    // Document errors
    #[error("File is not valid UTF-8 text: {0}")]
    DecodeFailure(String),

    // Network and cache errors
    #[error("Network request failed: {url}: {reason}")]
    NetworkFailure { url: String, reason: String },

    #[error("Cache generation not found: {0}")]
    GenerationNotFound(String),

    #[error("Invalid cache generation tag: {0:?}")]
    InvalidGenerationTag(String),

    #[error("Cache worker is {phase}, cannot {operation}")]
    WorkerPhase {
        operation: &'static str,
        phase: String,
    },

    // Install flow errors
    #[error("Install prompt failed: {0}")]
    InstallFlow(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl DraftpadError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a network failure for a URL
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NetworkFailure {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error indicates the network is unreachable
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NetworkFailure { .. } => {
                Some("Check connectivity, or warm the cache with: draftpad cache warm")
            }
            Self::DecodeFailure(_) => Some("Only plain-text files can be opened"),
            Self::GenerationNotFound(_) => Some("Run: draftpad cache warm"),
            Self::InvalidGenerationTag(_) => {
                Some("Tags may contain only letters, digits, '-', '_' and '.'")
            }
            _ => None,
        }
    }
}
