//! Document persistence
//!
//! The session writes through a `DocumentStore` capability: one fixed
//! key, UTF-8 content, absent entry means empty document. The file
//! implementation stands in for browser-local storage; the memory
//! implementation backs tests.

use crate::error::{DraftpadError, DraftpadResult};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;
use tracing::debug;

/// Persistence capability for the single document
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the persisted content; `None` when no entry exists
    async fn load(&self) -> DraftpadResult<Option<String>>;

    /// Overwrite the persisted content unconditionally
    async fn save(&self, content: &str) -> DraftpadResult<()>;

    /// Delete the entry entirely (distinct from saving an empty string)
    async fn clear(&self) -> DraftpadResult<()>;
}

/// File-backed store: one file per installation, written
/// temp-then-rename so a partial write is never observable.
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn load(&self) -> DraftpadResult<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DraftpadError::io(
                format!("reading document {}", self.path.display()),
                e,
            )),
        }
    }

    async fn save(&self, content: &str) -> DraftpadResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DraftpadError::io("creating documents directory", e))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| DraftpadError::io(format!("writing document {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DraftpadError::io(format!("committing document {}", self.path.display()), e))?;

        debug!("Persisted {} bytes to {}", content.len(), self.path.display());
        Ok(())
    }

    async fn clear(&self) -> DraftpadResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Deleted document {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DraftpadError::io(
                format!("deleting document {}", self.path.display()),
                e,
            )),
        }
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryDocumentStore {
    entry: Mutex<Option<String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry currently exists (saved empty string counts)
    pub fn has_entry(&self) -> bool {
        self.entry.lock().expect("store lock poisoned").is_some()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn load(&self) -> DraftpadResult<Option<String>> {
        Ok(self.entry.lock().expect("store lock poisoned").clone())
    }

    async fn save(&self, content: &str) -> DraftpadResult<()> {
        *self.entry.lock().expect("store lock poisoned") = Some(content.to_string());
        Ok(())
    }

    async fn clear(&self) -> DraftpadResult<()> {
        *self.entry.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}
