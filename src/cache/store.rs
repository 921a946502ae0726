//! Cache generation storage
//!
//! A generation is a named collection of (request identity -> response)
//! entries. `ResourceCache` is the capability the worker is handed, so
//! tests can run against `MemoryResourceCache` instead of the disk.

use crate::cache::request::{CachedResponse, Method, RequestKey};
use crate::error::{DraftpadError, DraftpadResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;
use tracing::debug;

/// Storage capability for versioned cache generations
#[async_trait]
pub trait ResourceCache: Send + Sync {
    /// List all generation tags currently stored
    async fn list_generations(&self) -> DraftpadResult<Vec<String>>;

    /// Delete a generation and all its entries
    async fn remove_generation(&self, tag: &str) -> DraftpadResult<()>;

    /// Look up a response by its normalized request identity
    async fn get(&self, tag: &str, key: &RequestKey) -> DraftpadResult<Option<CachedResponse>>;

    /// Insert a response into a generation, overwriting any previous entry
    async fn put(&self, tag: &str, key: &RequestKey, response: &CachedResponse)
        -> DraftpadResult<()>;
}

/// In-memory cache for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryResourceCache {
    generations: Mutex<HashMap<String, HashMap<RequestKey, CachedResponse>>>,
}

impl MemoryResourceCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceCache for MemoryResourceCache {
    async fn list_generations(&self) -> DraftpadResult<Vec<String>> {
        let generations = self.generations.lock().expect("cache lock poisoned");
        let mut tags: Vec<String> = generations.keys().cloned().collect();
        tags.sort();
        Ok(tags)
    }

    async fn remove_generation(&self, tag: &str) -> DraftpadResult<()> {
        let mut generations = self.generations.lock().expect("cache lock poisoned");
        generations.remove(tag);
        Ok(())
    }

    async fn get(&self, tag: &str, key: &RequestKey) -> DraftpadResult<Option<CachedResponse>> {
        let generations = self.generations.lock().expect("cache lock poisoned");
        Ok(generations.get(tag).and_then(|g| g.get(key)).cloned())
    }

    async fn put(
        &self,
        tag: &str,
        key: &RequestKey,
        response: &CachedResponse,
    ) -> DraftpadResult<()> {
        let mut generations = self.generations.lock().expect("cache lock poisoned");
        generations
            .entry(tag.to_string())
            .or_default()
            .insert(key.clone(), response.clone());
        Ok(())
    }
}

/// Metadata sidecar stored next to each entry's body
#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    method: Method,
    url: String,
    content_type: String,
    cached_at: DateTime<Utc>,
}

/// Directory-backed cache: one subdirectory per generation, one
/// `.json` metadata + `.bin` body pair per entry. The body is written
/// first; a readable metadata file marks the entry committed.
pub struct DirResourceCache {
    root: PathBuf,
}

impl DirResourceCache {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn generation_dir(&self, tag: &str) -> DraftpadResult<PathBuf> {
        if !is_valid_tag(tag) {
            return Err(DraftpadError::InvalidGenerationTag(tag.to_string()));
        }
        Ok(self.root.join(tag))
    }

    fn entry_stem(key: &RequestKey) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.method.as_str().as_bytes());
        hasher.update(b" ");
        hasher.update(key.url.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..8])
    }
}

#[async_trait]
impl ResourceCache for DirResourceCache {
    async fn list_generations(&self) -> DraftpadResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(vec![]);
        }

        let mut tags = vec![];
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| DraftpadError::io("reading cache directory", e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DraftpadError::io("reading cache entry", e))?
        {
            let path = entry.path();
            if path.is_dir() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    tags.push(name.to_string());
                }
            }
        }

        tags.sort();
        Ok(tags)
    }

    async fn remove_generation(&self, tag: &str) -> DraftpadResult<()> {
        let dir = self.generation_dir(tag)?;
        if dir.exists() {
            fs::remove_dir_all(&dir).await.map_err(|e| {
                DraftpadError::io(format!("removing cache generation {}", dir.display()), e)
            })?;
            debug!("Removed cache generation: {}", tag);
        }
        Ok(())
    }

    async fn get(&self, tag: &str, key: &RequestKey) -> DraftpadResult<Option<CachedResponse>> {
        let dir = self.generation_dir(tag)?;
        let stem = Self::entry_stem(key);
        let meta_path = dir.join(format!("{stem}.json"));

        let meta_content = match fs::read_to_string(&meta_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DraftpadError::io(
                    format!("reading cache metadata {}", meta_path.display()),
                    e,
                ))
            }
        };

        let meta: EntryMeta = serde_json::from_str(&meta_content)?;

        // Truncated-hash collision check
        if meta.url != key.url || meta.method != key.method {
            return Ok(None);
        }

        let body_path = dir.join(format!("{stem}.bin"));
        let body = fs::read(&body_path).await.map_err(|e| {
            DraftpadError::io(format!("reading cache body {}", body_path.display()), e)
        })?;

        Ok(Some(CachedResponse {
            content_type: meta.content_type,
            body,
            cached_at: meta.cached_at,
        }))
    }

    async fn put(
        &self,
        tag: &str,
        key: &RequestKey,
        response: &CachedResponse,
    ) -> DraftpadResult<()> {
        let dir = self.generation_dir(tag)?;
        fs::create_dir_all(&dir).await.map_err(|e| {
            DraftpadError::io(format!("creating cache generation {}", dir.display()), e)
        })?;

        let stem = Self::entry_stem(key);
        let body_path = dir.join(format!("{stem}.bin"));
        let meta_path = dir.join(format!("{stem}.json"));

        fs::write(&body_path, &response.body).await.map_err(|e| {
            DraftpadError::io(format!("writing cache body {}", body_path.display()), e)
        })?;

        let meta = EntryMeta {
            method: key.method,
            url: key.url.clone(),
            content_type: response.content_type.clone(),
            cached_at: response.cached_at,
        };
        let meta_content = serde_json::to_string(&meta)?;
        fs::write(&meta_path, meta_content).await.map_err(|e| {
            DraftpadError::io(format!("writing cache metadata {}", meta_path.display()), e)
        })?;

        debug!("Cached {} in generation {}", key, tag);
        Ok(())
    }
}

/// Generation tags become directory names, so a tag that would change
/// under path resolution (separators, `..`, empty) is rejected rather
/// than rewritten. Rewriting would let two distinct tags collide on
/// disk while the worker tracks them by their original spelling.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag != "."
        && tag != ".."
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::request::FetchedAsset;
    use tempfile::TempDir;

    fn response(body: &str) -> CachedResponse {
        FetchedAsset {
            content_type: "text/plain".to_string(),
            body: body.as_bytes().to_vec(),
        }
        .into_cached()
    }

    #[tokio::test]
    async fn memory_cache_roundtrip() {
        let cache = MemoryResourceCache::new();
        let key = RequestKey::get("http://localhost/index.html");

        assert!(cache.get("v1", &key).await.unwrap().is_none());

        cache.put("v1", &key, &response("<html>")).await.unwrap();
        let hit = cache.get("v1", &key).await.unwrap().unwrap();
        assert_eq!(hit.body, b"<html>");

        // Entries are scoped to a generation
        assert!(cache.get("v2", &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_cache_generation_lifecycle() {
        let cache = MemoryResourceCache::new();
        let key = RequestKey::get("http://localhost/a");

        cache.put("v1", &key, &response("a")).await.unwrap();
        cache.put("v2", &key, &response("b")).await.unwrap();
        assert_eq!(cache.list_generations().await.unwrap(), vec!["v1", "v2"]);

        cache.remove_generation("v1").await.unwrap();
        assert_eq!(cache.list_generations().await.unwrap(), vec!["v2"]);
    }

    #[tokio::test]
    async fn dir_cache_roundtrip() {
        let temp = TempDir::new().unwrap();
        let cache = DirResourceCache::new(temp.path().to_path_buf());
        let key = RequestKey::get("http://localhost/styles.css");

        assert!(cache.get("v1", &key).await.unwrap().is_none());

        cache.put("v1", &key, &response("body{}")).await.unwrap();
        let hit = cache.get("v1", &key).await.unwrap().unwrap();
        assert_eq!(hit.body, b"body{}");
        assert_eq!(hit.content_type, "text/plain");
    }

    #[tokio::test]
    async fn dir_cache_overwrites_entry() {
        let temp = TempDir::new().unwrap();
        let cache = DirResourceCache::new(temp.path().to_path_buf());
        let key = RequestKey::get("http://localhost/index.html");

        cache.put("v1", &key, &response("old")).await.unwrap();
        cache.put("v1", &key, &response("new")).await.unwrap();

        let hit = cache.get("v1", &key).await.unwrap().unwrap();
        assert_eq!(hit.body, b"new");
    }

    #[tokio::test]
    async fn dir_cache_lists_and_removes_generations() {
        let temp = TempDir::new().unwrap();
        let cache = DirResourceCache::new(temp.path().to_path_buf());
        let key = RequestKey::get("http://localhost/a");

        cache.put("v1", &key, &response("a")).await.unwrap();
        cache.put("v2", &key, &response("a")).await.unwrap();
        assert_eq!(cache.list_generations().await.unwrap(), vec!["v1", "v2"]);

        cache.remove_generation("v1").await.unwrap();
        assert_eq!(cache.list_generations().await.unwrap(), vec!["v2"]);

        // Removing a missing generation is a no-op
        cache.remove_generation("v1").await.unwrap();
    }

    #[tokio::test]
    async fn dir_cache_empty_root_lists_nothing() {
        let temp = TempDir::new().unwrap();
        let cache = DirResourceCache::new(temp.path().join("missing"));
        assert!(cache.list_generations().await.unwrap().is_empty());
    }

    #[test]
    fn tag_validity() {
        assert!(is_valid_tag("v1"));
        assert!(is_valid_tag("pwa-editor_v2.1"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag(".."));
        assert!(!is_valid_tag("pwa-editor/v2"));
    }

    #[tokio::test]
    async fn dir_cache_rejects_path_like_tags() {
        let temp = TempDir::new().unwrap();
        let cache = DirResourceCache::new(temp.path().to_path_buf());
        let key = RequestKey::get("http://localhost/index.html");

        // A separator in the tag must not be rewritten into a different
        // directory name than the tag the worker tracks.
        let err = cache
            .put("pwa-editor/v2", &key, &response("<html>"))
            .await
            .unwrap_err();
        assert!(matches!(err, DraftpadError::InvalidGenerationTag(_)));

        let err = cache.get("../escape", &key).await.unwrap_err();
        assert!(matches!(err, DraftpadError::InvalidGenerationTag(_)));

        // Nothing was written
        assert!(cache.list_generations().await.unwrap().is_empty());
    }

    #[test]
    fn entry_stems_differ_by_method() {
        let get = DirResourceCache::entry_stem(&RequestKey::get("http://x/a"));
        let post = DirResourceCache::entry_stem(&RequestKey {
            method: Method::Post,
            url: "http://x/a".to_string(),
        });
        assert_ne!(get, post);
    }
}
