//! Cache worker lifecycle state machine
//!
//! Models the three worker entry points (install, activate, intercept)
//! as one explicit state machine so the ordering invariant — old
//! generations are pruned before the new one takes over — is a checked
//! transition rather than an implicit callback order.

use crate::cache::fetcher::AssetFetcher;
use crate::cache::request::{
    resolve_url, AssetManifest, CachedResponse, FetchedAsset, Request, RequestKey,
};
use crate::cache::store::ResourceCache;
use crate::error::{DraftpadError, DraftpadResult};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Worker lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Generation not yet populated
    Installing,
    /// Generation fully populated, ready to take over immediately
    Installed,
    /// Pruning stale generations
    Activating,
    /// Serving intercepts from the current generation
    Active,
}

impl fmt::Display for WorkerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installing => write!(f, "installing"),
            Self::Installed => write!(f, "installed"),
            Self::Activating => write!(f, "activating"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// Where an intercepted response was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeSource {
    Cache,
    Network,
    /// Cached shell document substituted for a failed HTML navigation
    Fallback,
}

/// The response handed back to the intercept caller
#[derive(Debug, Clone)]
pub struct ServedResponse {
    pub source: ServeSource,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl ServedResponse {
    fn cached(source: ServeSource, response: CachedResponse) -> Self {
        Self {
            source,
            content_type: response.content_type,
            body: response.body,
        }
    }

    fn network(asset: FetchedAsset) -> Self {
        Self {
            source: ServeSource::Network,
            content_type: asset.content_type,
            body: asset.body,
        }
    }
}

/// The asset-caching worker: owns one versioned generation and answers
/// intercepted fetches cache-first.
pub struct CacheWorker {
    tag: String,
    base_url: String,
    manifest: AssetManifest,
    cache: Arc<dyn ResourceCache>,
    fetcher: Arc<dyn AssetFetcher>,
    phase: WorkerPhase,
}

impl CacheWorker {
    /// A fresh worker that still has to populate its generation
    pub fn new(
        tag: impl Into<String>,
        base_url: impl Into<String>,
        manifest: AssetManifest,
        cache: Arc<dyn ResourceCache>,
        fetcher: Arc<dyn AssetFetcher>,
    ) -> Self {
        Self {
            tag: tag.into(),
            base_url: base_url.into(),
            manifest,
            cache,
            fetcher,
            phase: WorkerPhase::Installing,
        }
    }

    /// Attach to existing storage: if this worker's generation is
    /// already populated the install step is complete.
    pub async fn attach(
        tag: impl Into<String>,
        base_url: impl Into<String>,
        manifest: AssetManifest,
        cache: Arc<dyn ResourceCache>,
        fetcher: Arc<dyn AssetFetcher>,
    ) -> DraftpadResult<Self> {
        let mut worker = Self::new(tag, base_url, manifest, cache, fetcher);
        let generations = worker.cache.list_generations().await?;
        if generations.iter().any(|g| g == &worker.tag) {
            worker.phase = WorkerPhase::Installed;
        }
        Ok(worker)
    }

    pub fn phase(&self) -> WorkerPhase {
        self.phase
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Absolute URL of the shell document
    pub fn shell_url(&self) -> String {
        resolve_url(&self.base_url, self.manifest.shell())
    }

    /// Populate a new generation with every manifest asset.
    ///
    /// All-or-nothing: every asset is fetched before anything is
    /// written, and a partially written generation is removed on a
    /// write failure, so no partial generation is ever left current.
    /// The platform (or the user) retries a failed install by calling
    /// again.
    pub async fn install(&mut self) -> DraftpadResult<()> {
        self.install_with(|_| {}).await
    }

    /// Like [`install`](Self::install), invoking `on_asset` with each
    /// manifest path as its fetch completes.
    pub async fn install_with<F>(&mut self, mut on_asset: F) -> DraftpadResult<()>
    where
        F: FnMut(&str),
    {
        if self.phase != WorkerPhase::Installing {
            return Err(DraftpadError::WorkerPhase {
                operation: "install",
                phase: self.phase.to_string(),
            });
        }

        let mut fetched = Vec::with_capacity(self.manifest.len());
        for path in self.manifest.assets() {
            let url = resolve_url(&self.base_url, path);
            let request = Request::get(&url);
            let asset = self.fetcher.fetch(&request).await?;
            debug!("Fetched {} ({} bytes)", url, asset.body.len());
            on_asset(path);
            fetched.push((request.key(), asset.into_cached()));
        }

        for (key, response) in &fetched {
            if let Err(e) = self.cache.put(&self.tag, key, response).await {
                if let Err(cleanup) = self.cache.remove_generation(&self.tag).await {
                    warn!("Failed to clean up partial generation: {}", cleanup);
                }
                return Err(e);
            }
        }

        self.phase = WorkerPhase::Installed;
        info!(
            "Installed cache generation {} ({} assets)",
            self.tag,
            fetched.len()
        );
        Ok(())
    }

    /// Prune every generation that is not this worker's, then take
    /// over. Idempotent: activating an already-active worker is a
    /// no-op. This is the sole mutation point for generation
    /// lifecycle.
    pub async fn activate(&mut self) -> DraftpadResult<Vec<String>> {
        match self.phase {
            WorkerPhase::Active => return Ok(vec![]),
            WorkerPhase::Installed => {}
            WorkerPhase::Installing | WorkerPhase::Activating => {
                return Err(DraftpadError::WorkerPhase {
                    operation: "activate",
                    phase: self.phase.to_string(),
                });
            }
        }

        self.phase = WorkerPhase::Activating;

        let mut pruned = vec![];
        for tag in self.cache.list_generations().await? {
            if tag != self.tag {
                self.cache.remove_generation(&tag).await?;
                info!("Pruned stale cache generation: {}", tag);
                pruned.push(tag);
            }
        }

        self.phase = WorkerPhase::Active;
        info!("Cache generation {} is active", self.tag);
        Ok(pruned)
    }

    /// Answer an intercepted fetch.
    ///
    /// Non-GET requests bypass the cache entirely. GETs are served
    /// cache-first; on a miss the network response is returned to the
    /// caller while an independent copy is written to the cache as a
    /// fire-and-forget task whose failure is swallowed. A failed GET
    /// whose Accept header asks for HTML falls back to the cached
    /// shell document.
    pub async fn intercept(&self, request: &Request) -> DraftpadResult<ServedResponse> {
        if self.phase != WorkerPhase::Active {
            return Err(DraftpadError::WorkerPhase {
                operation: "intercept",
                phase: self.phase.to_string(),
            });
        }

        if !request.method.is_cacheable() {
            let asset = self.fetcher.fetch(request).await?;
            return Ok(ServedResponse::network(asset));
        }

        let key = request.key();

        // A broken cache degrades to a plain network-dependent page,
        // it never fails the request.
        let hit = match self.cache.get(&self.tag, &key).await {
            Ok(hit) => hit,
            Err(e) => {
                debug!("Cache lookup failed for {}: {}", key, e);
                None
            }
        };
        if let Some(response) = hit {
            debug!("Cache hit: {}", key);
            return Ok(ServedResponse::cached(ServeSource::Cache, response));
        }

        match self.fetcher.fetch(request).await {
            Ok(asset) => {
                let copy = asset.clone().into_cached();
                let cache = Arc::clone(&self.cache);
                let tag = self.tag.clone();
                tokio::spawn(async move {
                    if let Err(e) = cache.put(&tag, &key, &copy).await {
                        debug!("Dropped cache write for {}: {}", key, e);
                    }
                });
                Ok(ServedResponse::network(asset))
            }
            Err(err) => {
                if request.wants_html() {
                    let shell_key = RequestKey::get(self.shell_url());
                    if let Ok(Some(shell)) = self.cache.get(&self.tag, &shell_key).await {
                        info!("Serving cached shell as offline fallback for {}", request.url);
                        return Ok(ServedResponse::cached(ServeSource::Fallback, shell));
                    }
                }
                Err(err)
            }
        }
    }
}
