//! Versioned asset cache for the offline application shell
//!
//! The worker owns a single cache generation named by a version tag and
//! intercepts every outgoing fetch, answering cache-first and falling
//! back to network. On activation it garbage-collects generations left
//! behind by older versions.
//!
//! # Lifecycle
//!
//! | Phase      | Meaning                                             |
//! |------------|-----------------------------------------------------|
//! | Installing | Generation not yet populated (all-or-nothing)       |
//! | Installed  | Fully populated, ready to take over immediately     |
//! | Activating | Pruning every generation that is not the current tag|
//! | Active     | Intercepts are served from this generation          |

pub mod fetcher;
pub mod request;
pub mod store;
pub mod worker;

pub use fetcher::{AssetFetcher, UreqFetcher};
pub use request::{resolve_url, AssetManifest, CachedResponse, FetchedAsset, Method, Request, RequestKey};
pub use store::{is_valid_tag, DirResourceCache, MemoryResourceCache, ResourceCache};
pub use worker::{CacheWorker, ServeSource, ServedResponse, WorkerPhase};
