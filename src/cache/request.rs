//! Request identity and asset types for the cache worker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of an intercepted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Only idempotent GET requests are ever cached
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request as seen by the intercept hook
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// `Accept` header, when the caller sent one
    pub accept: Option<String>,
}

impl Request {
    /// Build a GET request with no Accept header
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            accept: None,
        }
    }

    /// Build a request with an explicit method
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            accept: None,
        }
    }

    /// Attach an Accept header
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Normalized identity used as the cache lookup key
    pub fn key(&self) -> RequestKey {
        RequestKey {
            method: self.method,
            url: self.url.clone(),
        }
    }

    /// Whether the Accept header indicates an HTML navigation
    pub fn wants_html(&self) -> bool {
        self.accept
            .as_deref()
            .is_some_and(|a| a.contains("text/html"))
    }
}

/// The (method, absolute URL) pair keying cache entries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    pub method: Method,
    pub url: String,
}

impl RequestKey {
    /// Key for a GET of the given URL
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Response bytes fetched from the network, not yet cached
#[derive(Debug, Clone)]
pub struct FetchedAsset {
    pub content_type: String,
    pub body: Vec<u8>,
}

impl FetchedAsset {
    /// Make an independent cache-store copy of this response
    pub fn into_cached(self) -> CachedResponse {
        CachedResponse {
            content_type: self.content_type,
            body: self.body,
            cached_at: Utc::now(),
        }
    }
}

/// A response entry stored in a cache generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub content_type: String,
    pub body: Vec<u8>,
    pub cached_at: DateTime<Utc>,
}

/// Ordered list of root-relative assets that must all be fetchable
/// at install time, plus the shell document used as offline fallback.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    assets: Vec<String>,
    shell: String,
}

impl AssetManifest {
    pub fn new(assets: Vec<String>, shell: impl Into<String>) -> Self {
        Self {
            assets,
            shell: shell.into(),
        }
    }

    /// Root-relative asset paths, in install order
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Root-relative path of the shell document
    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Resolve a root-relative path against a base URL
pub fn resolve_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_get_is_cacheable() {
        assert!(Method::Get.is_cacheable());
        assert!(!Method::Head.is_cacheable());
        assert!(!Method::Post.is_cacheable());
        assert!(!Method::Put.is_cacheable());
        assert!(!Method::Delete.is_cacheable());
    }

    #[test]
    fn request_key_identity() {
        let a = Request::get("http://localhost/app.css").key();
        let b = RequestKey::get("http://localhost/app.css");
        assert_eq!(a, b);

        let c = Request::new(Method::Post, "http://localhost/app.css").key();
        assert_ne!(a, c);
    }

    #[test]
    fn wants_html_checks_accept() {
        let nav = Request::get("http://localhost/").with_accept("text/html,application/xhtml+xml");
        assert!(nav.wants_html());

        let css = Request::get("http://localhost/app.css").with_accept("text/css");
        assert!(!css.wants_html());

        let bare = Request::get("http://localhost/app.css");
        assert!(!bare.wants_html());
    }

    #[test]
    fn resolve_url_joins_slashes() {
        assert_eq!(
            resolve_url("http://localhost:8080/", "/index.html"),
            "http://localhost:8080/index.html"
        );
        assert_eq!(
            resolve_url("http://localhost:8080", "index.html"),
            "http://localhost:8080/index.html"
        );
    }

    #[test]
    fn manifest_order_preserved() {
        let manifest = AssetManifest::new(
            vec!["/index.html".to_string(), "/styles.css".to_string()],
            "/index.html",
        );
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.assets()[0], "/index.html");
        assert_eq!(manifest.shell(), "/index.html");
    }
}
