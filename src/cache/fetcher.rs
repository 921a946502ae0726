//! Network fetch capability for the cache worker
//!
//! The worker never talks to the network directly; it goes through an
//! `AssetFetcher` so tests can script responses and simulate outages.

use crate::cache::request::{FetchedAsset, Method, Request};
use crate::error::{DraftpadError, DraftpadResult};
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Network access capability
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Issue the request and return the response body
    async fn fetch(&self, request: &Request) -> DraftpadResult<FetchedAsset>;
}

/// Production fetcher backed by a blocking ureq agent.
///
/// ureq is synchronous, so each fetch runs on the blocking pool.
pub struct UreqFetcher {
    agent: ureq::Agent,
}

impl UreqFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    /// Fetcher with an explicit per-request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.new_agent(),
        }
    }
}

impl Default for UreqFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetFetcher for UreqFetcher {
    async fn fetch(&self, request: &Request) -> DraftpadResult<FetchedAsset> {
        let agent = self.agent.clone();
        let method = request.method;
        let url = request.url.clone();
        let accept = request.accept.clone();

        let result = tokio::task::spawn_blocking(move || fetch_blocking(&agent, method, &url, accept.as_deref()))
            .await
            .map_err(|e| DraftpadError::Internal(format!("fetch task failed: {e}")))?;

        result
    }
}

fn fetch_blocking(
    agent: &ureq::Agent,
    method: Method,
    url: &str,
    accept: Option<&str>,
) -> DraftpadResult<FetchedAsset> {
    let response = match method {
        Method::Get => {
            let mut req = agent.get(url);
            if let Some(accept) = accept {
                req = req.header("Accept", accept);
            }
            req.call()
        }
        Method::Head => agent.head(url).call(),
        Method::Delete => agent.delete(url).call(),
        Method::Post => agent.post(url).send_empty(),
        Method::Put => agent.put(url).send_empty(),
    }
    .map_err(|e| DraftpadError::network(url, e.to_string()))?;

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let body = response
        .into_body()
        .read_to_vec()
        .map_err(|e| DraftpadError::network(url, e.to_string()))?;

    Ok(FetchedAsset { content_type, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_unreachable_host_is_network_failure() {
        // Reserved TEST-NET-1 address, nothing listens there
        let fetcher = UreqFetcher::with_timeout(Duration::from_millis(200));
        let err = fetcher
            .fetch(&Request::get("http://192.0.2.1:9/index.html"))
            .await
            .unwrap_err();
        assert!(err.is_offline());
    }
}
