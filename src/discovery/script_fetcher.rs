//! Script body fetcher: phase 2 of script discovery.

use crate::discovery::run_bounded;
use crate::types::{HttpConfig, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Content types that mark a response body as JavaScript.
const SCRIPT_CONTENT_TYPES: &[&str] = &[
    "application/javascript",
    "application/x-javascript",
    "text/javascript",
    "application/ecmascript",
    "text/ecmascript",
];

/// Fetches script bodies for discovered script URLs.
#[derive(Clone)]
pub struct ScriptFetcher {
    client: Client,
}

impl ScriptFetcher {
    /// Create a new fetcher.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch every script URL's body, keeping at most `concurrency`
    /// requests in flight.
    ///
    /// A body is kept only when the response's content-type header names a
    /// JavaScript payload; anything else is dropped silently, as are fetch
    /// failures. The returned map is keyed by script URL.
    pub async fn fetch_content(
        &self,
        urls: Vec<String>,
        concurrency: usize,
        abort: Arc<AtomicBool>,
        progress: Arc<AtomicUsize>,
    ) -> HashMap<String, String> {
        let fetcher = self.clone();
        let bodies: Vec<Option<(String, String)>> =
            run_bounded(urls, concurrency, abort, progress, move |url| {
                let fetcher = fetcher.clone();
                async move { fetcher.fetch_one(url).await }
            })
            .await;

        bodies.into_iter().flatten().collect()
    }

    /// Fetch one script URL. Returns `None` when the request fails, the
    /// status is not a success, or the content type is not script-like.
    async fn fetch_one(&self, url: String) -> Option<(String, String)> {
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                trace!("failed to fetch {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            trace!("{} answered {}", url, response.status());
            return None;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_script_content_type(&content_type) {
            trace!("dropping {} ({})", url, content_type);
            return None;
        }

        let body = response.text().await.ok()?;
        debug!("fetched {} ({} bytes)", url, body.len());
        Some((url, body))
    }
}

/// Whether a content-type header value declares a JavaScript payload.
fn is_script_content_type(value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    SCRIPT_CONTENT_TYPES.iter().any(|t| value.starts_with(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_content_types_accepted() {
        assert!(is_script_content_type("application/javascript"));
        assert!(is_script_content_type("text/javascript; charset=utf-8"));
        assert!(is_script_content_type("Application/X-JavaScript"));
    }

    #[test]
    fn test_non_script_content_types_rejected() {
        assert!(!is_script_content_type("text/html; charset=utf-8"));
        assert!(!is_script_content_type("application/json"));
        assert!(!is_script_content_type(""));
    }

    #[tokio::test]
    async fn test_failed_fetches_yield_empty_map() {
        let fetcher = ScriptFetcher::new(&HttpConfig {
            timeout_secs: 1,
            ..Default::default()
        })
        .unwrap();

        let progress = Arc::new(AtomicUsize::new(0));
        let contents = fetcher
            .fetch_content(
                vec![
                    "https://host.invalid/app.js".to_string(),
                    "https://other.invalid/app.js".to_string(),
                ],
                4,
                Arc::new(AtomicBool::new(false)),
                progress.clone(),
            )
            .await;

        assert!(contents.is_empty());
        // Failures still count as completed units.
        assert_eq!(progress.load(std::sync::atomic::Ordering::SeqCst), 2);
    }
}
