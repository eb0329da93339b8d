//! Host root-page crawler: phase 1 of script discovery.

use crate::discovery::run_bounded;
use crate::types::{HttpConfig, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Crawls candidate host root pages and collects script source URLs.
#[derive(Clone)]
pub struct PageCrawler {
    client: Client,
}

impl PageCrawler {
    /// Create a new crawler.
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

    /// Discover script URLs across all hosts, with at most `concurrency`
    /// pages in flight.
    ///
    /// Each host contributes the `src` of every script tag on its root page,
    /// resolved against the final post-redirect URL. A host that times out,
    /// refuses the connection, or serves unparseable HTML contributes
    /// nothing; discovery never aborts because one host is unreachable.
    pub async fn discover_script_urls(
        &self,
        hosts: Vec<String>,
        concurrency: usize,
        abort: Arc<AtomicBool>,
        progress: Arc<AtomicUsize>,
    ) -> HashSet<String> {
        let crawler = self.clone();
        let per_host: Vec<Vec<String>> = run_bounded(hosts, concurrency, abort, progress, move |host| {
            let crawler = crawler.clone();
            async move { crawler.crawl_host(&host).await.unwrap_or_default() }
        })
        .await;

        merge_script_urls(per_host)
    }

    /// Fetch one host's root page and extract its script URLs.
    ///
    /// Returns `None` on any failure; the caller treats that as an empty
    /// contribution.
    async fn crawl_host(&self, host: &str) -> Option<Vec<String>> {
        let page_url = format!("https://{}/", host);
        let response = match self.client.get(&page_url).send().await {
            Ok(r) => r,
            Err(e) => {
                trace!("failed to reach {}: {}", host, e);
                return None;
            }
        };

        if !response.status().is_success() {
            trace!("{} answered {}", host, response.status());
            return None;
        }

        // Script srcs resolve relative to where the redirect chain landed,
        // not the URL we asked for.
        let final_url = response.url().clone();
        let body = response.text().await.ok()?;

        let urls = extract_script_urls(&body, &final_url);
        debug!("{}: {} script tags", host, urls.len());
        Some(urls)
    }
}

/// Merge per-host script URL lists into one deduplicated set.
///
/// A script referenced from several host pages enters the fetch phase once.
fn merge_script_urls(per_host: Vec<Vec<String>>) -> HashSet<String> {
    per_host.into_iter().flatten().collect()
}

/// Pull every script tag's `src` out of an HTML document, resolved to an
/// absolute URL against `base`.
fn extract_script_urls(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("script[src]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .filter_map(|src| base.join(src.trim()).ok())
        .map(|url| url.to_string())
        .collect()
}
