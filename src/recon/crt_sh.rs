//! Subdomain resolution via the crt.sh certificate-transparency log.

use crate::types::{HttpConfig, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// One crt.sh log entry. `name_value` holds one or more subject names
/// separated by newlines.
#[derive(Debug, Deserialize)]
struct CrtShEntry {
    name_value: String,
}

/// Resolves a domain into a deduplicated candidate host set.
pub struct SubdomainResolver {
    client: Client,
}

impl SubdomainResolver {
    /// Create a new resolver.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Resolve all known subdomains of `domain`.
    ///
    /// Queries crt.sh for certificates matching `%.<domain>`. The target
    /// domain itself is always part of the result, so the output is never
    /// empty. Any query, status, or parse failure is reported as a warning
    /// and the resolver falls back to the singleton `{domain}`.
    pub async fn resolve(&self, domain: &str) -> HashSet<String> {
        let mut hosts = HashSet::new();
        hosts.insert(domain.to_lowercase());

        match self.query_log(domain).await {
            Ok(entries) => {
                collect_hosts(&mut hosts, &entries, domain);
                debug!("crt.sh returned {} entries for {}", entries.len(), domain);
            }
            Err(e) => {
                warn!("crt.sh query failed for {}: {}; falling back to target only", domain, e);
            }
        }

        hosts
    }

    async fn query_log(&self, domain: &str) -> Result<Vec<CrtShEntry>> {
        let url = format!("https://crt.sh/?q=%.{}&output=json", domain);
        self.fetch_entries(&url).await
    }

    /// Issue the log query and decode the JSON entry list.
    ///
    /// 4xx/5xx statuses fail through `error_for_status`; any other
    /// non-success response (a redirect without a Location header, a stray
    /// 304) reaches the JSON decode, fails there, and is reported as an
    /// error rather than a panic.
    async fn fetch_entries(&self, url: &str) -> Result<Vec<CrtShEntry>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let entries = response.json::<Vec<CrtShEntry>>().await?;
        Ok(entries)
    }
}

/// Fold certificate subject names into the host set.
///
/// Names are split on newlines, trimmed, and lowercased. Wildcard entries
/// (`*.sub.example.com`) are dropped; so is anything that is not the target
/// domain or one of its subdomains.
fn collect_hosts(hosts: &mut HashSet<String>, entries: &[CrtShEntry], domain: &str) {
    let domain = domain.to_lowercase();
    let suffix = format!(".{}", domain);

    for entry in entries {
        for line in entry.name_value.lines() {
            let name = line.trim().to_lowercase();
            if name.is_empty() || name.starts_with('*') {
                continue;
            }
            if name == domain || name.ends_with(&suffix) {
                hosts.insert(name);
            }
        }
    }
}
