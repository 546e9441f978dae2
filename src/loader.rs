//! Static feed loader.
//!
//! One fetch per view mount, no caching. Every failure (transport, status,
//! JSON, non-array body) collapses into an empty collection; callers only
//! ever see `Vec<NewsItem>`.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::counter;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::model::{normalize, NewsItem, RawNewsItem};
use crate::telemetry::{ITEMS_LOADED_TOTAL, LOAD_FAILURES_TOTAL, LOAD_TOTAL};

/// Anything that can hand back the raw feed body.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_body(&self) -> Result<String>;
    /// Location for diagnostics.
    fn location(&self) -> &str;
}

/// Fetches the feed over HTTP, bypassing caches.
pub struct HttpFetcher {
    url: String,
    client: Client,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building http client")?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_body(&self) -> Result<String> {
        let rsp = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .with_context(|| format!("GET {}", self.url))?;
        let rsp = rsp
            .error_for_status()
            .map_err(|e| anyhow!("feed HTTP error: {e}"))?;
        rsp.text().await.context("reading feed body")
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// Reads the feed from disk on every fetch.
pub struct FileFetcher {
    path: PathBuf,
    display: String,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl ResourceFetcher for FileFetcher {
    async fn fetch_body(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading feed from {}", self.display))
    }

    fn location(&self) -> &str {
        &self.display
    }
}

/// In-memory body, for tests and demos.
pub struct FixtureFetcher {
    body: String,
}

impl FixtureFetcher {
    pub fn from_fixture(content: &str) -> Self {
        Self {
            body: content.to_string(),
        }
    }
}

#[async_trait]
impl ResourceFetcher for FixtureFetcher {
    async fn fetch_body(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn location(&self) -> &str {
        "fixture"
    }
}

/// `http(s)://` locations go over the network, anything else is a file path.
pub fn fetcher_for(resource: &str, timeout: Duration) -> Result<Box<dyn ResourceFetcher>> {
    let lower = resource.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(Box::new(HttpFetcher::new(resource, timeout)?))
    } else {
        Ok(Box::new(FileFetcher::new(resource)))
    }
}

/// Parse a feed body. Non-array JSON yields an empty list; array elements that
/// are not objects are skipped.
pub fn parse_feed(body: &str) -> Result<Vec<NewsItem>> {
    let value: Value = serde_json::from_str(body).context("parsing feed json")?;
    let Value::Array(entries) = value else {
        tracing::warn!("feed is not a JSON array; treating as empty");
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::debug!(index = idx, "skipping non-object feed entry");
            continue;
        }
        match serde_json::from_value::<RawNewsItem>(entry) {
            Ok(raw) => out.push(normalize(raw)),
            Err(e) => tracing::debug!(index = idx, error = %e, "skipping malformed feed entry"),
        }
    }
    Ok(out)
}

/// Fetch and parse once. Never fails: errors are logged and become `[]`.
pub async fn load_news(fetcher: &dyn ResourceFetcher) -> Vec<NewsItem> {
    counter!(LOAD_TOTAL).increment(1);

    let result = match fetcher.fetch_body().await {
        Ok(body) => parse_feed(&body),
        Err(e) => Err(e),
    };

    match result {
        Ok(items) => {
            counter!(ITEMS_LOADED_TOTAL).increment(items.len() as u64);
            tracing::info!(location = fetcher.location(), items = items.len(), "feed loaded");
            items
        }
        Err(e) => {
            counter!(LOAD_FAILURES_TOTAL).increment(1);
            tracing::warn!(location = fetcher.location(), error = ?e, "feed load failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_array_body_is_empty() {
        assert!(parse_feed(r#"{"items": []}"#).unwrap().is_empty());
        assert!(parse_feed("null").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(parse_feed("[{").is_err());
    }

    #[test]
    fn scalar_entries_are_skipped() {
        let out = parse_feed(r#"[1, "x", {"id": 2, "title": "ok"}, null]"#).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "2");
    }

    #[test]
    fn picks_fetcher_by_scheme() {
        let t = Duration::from_secs(1);
        assert_eq!(
            fetcher_for("https://example.test/news.json", t).unwrap().location(),
            "https://example.test/news.json"
        );
        assert_eq!(
            fetcher_for("public/news.json", t).unwrap().location(),
            "public/news.json"
        );
    }
}
