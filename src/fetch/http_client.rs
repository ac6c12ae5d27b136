//! HTTP client for fetching sitemaps and scanning listed URLs.
//!
//! Wraps reqwest with the browser-like User-Agent some servers require
//! before serving their sitemap, a retry loop for transient transport
//! failures, and a bounded-concurrency HEAD scanner.

use crate::error::Result;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::debug;

/// User-Agent sent with every request. Plenty of sites answer 403 to
/// obvious bots but serve their sitemap to a desktop browser string.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:52.0) Gecko/20100101 Firefox/52.0";

/// Retries for transient transport failures.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A fetched text body with its response metadata.
#[derive(Debug, Clone)]
pub struct FetchedText {
    /// URL that was requested.
    pub url: String,
    /// URL the response came from, after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl FetchedText {
    /// Whether the response status is below the client-error range.
    pub fn is_ok(&self) -> bool {
        self.status < 400
    }
}

/// Metadata from a HEAD response.
#[derive(Debug, Clone)]
pub struct HeadInfo {
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub last_modified: Option<String>,
    pub cache_control: Option<String>,
}

/// Shared HTTP client.
pub struct HttpClient {
    inner: reqwest::Client,
    max_retries: u32,
}

impl HttpClient {
    /// Build a client with the default retry count and timeout.
    pub fn new() -> Result<Self> {
        Self::with_retries(DEFAULT_MAX_RETRIES)
    }

    /// Build a client with an explicit retry count.
    pub fn with_retries(max_retries: u32) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self { inner, max_retries })
    }

    /// GET a URL and return its text body with response metadata.
    ///
    /// Transient transport failures (connect/timeout) are retried with a
    /// short linear backoff; HTTP error statuses are returned to the
    /// caller, not retried.
    pub async fn get_text(&self, url: &str) -> Result<FetchedText> {
        let mut attempt = 0;
        loop {
            match self.inner.get(url).send().await {
                Ok(resp) => {
                    let final_url = resp.url().to_string();
                    let status = resp.status().as_u16();
                    let body = resp.text().await.unwrap_or_default();
                    return Ok(FetchedText {
                        url: url.to_string(),
                        final_url,
                        status,
                        body,
                    });
                }
                Err(err) if attempt < self.max_retries && is_transient(&err) => {
                    attempt += 1;
                    debug!("retrying {url} after transport error (attempt {attempt}): {err}");
                    tokio::time::sleep(Duration::from_millis(200 * attempt as u64)).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// HEAD a URL and return response metadata without the body.
    pub async fn head(&self, url: &str) -> Result<HeadInfo> {
        let resp = self.inner.head(url).send().await?;
        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        Ok(HeadInfo {
            url: url.to_string(),
            final_url: resp.url().to_string(),
            status: resp.status().as_u16(),
            content_type: header("content-type"),
            last_modified: header("last-modified"),
            cache_control: header("cache-control"),
        })
    }

    /// HEAD many URLs with bounded concurrency, preserving input order.
    pub async fn head_many(
        &self,
        urls: &[String],
        concurrency: usize,
    ) -> Vec<Result<HeadInfo>> {
        stream::iter(urls.iter().map(|url| self.head(url)))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request()
}
