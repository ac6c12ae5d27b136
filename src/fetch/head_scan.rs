//! Parallel HEAD scanning of sitemap-listed URLs.
//!
//! Determines status, content type, and freshness for each URL without
//! downloading bodies. One unreachable URL never aborts a scan.

use super::http_client::{HeadInfo, HttpClient};
use serde::Serialize;

/// Default number of concurrent HEAD requests.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Result of HEAD-scanning one URL.
#[derive(Debug, Clone, Serialize)]
pub struct UrlCheck {
    /// The scanned URL.
    pub url: String,
    /// URL after redirects (same as `url` when none occurred).
    pub final_url: String,
    /// HTTP status code (0 if the request failed).
    pub status: u16,
    /// Content type (e.g. "text/html").
    pub content_type: Option<String>,
    /// Whether the response looks like an HTML page.
    pub is_html: bool,
    /// Whether the page advertises freshness (Last-Modified or no-cache).
    pub is_fresh: bool,
}

impl UrlCheck {
    /// The URL answered with an error status or not at all.
    pub fn is_broken(&self) -> bool {
        self.status == 0 || self.status >= 400
    }

    /// The request was redirected somewhere else.
    pub fn is_redirected(&self) -> bool {
        !self.is_broken() && self.final_url != self.url
    }
}

/// HEAD-scan URLs with bounded concurrency.
///
/// Results come back in input order; failed requests are marked with
/// status 0 rather than dropped.
pub async fn scan_urls(urls: &[String], client: &HttpClient, concurrency: usize) -> Vec<UrlCheck> {
    let responses = client.head_many(urls, concurrency).await;

    responses
        .into_iter()
        .zip(urls.iter())
        .map(|(result, url)| match result {
            Ok(info) => head_info_to_check(info),
            Err(_) => UrlCheck {
                url: url.clone(),
                final_url: url.clone(),
                status: 0,
                content_type: None,
                is_html: false,
                is_fresh: false,
            },
        })
        .collect()
}

fn head_info_to_check(info: HeadInfo) -> UrlCheck {
    let is_html = info
        .content_type
        .as_deref()
        .map(|ct| ct.contains("text/html") || ct.contains("application/xhtml"))
        .unwrap_or(true); // assume HTML if no content-type

    let is_fresh = info
        .cache_control
        .as_deref()
        .map(|cc| cc.contains("no-cache") || cc.contains("must-revalidate"))
        .unwrap_or(false)
        || info.last_modified.is_some();

    UrlCheck {
        url: info.url,
        final_url: info.final_url,
        status: info.status,
        content_type: info.content_type,
        is_html,
        is_fresh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(status: u16, content_type: Option<&str>) -> HeadInfo {
        HeadInfo {
            url: "https://example.com/".to_string(),
            final_url: "https://example.com/".to_string(),
            status,
            content_type: content_type.map(|s| s.to_string()),
            last_modified: None,
            cache_control: None,
        }
    }

    #[test]
    fn test_html_detection() {
        let check = head_info_to_check(info(200, Some("text/html; charset=utf-8")));
        assert!(check.is_html);
        assert!(!check.is_broken());

        let check = head_info_to_check(info(200, Some("application/pdf")));
        assert!(!check.is_html);

        // No content-type: assume HTML
        let check = head_info_to_check(info(200, None));
        assert!(check.is_html);
    }

    #[test]
    fn test_freshness_from_last_modified() {
        let mut i = info(200, Some("text/html"));
        i.last_modified = Some("Thu, 06 Apr 2023 10:00:00 GMT".to_string());
        assert!(head_info_to_check(i).is_fresh);

        let mut i = info(200, Some("text/html"));
        i.cache_control = Some("no-cache".to_string());
        assert!(head_info_to_check(i).is_fresh);

        assert!(!head_info_to_check(info(200, Some("text/html"))).is_fresh);
    }

    #[test]
    fn test_broken_and_redirected() {
        let check = head_info_to_check(info(404, Some("text/html")));
        assert!(check.is_broken());

        let mut i = info(200, Some("text/html"));
        i.final_url = "https://example.com/moved".to_string();
        let check = head_info_to_check(i);
        assert!(check.is_redirected());
    }
}
