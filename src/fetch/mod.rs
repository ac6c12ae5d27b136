//! HTTP fetching: shared client and HEAD scanning.

pub mod head_scan;
pub mod http_client;

pub use head_scan::{scan_urls, UrlCheck, DEFAULT_CONCURRENCY};
pub use http_client::{FetchedText, HeadInfo, HttpClient, USER_AGENT};
