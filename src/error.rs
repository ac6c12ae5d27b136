//! Error types for the sitemapper library.

use thiserror::Error;

/// Errors produced while fetching, parsing, or writing sitemaps.
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("'{url}' answered HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("no sitemap found for '{0}'")]
    NotFound(String),

    #[error("sitemap '{loc}' holds {count} URLs, limit is {limit}")]
    TooManyUrls {
        loc: String,
        count: usize,
        limit: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SitemapError>;
