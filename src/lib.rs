//! # sitemapper
//!
//! Generate and analyze website sitemaps.
//!
//! The library models sitemaps.org XML (urlset documents, index sitemaps,
//! the sitemap-image extension), fetches them over HTTP, discovers them
//! when their location is unknown, writes them back out, and audits the
//! URLs they list.
//!
//! ## Fetching a sitemap
//!
//! ```no_run
//! use sitemapper::{discovery, fetch::HttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new()?;
//!     let sitemap = discovery::fetch_sitemap_tree(&client, "example.com", None, true).await?;
//!     println!("{} URLs listed", sitemap.url_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Building one from scratch
//!
//! ```no_run
//! use sitemapper::model::{Sitemap, UrlEntry};
//! use std::path::Path;
//!
//! let mut sitemap = Sitemap::new("https://example.com");
//! sitemap.append_entry(UrlEntry::new("https://example.com/about").with_lastmod("2023-04-06"));
//! sitemap.write(Path::new("."))?;
//! # Ok::<(), sitemapper::SitemapError>(())
//! ```

pub mod audit;
pub mod cache;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod model;
pub mod robots;
pub mod urlutil;
pub mod validate;
pub mod xml;

pub use audit::{audit_sitemap, AuditReport};
pub use discovery::{discover_sitemaps, fetch_sitemap_tree};
pub use error::{Result, SitemapError};
pub use model::{ChangeFreq, Sitemap, SitemapDocument, UrlEntry};
pub use robots::RobotsTxt;
