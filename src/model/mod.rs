//! Data model: URL entries, urlset documents, and whole sitemap trees.

pub mod document;
pub mod entry;
pub mod sitemap;

pub use document::SitemapDocument;
pub use entry::{ChangeFreq, UrlEntry};
pub use sitemap::Sitemap;
