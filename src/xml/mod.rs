//! Sitemap XML reading and writing.

pub mod parser;
pub mod writer;
