//! A single sitemap XML document (one `<urlset>`).

use crate::model::entry::{today, UrlEntry};
use crate::urlutil;
use crate::xml::parser;
use serde::{Deserialize, Serialize};

/// One urlset document: its own location plus the URL entries it lists.
///
/// In an index sitemap the children are also documents, each with a `loc`
/// and `lastmod` of its own and (once loaded) a set of entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitemapDocument {
    /// Location this document is (or will be) served from.
    pub loc: String,
    /// Last modification date of the document itself.
    pub lastmod: Option<String>,
    /// URL entries listed by the document.
    #[serde(default)]
    pub entries: Vec<UrlEntry>,
}

impl SitemapDocument {
    /// Create an empty document with `lastmod` set to today.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: Some(today()),
            entries: Vec::new(),
        }
    }

    /// Create a document stub from an index listing (`loc` + `lastmod`).
    pub fn stub(loc: impl Into<String>, lastmod: Option<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod,
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn add_entry(&mut self, entry: UrlEntry) {
        self.entries.push(entry);
    }

    /// Append a URL by location; entries with an empty location are dropped.
    pub fn add_url(&mut self, loc: &str) {
        if !loc.is_empty() {
            self.entries.push(UrlEntry::new(loc));
        }
    }

    /// Parse a urlset XML string and append its entries to this document.
    pub fn merge_from_xml(&mut self, xml: &str) {
        self.entries.extend(parser::parse_url_set(xml));
    }

    /// File name this document is written under, from the last path
    /// segment of its location. Empty locations fall back to `sitemap.xml`.
    pub fn file_name(&self) -> String {
        let name = urlutil::file_name_of(&self.loc);
        if name.is_empty() || !name.contains('.') {
            "sitemap.xml".to_string()
        } else {
            name
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
