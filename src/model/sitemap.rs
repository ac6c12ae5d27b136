//! A website's whole sitemap tree: parent document plus index children.

use crate::error::Result;
use crate::model::document::SitemapDocument;
use crate::model::entry::UrlEntry;
use crate::urlutil;
use crate::xml::{parser, writer};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A site's sitemap: either a single urlset, or an index with children.
///
/// The `parent` is the document at the canonical sitemap location. When
/// `children` is non-empty the parent acts as a sitemap index over them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sitemap {
    /// Canonical site root, scheme and trailing slash included.
    pub site: String,
    /// `xml-stylesheet` href carried over when reading/writing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xsl_href: Option<String>,
    /// The top-level document.
    pub parent: SitemapDocument,
    /// Sub-sitemaps listed by an index parent.
    #[serde(default)]
    pub children: Vec<SitemapDocument>,
}

impl Sitemap {
    /// Create an empty sitemap for a site. The site string is corrected
    /// for a missing scheme and trailing slash.
    pub fn new(site: &str) -> Self {
        let site = urlutil::correct_site_url(site);
        Self {
            parent: SitemapDocument::new(format!("{site}sitemap.xml")),
            site,
            xsl_href: None,
            children: Vec::new(),
        }
    }

    /// Append a URL entry to the parent document.
    pub fn append_entry(&mut self, entry: UrlEntry) {
        self.parent.add_entry(entry);
    }

    /// Append a document as an index child.
    pub fn append_child(&mut self, doc: SitemapDocument) {
        self.children.push(doc);
    }

    /// All URL entries across parent and children.
    pub fn all_entries(&self) -> impl Iterator<Item = &UrlEntry> {
        self.parent
            .entries
            .iter()
            .chain(self.children.iter().flat_map(|c| c.entries.iter()))
    }

    /// Total URL count across the tree.
    pub fn url_count(&self) -> usize {
        self.all_entries().count()
    }

    /// Read a sitemap XML file from disk.
    ///
    /// The parent takes the file's entries; `<sitemapindex>` children become
    /// document stubs (their entries are only available via fetch).
    pub fn read(&mut self, path: &Path) -> Result<()> {
        let xml = std::fs::read_to_string(path)?;
        parser::check_well_formed(&xml)?;
        self.load_from_xml(&path.to_string_lossy(), &xml);
        Ok(())
    }

    /// Populate the tree from one sitemap XML string served at `loc`.
    /// Replaces any previously loaded parent and children.
    pub fn load_from_xml(&mut self, loc: &str, xml: &str) {
        self.xsl_href = parser::extract_xsl_href(xml);
        self.parent = SitemapDocument::new(loc);
        self.parent.merge_from_xml(xml);
        self.children.clear();
        for (child_loc, lastmod) in parser::parse_index(xml) {
            self.children.push(SitemapDocument::stub(child_loc, lastmod));
        }
    }

    /// Write the tree as XML files into `dir`.
    ///
    /// Children with entries are written as individual urlset files; when
    /// children exist the parent becomes an index over them, otherwise the
    /// parent's own entries are written as a single urlset file. Empty
    /// documents are skipped.
    pub fn write(&self, dir: &Path) -> Result<()> {
        for child in &self.children {
            if !child.is_empty() {
                let xml = writer::url_set_to_xml(child, &self.site, self.xsl_href.as_deref())?;
                std::fs::write(dir.join(child.file_name()), xml)?;
            }
        }

        if !self.children.is_empty() {
            let xml = writer::index_to_xml(
                &self.parent.loc,
                &self.children,
                &self.site,
                self.xsl_href.as_deref(),
            )?;
            let name = if self.parent.loc.is_empty() {
                "sitemap_index.xml".to_string()
            } else {
                self.parent.file_name()
            };
            std::fs::write(dir.join(name), xml)?;
        } else if !self.parent.is_empty() {
            let xml = writer::url_set_to_xml(&self.parent, &self.site, self.xsl_href.as_deref())?;
            std::fs::write(dir.join(self.parent.file_name()), xml)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_corrects_site() {
        let sitemap = Sitemap::new("example.com");
        assert_eq!(sitemap.site, "http://example.com/");
        assert_eq!(sitemap.parent.loc, "http://example.com/sitemap.xml");
    }

    #[test]
    fn test_append() {
        let mut sitemap = Sitemap::new("https://example.com");
        sitemap.append_entry(UrlEntry::new("https://example.com/a"));
        sitemap.append_child(SitemapDocument::new("https://example.com/post-sitemap.xml"));
        assert_eq!(sitemap.parent.len(), 1);
        assert_eq!(sitemap.children.len(), 1);
    }

    #[test]
    fn test_load_from_index_xml() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet type="text/xsl" href="/main-sitemap.xsl"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/post-sitemap.xml</loc><lastmod>2023-02-01</lastmod></sitemap>
  <sitemap><loc>https://example.com/page-sitemap.xml</loc></sitemap>
</sitemapindex>"#;

        let mut sitemap = Sitemap::new("https://example.com");
        sitemap.load_from_xml("https://example.com/sitemap_index.xml", xml);
        assert_eq!(sitemap.xsl_href.as_deref(), Some("/main-sitemap.xsl"));
        assert_eq!(sitemap.children.len(), 2);
        assert_eq!(
            sitemap.children[0].lastmod.as_deref(),
            Some("2023-02-01")
        );
        assert!(sitemap.parent.is_empty());
    }

    #[test]
    fn test_reload_replaces_children() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/post-sitemap.xml</loc></sitemap>
  <sitemap><loc>https://example.com/page-sitemap.xml</loc></sitemap>
</sitemapindex>"#;

        let mut sitemap = Sitemap::new("https://example.com");
        sitemap.load_from_xml("https://example.com/sitemap_index.xml", xml);
        sitemap.load_from_xml("https://example.com/sitemap_index.xml", xml);
        assert_eq!(sitemap.children.len(), 2);
    }

    #[test]
    fn test_read_rejects_malformed_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<urlset><url></wrong></urlset>").unwrap();

        let mut sitemap = Sitemap::new("https://example.com");
        let err = sitemap.read(&path).unwrap_err();
        assert!(matches!(err, crate::error::SitemapError::Xml(_)));
    }
}
