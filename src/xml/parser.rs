//! Event-based parsing of sitemap XML.
//!
//! Handles plain urlset documents, sitemapindex documents, the
//! sitemap-image extension (`image:image`/`image:loc`), and the
//! `xml-stylesheet` processing instruction. Parsing is forgiving:
//! malformed or unexpected markup yields fewer entries, not errors.

use crate::error::Result;
use crate::model::entry::UrlEntry;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Check an XML document for well-formedness.
///
/// The extractors below skip over markup they cannot read; local files
/// go through this first so an authoring mistake surfaces as an error
/// instead of a silently empty tree.
pub fn check_well_formed(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(err) => return Err(err.into()),
        }
        buf.clear();
    }
}

/// Extract every `<url>` entry from a urlset document.
///
/// Missing `<loc>` yields an entry with an empty location; missing
/// `<lastmod>` yields `None`. Nested image extension blocks are collected
/// into the entry's image list.
pub fn parse_url_set(xml: &str) -> Vec<UrlEntry> {
    let mut entries = Vec::new();
    let mut in_url = false;
    let mut in_image = false;
    let mut current_tag = String::new();

    let mut loc = String::new();
    let mut lastmod = String::new();
    let mut changefreq = String::new();
    let mut priority = String::new();
    let mut images: Vec<String> = Vec::new();

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "url" => {
                        in_url = true;
                        loc.clear();
                        lastmod.clear();
                        changefreq.clear();
                        priority.clear();
                        images.clear();
                    }
                    "image:image" if in_url => in_image = true,
                    _ => {}
                }
                current_tag = name;
            }
            Ok(Event::Text(ref e)) => {
                if in_url {
                    let text = e.unescape().unwrap_or_default().trim().to_string();
                    if !text.is_empty() {
                        match current_tag.as_str() {
                            "loc" if !in_image => loc = text,
                            "lastmod" => lastmod = text,
                            "changefreq" => changefreq = text,
                            "priority" => priority = text,
                            "image:loc" if in_image => images.push(text),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "url" if in_url => {
                        let mut entry = UrlEntry::parsed(loc.clone(), &lastmod, images.clone());
                        entry.changefreq = changefreq.parse().ok();
                        entry.priority = priority.parse().ok();
                        entries.push(entry);
                        in_url = false;
                    }
                    "image:image" => in_image = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    entries
}

/// Extract `(loc, lastmod)` pairs for the children of a sitemap index.
///
/// Returns an empty list when the document is not a `<sitemapindex>`.
pub fn parse_index(xml: &str) -> Vec<(String, Option<String>)> {
    if !xml.contains("<sitemapindex") {
        return Vec::new();
    }

    let mut children = Vec::new();
    let mut in_sitemap = false;
    let mut current_tag = String::new();
    let mut loc = String::new();
    let mut lastmod = String::new();

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "sitemap" {
                    in_sitemap = true;
                    loc.clear();
                    lastmod.clear();
                }
                current_tag = name;
            }
            Ok(Event::Text(ref e)) => {
                if in_sitemap {
                    let text = e.unescape().unwrap_or_default().trim().to_string();
                    if !text.is_empty() {
                        match current_tag.as_str() {
                            "loc" => loc = text,
                            "lastmod" => lastmod = text,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "sitemap" && in_sitemap {
                    if !loc.is_empty() {
                        let lastmod = if lastmod.is_empty() {
                            None
                        } else {
                            Some(lastmod.clone())
                        };
                        children.push((loc.clone(), lastmod));
                    }
                    in_sitemap = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    children
}

/// href of an `xml-stylesheet` processing instruction, if the document
/// carries one.
pub fn extract_xsl_href(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::PI(ref e)) => {
                let content = String::from_utf8_lossy(e).to_string();
                if content.starts_with("xml-stylesheet") {
                    if let Some(rest) = content.split("href=\"").nth(1) {
                        if let Some(href) = rest.split('"').next() {
                            return Some(href.to_string());
                        }
                    }
                }
            }
            Ok(Event::Eof) => return None,
            Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::ChangeFreq;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2023-04-06</lastmod>
    <changefreq>daily</changefreq>
    <priority>0.8</priority>
    <image:image>
      <image:loc>https://example.com/hero.png</image:loc>
    </image:image>
    <image:image>
      <image:loc>https://example.com/logo.svg</image:loc>
    </image:image>
  </url>
  <url>
    <loc>https://example.com/about/</loc>
  </url>
</urlset>"#;

    #[test]
    fn test_parse_url_set() {
        let entries = parse_url_set(URLSET);
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.loc, "https://example.com/");
        assert_eq!(first.lastmod.as_deref(), Some("2023-04-06"));
        assert_eq!(first.changefreq, Some(ChangeFreq::Daily));
        assert_eq!(first.priority, Some(0.8));
        assert_eq!(first.images.len(), 2);

        let second = &entries[1];
        assert_eq!(second.loc, "https://example.com/about/");
        assert!(second.lastmod.is_none());
        assert!(second.images.is_empty());
    }

    #[test]
    fn test_parse_url_set_unescapes_entities() {
        let xml = r#"<urlset><url><loc>https://example.com/?a=1&amp;b=2</loc></url></urlset>"#;
        let entries = parse_url_set(xml);
        assert_eq!(entries[0].loc, "https://example.com/?a=1&b=2");
    }

    #[test]
    fn test_parse_index() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap>
    <loc>https://example.com/post-sitemap.xml</loc>
    <lastmod>2023-04-06</lastmod>
  </sitemap>
  <sitemap>
    <loc>https://example.com/page-sitemap.xml</loc>
  </sitemap>
</sitemapindex>"#;

        let children = parse_index(xml);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].0, "https://example.com/post-sitemap.xml");
        assert_eq!(children[0].1.as_deref(), Some("2023-04-06"));
        assert!(children[1].1.is_none());
    }

    #[test]
    fn test_parse_index_ignores_plain_urlset() {
        assert!(parse_index(URLSET).is_empty());
    }

    #[test]
    fn test_extract_xsl_href() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet type="text/xsl" href="//example.com/main-sitemap.xsl"?>
<urlset></urlset>"#;
        assert_eq!(
            extract_xsl_href(xml).as_deref(),
            Some("//example.com/main-sitemap.xsl")
        );
        assert!(extract_xsl_href(URLSET).is_none());
    }
}
