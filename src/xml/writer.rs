//! Serialize sitemap documents back into sitemaps.org XML.

use crate::error::{Result, SitemapError};
use crate::model::document::SitemapDocument;
use crate::validate::MAX_URLS_PER_SITEMAP;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// sitemaps.org urlset namespace.
pub const NS_SITEMAP: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
/// XML Schema instance namespace, carried on urlset roots.
pub const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Google sitemap-image extension namespace.
pub const NS_IMAGE: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Serialize one urlset document.
///
/// Reproduces the canonical layout: XML declaration, optional stylesheet
/// PI, a comment naming the served location, the namespaced `<urlset>`,
/// and a trailing generator comment. Tab-indented.
pub fn url_set_to_xml(
    doc: &SitemapDocument,
    site: &str,
    xsl_href: Option<&str>,
) -> Result<String> {
    if doc.entries.len() > MAX_URLS_PER_SITEMAP {
        return Err(SitemapError::TooManyUrls {
            loc: doc.loc.clone(),
            count: doc.entries.len(),
            limit: MAX_URLS_PER_SITEMAP,
        });
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    write_prologue(&mut writer, site, &doc.file_name(), xsl_href)?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns:xsi", NS_XSI));
    urlset.push_attribute(("xmlns:image", NS_IMAGE));
    urlset.push_attribute(("xmlns", NS_SITEMAP));
    writer.write_event(Event::Start(urlset))?;

    for entry in &doc.entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        if let Some(lastmod) = &entry.lastmod {
            write_text_element(&mut writer, "lastmod", lastmod)?;
        }
        if let Some(freq) = entry.changefreq {
            write_text_element(&mut writer, "changefreq", freq.as_str())?;
        }
        if let Some(priority) = entry.priority {
            // Display keeps two-decimal priorities like 0.85 intact.
            let text = if priority.fract() == 0.0 {
                format!("{priority:.1}")
            } else {
                format!("{priority}")
            };
            write_text_element(&mut writer, "priority", &text)?;
        }
        for image in &entry.images {
            writer.write_event(Event::Start(BytesStart::new("image:image")))?;
            write_text_element(&mut writer, "image:loc", image)?;
            writer.write_event(Event::End(BytesEnd::new("image:image")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    write_epilogue(&mut writer)?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// Serialize a sitemap index over the given child documents.
///
/// Index roots carry only the sitemaps.org namespace.
pub fn index_to_xml(
    parent_loc: &str,
    children: &[SitemapDocument],
    site: &str,
    xsl_href: Option<&str>,
) -> Result<String> {
    if children.len() > MAX_URLS_PER_SITEMAP {
        return Err(SitemapError::TooManyUrls {
            loc: parent_loc.to_string(),
            count: children.len(),
            limit: MAX_URLS_PER_SITEMAP,
        });
    }

    let file_name = if parent_loc.is_empty() {
        "sitemap_index.xml".to_string()
    } else {
        crate::urlutil::file_name_of(parent_loc)
    };

    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    write_prologue(&mut writer, site, &file_name, xsl_href)?;

    let mut index = BytesStart::new("sitemapindex");
    index.push_attribute(("xmlns", NS_SITEMAP));
    writer.write_event(Event::Start(index))?;

    for child in children {
        writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
        write_text_element(&mut writer, "loc", &child.loc)?;
        if let Some(lastmod) = &child.lastmod {
            write_text_element(&mut writer, "lastmod", lastmod)?;
        }
        writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sitemapindex")))?;
    write_epilogue(&mut writer)?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_prologue(
    writer: &mut Writer<Vec<u8>>,
    site: &str,
    file_name: &str,
    xsl_href: Option<&str>,
) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    if let Some(href) = xsl_href {
        writer.write_event(Event::PI(BytesPI::new(format!(
            "xml-stylesheet type=\"text/xsl\" href=\"{href}\""
        ))))?;
    }
    let comment = format!(" sitemap available at {site}{file_name} ");
    writer.write_event(Event::Comment(BytesText::new(&comment)))?;
    Ok(())
}

fn write_epilogue(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer.write_event(Event::Comment(BytesText::new(" generated by sitemapper ")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::{ChangeFreq, UrlEntry};
    use crate::xml::parser;

    fn sample_doc() -> SitemapDocument {
        let mut doc = SitemapDocument::new("https://example.com/sitemap.xml");
        let mut entry = UrlEntry::new("https://example.com/")
            .with_lastmod("2023-04-06")
            .with_changefreq(ChangeFreq::Daily)
            .with_priority(0.8);
        entry.add_images(["https://example.com/hero.png"]);
        doc.add_entry(entry);
        doc.add_entry(UrlEntry::new("https://example.com/about/").with_lastmod("2023-04-01"));
        doc
    }

    #[test]
    fn test_url_set_xml_shape() {
        let xml = url_set_to_xml(&sample_doc(), "https://example.com/", None).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("sitemap available at https://example.com/sitemap.xml"));
        assert!(xml.contains(&format!("xmlns=\"{NS_SITEMAP}\"")));
        assert!(xml.contains(&format!("xmlns:image=\"{NS_IMAGE}\"")));
        assert!(xml.contains("<image:loc>https://example.com/hero.png</image:loc>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("generated by sitemapper"));
    }

    #[test]
    fn test_url_set_round_trips_through_parser() {
        let doc = sample_doc();
        let xml = url_set_to_xml(&doc, "https://example.com/", None).unwrap();
        let parsed = parser::parse_url_set(&xml);

        assert_eq!(parsed.len(), doc.entries.len());
        assert_eq!(parsed[0].loc, "https://example.com/");
        assert_eq!(parsed[0].images, vec!["https://example.com/hero.png"]);
        assert_eq!(parsed[1].lastmod.as_deref(), Some("2023-04-01"));
    }

    #[test]
    fn test_stylesheet_pi_written_and_recovered() {
        let xml = url_set_to_xml(
            &sample_doc(),
            "https://example.com/",
            Some("/main-sitemap.xsl"),
        )
        .unwrap();
        assert!(xml.contains("<?xml-stylesheet type=\"text/xsl\" href=\"/main-sitemap.xsl\"?>"));
        assert_eq!(
            parser::extract_xsl_href(&xml).as_deref(),
            Some("/main-sitemap.xsl")
        );
    }

    #[test]
    fn test_loc_is_escaped() {
        let mut doc = SitemapDocument::new("https://example.com/sitemap.xml");
        doc.add_url("https://example.com/?a=1&b=2");
        let xml = url_set_to_xml(&doc, "https://example.com/", None).unwrap();
        assert!(xml.contains("https://example.com/?a=1&amp;b=2"));
    }

    #[test]
    fn test_index_xml() {
        let children = vec![
            SitemapDocument::stub(
                "https://example.com/post-sitemap.xml",
                Some("2023-04-06".to_string()),
            ),
            SitemapDocument::stub("https://example.com/page-sitemap.xml", None),
        ];
        let xml = index_to_xml(
            "https://example.com/sitemap_index.xml",
            &children,
            "https://example.com/",
            None,
        )
        .unwrap();

        assert!(xml.contains("<sitemapindex"));
        assert!(!xml.contains("xmlns:image"));
        let parsed = parser::parse_index(&xml);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].1.as_deref(), Some("2023-04-06"));
    }

    #[test]
    fn test_priority_keeps_two_decimals() {
        let mut doc = SitemapDocument::new("https://example.com/sitemap.xml");
        doc.add_entry(UrlEntry::new("https://example.com/a").with_priority(0.85));
        doc.add_entry(UrlEntry::new("https://example.com/b").with_priority(1.0));
        let xml = url_set_to_xml(&doc, "https://example.com/", None).unwrap();

        assert!(xml.contains("<priority>0.85</priority>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        let parsed = parser::parse_url_set(&xml);
        assert_eq!(parsed[0].priority, Some(0.85));
    }

    #[test]
    fn test_index_child_limit_enforced() {
        let children: Vec<_> = (0..=MAX_URLS_PER_SITEMAP)
            .map(|i| SitemapDocument::stub(format!("https://example.com/sitemap{i}.xml"), None))
            .collect();
        let err = index_to_xml(
            "https://example.com/sitemap_index.xml",
            &children,
            "https://example.com/",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SitemapError::TooManyUrls { .. }));
    }

    #[test]
    fn test_url_limit_enforced() {
        let mut doc = SitemapDocument::new("https://example.com/sitemap.xml");
        for i in 0..=MAX_URLS_PER_SITEMAP {
            doc.add_url(&format!("https://example.com/p/{i}"));
        }
        let err = url_set_to_xml(&doc, "https://example.com/", None).unwrap_err();
        assert!(matches!(err, SitemapError::TooManyUrls { .. }));
    }
}
