//! `sitemapper generate` — build sitemap XML files from a URL list.

use crate::cli::output::{self, Styled};
use crate::model::document::SitemapDocument;
use crate::model::entry::UrlEntry;
use crate::model::sitemap::Sitemap;
use crate::validate::MAX_URLS_PER_SITEMAP;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Run the generate command.
///
/// `input` holds one URL per line; blank lines and `#` comments are
/// skipped. More than `split` URLs produces numbered sub-sitemaps plus an
/// index.
pub async fn run(
    input: &Path,
    site: &str,
    out: &Path,
    xsl: Option<&str>,
    split: usize,
) -> Result<()> {
    let s = Styled::new();

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let urls: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();

    if urls.is_empty() {
        bail!("{} lists no URLs", input.display());
    }
    let split = split.clamp(1, MAX_URLS_PER_SITEMAP);

    let sitemap = build_sitemap(site, &urls, xsl, split);

    std::fs::create_dir_all(out)
        .with_context(|| format!("creating {}", out.display()))?;
    sitemap.write(out)?;

    let mut files: Vec<String> = sitemap
        .children
        .iter()
        .map(|c| c.file_name())
        .collect();
    files.push(sitemap.parent.file_name());

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "site": sitemap.site,
            "urls": urls.len(),
            "files": files,
            "out": out.display().to_string(),
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!(
            "  {} Wrote {} URL(s) into {} file(s) under {}",
            s.ok_sym(),
            urls.len(),
            files.len(),
            out.display()
        );
        for file in &files {
            eprintln!("    {} {}", s.dim("·"), file);
        }
    }

    Ok(())
}

/// Split URLs into documents of at most `split` entries. A single chunk
/// becomes a plain sitemap.xml; several become numbered sub-sitemaps
/// under a sitemap_index.xml parent.
fn build_sitemap(site: &str, urls: &[&str], xsl: Option<&str>, split: usize) -> Sitemap {
    let mut sitemap = Sitemap::new(site);
    sitemap.xsl_href = xsl.map(|s| s.to_string());

    if urls.len() <= split {
        for url in urls {
            sitemap.append_entry(UrlEntry::new(*url));
        }
        return sitemap;
    }

    sitemap.parent = SitemapDocument::new(format!("{}sitemap_index.xml", sitemap.site));
    for (i, chunk) in urls.chunks(split).enumerate() {
        let mut doc = SitemapDocument::new(format!("{}sitemap{}.xml", sitemap.site, i + 1));
        for url in chunk {
            doc.add_url(url);
        }
        sitemap.append_child(doc);
    }
    sitemap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_single_document() {
        let sitemap = build_sitemap("example.com", &["https://example.com/a"], None, 100);
        assert!(sitemap.children.is_empty());
        assert_eq!(sitemap.parent.len(), 1);
        assert_eq!(sitemap.parent.file_name(), "sitemap.xml");
    }

    #[test]
    fn test_build_splits_into_index() {
        let urls: Vec<String> = (0..5).map(|i| format!("https://example.com/p/{i}")).collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();

        let sitemap = build_sitemap("example.com", &refs, None, 2);
        assert_eq!(sitemap.children.len(), 3);
        assert_eq!(sitemap.parent.file_name(), "sitemap_index.xml");
        assert_eq!(sitemap.children[0].len(), 2);
        assert_eq!(sitemap.children[2].len(), 1);
        assert_eq!(sitemap.children[0].file_name(), "sitemap1.xml");
    }
}
