//! Locate and load a site's sitemap when its URL is not known.
//!
//! Three strategies, in order:
//! 1. probe a fixed list of well-known sitemap paths,
//! 2. `Sitemap:` directives in robots.txt,
//! 3. `<link rel="sitemap">` tags on the home page.

use crate::error::{Result, SitemapError};
use crate::fetch::HttpClient;
use crate::model::document::SitemapDocument;
use crate::model::sitemap::Sitemap;
use crate::robots::RobotsTxt;
use crate::urlutil;
use crate::xml::parser;
use tracing::{debug, warn};

/// Well-known sitemap locations, probed in order. Covers WordPress and
/// the common SEO-plugin naming schemes.
pub const SITEMAP_SEARCH_PATHS: [&str; 15] = [
    "wp-sitemap.xml",
    "sitemap_index.xml",
    "sitemap.xml",
    "sitemapindex.xml",
    "sitemap-index.xml",
    "sitemap1.xml",
    "sitemap.php",
    "sitemap/",
    "sitemaps/",
    "sitemaps.xml",
    "sitemap.txt",
    "sitemap.xml.gz",
    "post-sitemap.xml",
    "page-sitemap.xml",
    "news-sitemap.xml",
];

/// Discover sitemap URLs for a site.
///
/// The first well-known path that answers below HTTP 400 with a final URL
/// ending in `.xml` wins. Otherwise robots.txt directives, then home-page
/// link tags. An empty result means nothing was found.
pub async fn discover_sitemaps(client: &HttpClient, site: &str) -> Result<Vec<String>> {
    let site = urlutil::correct_site_url(site);

    for path in SITEMAP_SEARCH_PATHS {
        let candidate = format!("{site}{path}");
        match client.get_text(&candidate).await {
            Ok(resp) if resp.is_ok() && resp.final_url.ends_with(".xml") => {
                debug!("found sitemap at well-known path {}", resp.final_url);
                return Ok(vec![resp.final_url]);
            }
            Ok(_) => {}
            Err(err) => debug!("probe {candidate} failed: {err}"),
        }
    }

    let robots_url = format!("{site}robots.txt");
    if let Ok(resp) = client.get_text(&robots_url).await {
        if resp.is_ok() {
            let sitemaps = RobotsTxt::parse(&resp.body, crate::fetch::USER_AGENT).sitemap_urls;
            if !sitemaps.is_empty() {
                debug!("found {} sitemap(s) in robots.txt", sitemaps.len());
                return Ok(sitemaps);
            }
        }
    }

    if let Ok(resp) = client.get_text(&site).await {
        if resp.is_ok() {
            let links = sitemap_links_in_html(&resp.body, &site);
            if !links.is_empty() {
                debug!("found {} sitemap link(s) on home page", links.len());
            }
            return Ok(links);
        }
    }

    Ok(Vec::new())
}

/// Extract `<link rel="sitemap">` hrefs from home-page HTML (sync,
/// scraper's DOM is not Send).
fn sitemap_links_in_html(html: &str, site: &str) -> Vec<String> {
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    if let Ok(sel) = Selector::parse(r#"link[rel="sitemap"]"#) {
        for el in document.select(&sel) {
            if let Some(href) = el.value().attr("href") {
                let resolved = urlutil::resolve_href(href, site);
                if !urls.contains(&resolved) {
                    urls.push(resolved);
                }
            }
        }
    }

    urls
}

/// Fetch a site's sitemap tree.
///
/// With `sitemap_url` given (and ending in `.xml`) that document is
/// loaded directly; otherwise discovery runs first. Index children are
/// recorded as stubs; with `include_urls` their URL entries are fetched
/// too. A child that cannot be fetched stays an empty document.
pub async fn fetch_sitemap_tree(
    client: &HttpClient,
    site: &str,
    sitemap_url: Option<&str>,
    include_urls: bool,
) -> Result<Sitemap> {
    let mut sitemap = Sitemap::new(site);

    let candidates = match sitemap_url {
        Some(url) if url.ends_with(".xml") => vec![urlutil::correct_file_url(url)],
        _ => discover_sitemaps(client, site).await?,
    };
    let Some(root_url) = candidates.into_iter().find(|u| u.ends_with(".xml")) else {
        return Err(SitemapError::NotFound(sitemap.site.clone()));
    };

    let resp = client.get_text(&root_url).await?;
    if !resp.is_ok() {
        return Err(SitemapError::HttpStatus {
            url: root_url,
            status: resp.status,
        });
    }

    sitemap.xsl_href = parser::extract_xsl_href(&resp.body);
    sitemap.parent = SitemapDocument::new(&root_url);
    if include_urls {
        sitemap.parent.merge_from_xml(&resp.body);
    }
    for (loc, lastmod) in parser::parse_index(&resp.body) {
        sitemap.children.push(SitemapDocument::stub(loc, lastmod));
    }

    if include_urls {
        for child in &mut sitemap.children {
            let child_url = urlutil::correct_file_url(&child.loc);
            match client.get_text(&child_url).await {
                Ok(resp) if resp.status == 200 => child.merge_from_xml(&resp.body),
                Ok(resp) => {
                    warn!("sub-sitemap {child_url} answered HTTP {}", resp.status);
                }
                Err(err) => {
                    warn!("failed to fetch sub-sitemap {child_url}: {err}");
                }
            }
        }
    }

    Ok(sitemap)
}
