//! `sitemapper fetch <site>` — fetch and summarize a site's sitemap tree.

use crate::cli::output::{self, Styled};
use crate::discovery;
use crate::fetch::HttpClient;
use crate::model::sitemap::Sitemap;
use crate::{cache, urlutil};
use anyhow::{Context, Result};
use tracing::warn;

/// Run the fetch command.
pub async fn run(
    site: &str,
    sitemap_url: Option<&str>,
    include_urls: bool,
    fresh: bool,
) -> Result<()> {
    let s = Styled::new();
    let corrected = urlutil::correct_site_url(site);
    let host = urlutil::host_of(&corrected);

    // Serve from cache unless --fresh. An explicit sitemap URL always
    // re-fetches, and a cached tree without URL entries cannot satisfy
    // --include-urls.
    if !fresh && sitemap_url.is_none() {
        if let Some(host) = &host {
            if let Some(sitemap) = cache::load(host) {
                if !include_urls || sitemap.url_count() > 0 {
                    if !output::is_quiet() && !output::is_json() {
                        let age = cache::age_secs(host)
                            .map(output::format_duration)
                            .unwrap_or_else(|| "unknown".to_string());
                        eprintln!("  Using cached sitemap ({age} old). Use --fresh to re-fetch.");
                        eprintln!();
                    }
                    print_sitemap(&s, &sitemap);
                    return Ok(());
                }
            }
        }
    }

    let client = HttpClient::new()?;
    let sitemap = discovery::fetch_sitemap_tree(&client, site, sitemap_url, include_urls)
        .await
        .context("failed to fetch sitemap")?;

    if let Some(host) = &host {
        if let Err(err) = cache::store(host, &sitemap) {
            warn!("could not cache sitemap for {host}: {err}");
        }
    }

    print_sitemap(&s, &sitemap);
    Ok(())
}

fn print_sitemap(s: &Styled, sitemap: &Sitemap) {
    if output::is_json() {
        if let Ok(value) = serde_json::to_value(sitemap) {
            output::print_json(&value);
        }
        return;
    }

    eprintln!("  {}", s.bold(&sitemap.site));
    eprintln!("  Sitemap:     {}", sitemap.parent.loc);
    if let Some(href) = &sitemap.xsl_href {
        eprintln!("  Stylesheet:  {href}");
    }
    eprintln!("  Children:    {}", sitemap.children.len());
    eprintln!("  URLs:        {}", sitemap.url_count());

    if output::is_verbose() {
        for child in &sitemap.children {
            let lastmod = child.lastmod.as_deref().unwrap_or("-");
            eprintln!(
                "    {} {} ({} URLs, lastmod {lastmod})",
                s.dim("·"),
                child.loc,
                child.len()
            );
        }
    }
}
