//! `sitemapper discover <site>` — locate a site's sitemaps.

use crate::cli::output::{self, Styled};
use crate::discovery;
use crate::fetch::HttpClient;
use anyhow::Result;

/// Run the discover command.
pub async fn run(site: &str) -> Result<()> {
    let s = Styled::new();
    let client = HttpClient::new()?;

    let sitemaps = discovery::discover_sitemaps(&client, site).await?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "site": crate::urlutil::correct_site_url(site),
            "sitemaps": sitemaps,
        }));
        return Ok(());
    }

    if sitemaps.is_empty() {
        eprintln!("  {} No sitemap found for {site}.", s.fail_sym());
        std::process::exit(1);
    }

    if !output::is_quiet() {
        eprintln!(
            "  {} Found {} sitemap(s) for {site}:",
            s.ok_sym(),
            sitemaps.len()
        );
    }
    for url in &sitemaps {
        println!("{url}");
    }

    Ok(())
}
