//! `sitemapper cache` — manage cached sitemap trees.

use crate::cache;
use crate::cli::output::{self, Styled};
use anyhow::Result;

/// Clear cached sitemaps.
pub async fn run_clear(host: Option<&str>) -> Result<()> {
    let s = Styled::new();

    match host {
        Some(h) => {
            let removed = cache::clear_host(h)?;
            if output::is_json() {
                output::print_json(&serde_json::json!({
                    "cleared": if removed { Some(h) } else { None },
                }));
            } else if !output::is_quiet() {
                if removed {
                    eprintln!("  {} Cleared cached sitemap for '{h}'.", s.ok_sym());
                } else {
                    eprintln!("  No cached sitemap for '{h}'.");
                }
            }
        }
        None => {
            let (count, bytes) = cache::clear_all()?;
            if output::is_json() {
                output::print_json(&serde_json::json!({
                    "cleared_count": count,
                    "cleared_bytes": bytes,
                }));
            } else if !output::is_quiet() {
                if count > 0 {
                    eprintln!(
                        "  {} Cleared {count} cached sitemap(s) ({}).",
                        s.ok_sym(),
                        output::format_size(bytes)
                    );
                } else {
                    eprintln!("  No cached sitemaps to clear.");
                }
            }
        }
    }

    Ok(())
}
