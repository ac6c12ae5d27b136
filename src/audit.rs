//! Analysis pass over a sitemap: is every listed URL worth listing?
//!
//! HEAD-scans each entry and cross-checks the tree against robots.txt
//! rules, sitemaps.org metadata constraints, and duplicate locations.

use crate::error::Result;
use crate::fetch::{head_scan, HttpClient, UrlCheck};
use crate::model::entry::UrlEntry;
use crate::model::sitemap::Sitemap;
use crate::robots::RobotsTxt;
use crate::validate::{self, EntryIssue};
use serde::Serialize;
use tracing::debug;

/// A URL that answered with an error status (0 = unreachable).
#[derive(Debug, Clone, Serialize)]
pub struct BrokenUrl {
    pub url: String,
    pub status: u16,
}

/// A URL whose response came from somewhere else.
#[derive(Debug, Clone, Serialize)]
pub struct RedirectedUrl {
    pub from: String,
    pub to: String,
}

/// Everything the audit pass found.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Site the sitemap belongs to.
    pub site: String,
    /// Total URL entries across parent and children.
    pub total_urls: usize,
    /// Entries that answered with a non-error status.
    pub reachable: usize,
    /// Entries answering >= 400 or not at all.
    pub broken: Vec<BrokenUrl>,
    /// Entries whose final URL differed from the listed one.
    pub redirected: Vec<RedirectedUrl>,
    /// Entries serving something other than HTML.
    pub non_html: Vec<String>,
    /// Entries a crawler obeying robots.txt would never visit.
    pub robots_disallowed: Vec<String>,
    /// Locations listed more than once.
    pub duplicates: Vec<String>,
    /// Metadata violations (bad loc, lastmod, priority).
    pub invalid_entries: Vec<EntryIssue>,
    /// Whether robots.txt was available for the disallow check.
    pub robots_checked: bool,
}

impl AuditReport {
    /// No findings at all.
    pub fn is_clean(&self) -> bool {
        self.broken.is_empty()
            && self.redirected.is_empty()
            && self.non_html.is_empty()
            && self.robots_disallowed.is_empty()
            && self.duplicates.is_empty()
            && self.invalid_entries.is_empty()
    }
}

/// Audit a fetched sitemap tree.
///
/// Fetches the site's robots.txt for the disallow check (skipped when it
/// cannot be fetched), then HEAD-scans every listed URL with the given
/// concurrency.
pub async fn audit_sitemap(
    client: &HttpClient,
    sitemap: &Sitemap,
    concurrency: usize,
) -> Result<AuditReport> {
    let robots_url = format!("{}robots.txt", sitemap.site);
    let robots = match client.get_text(&robots_url).await {
        Ok(resp) if resp.is_ok() => Some(RobotsTxt::parse(&resp.body, crate::fetch::USER_AGENT)),
        _ => {
            debug!("robots.txt unavailable for {}, skipping disallow check", sitemap.site);
            None
        }
    };

    let entries: Vec<UrlEntry> = sitemap.all_entries().cloned().collect();
    let locs: Vec<String> = entries.iter().map(|e| e.loc.clone()).collect();
    let checks = head_scan::scan_urls(&locs, client, concurrency).await;

    Ok(compile_report(
        &sitemap.site,
        &entries,
        &checks,
        robots.as_ref(),
    ))
}

/// Assemble the report from scan results. Pure so it can be tested
/// without a server.
pub fn compile_report(
    site: &str,
    entries: &[UrlEntry],
    checks: &[UrlCheck],
    robots: Option<&RobotsTxt>,
) -> AuditReport {
    let mut broken = Vec::new();
    let mut redirected = Vec::new();
    let mut non_html = Vec::new();
    let mut reachable = 0;

    for check in checks {
        if check.is_broken() {
            broken.push(BrokenUrl {
                url: check.url.clone(),
                status: check.status,
            });
            continue;
        }
        reachable += 1;
        if check.is_redirected() {
            redirected.push(RedirectedUrl {
                from: check.url.clone(),
                to: check.final_url.clone(),
            });
        }
        if !check.is_html {
            non_html.push(check.url.clone());
        }
    }

    let robots_disallowed = match robots {
        Some(rules) => entries
            .iter()
            .filter(|e| !e.loc.is_empty() && !rules.is_allowed(&e.loc))
            .map(|e| e.loc.clone())
            .collect(),
        None => Vec::new(),
    };

    let invalid_entries = entries.iter().flat_map(validate::validate_entry).collect();

    AuditReport {
        site: site.to_string(),
        total_urls: entries.len(),
        reachable,
        broken,
        redirected,
        non_html,
        robots_disallowed,
        duplicates: validate::find_duplicates(entries),
        invalid_entries,
        robots_checked: robots.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(url: &str, status: u16) -> UrlCheck {
        UrlCheck {
            url: url.to_string(),
            final_url: url.to_string(),
            status,
            content_type: Some("text/html".to_string()),
            is_html: true,
            is_fresh: false,
        }
    }

    #[test]
    fn test_compile_report_counts() {
        let entries = vec![
            UrlEntry::new("https://example.com/a"),
            UrlEntry::new("https://example.com/b"),
            UrlEntry::new("https://example.com/c"),
        ];
        let mut checks = vec![
            check("https://example.com/a", 200),
            check("https://example.com/b", 404),
            check("https://example.com/c", 200),
        ];
        checks[2].final_url = "https://example.com/c/".to_string();

        let report = compile_report("https://example.com/", &entries, &checks, None);
        assert_eq!(report.total_urls, 3);
        assert_eq!(report.reachable, 2);
        assert_eq!(report.broken.len(), 1);
        assert_eq!(report.broken[0].status, 404);
        assert_eq!(report.redirected.len(), 1);
        assert!(!report.robots_checked);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_robots_disallowed_flagged() {
        let robots = RobotsTxt::parse("User-agent: *\nDisallow: /private/\n", "sitemapper");
        let entries = vec![
            UrlEntry::new("https://example.com/public"),
            UrlEntry::new("https://example.com/private/report"),
        ];
        let checks = vec![
            check("https://example.com/public", 200),
            check("https://example.com/private/report", 200),
        ];

        let report = compile_report("https://example.com/", &entries, &checks, Some(&robots));
        assert!(report.robots_checked);
        assert_eq!(
            report.robots_disallowed,
            vec!["https://example.com/private/report"]
        );
    }

    #[test]
    fn test_duplicates_and_invalid_metadata() {
        let entries = vec![
            UrlEntry::new("https://example.com/a"),
            UrlEntry::new("https://example.com/a"),
            UrlEntry::new("https://example.com/b").with_lastmod("not-a-date"),
        ];
        let checks: Vec<UrlCheck> = entries.iter().map(|e| check(&e.loc, 200)).collect();

        let report = compile_report("https://example.com/", &entries, &checks, None);
        assert_eq!(report.duplicates, vec!["https://example.com/a"]);
        assert_eq!(report.invalid_entries.len(), 1);
        assert!(report.invalid_entries[0].problem.contains("lastmod"));
    }

    #[test]
    fn test_clean_report() {
        let entries = vec![UrlEntry::new("https://example.com/a")];
        let checks = vec![check("https://example.com/a", 200)];
        let report = compile_report("https://example.com/", &entries, &checks, None);
        assert!(report.is_clean());
        assert_eq!(report.reachable, 1);
    }
}
