//! `sitemapper audit <target>` — HEAD-scan every URL a sitemap lists.

use crate::audit::{self, AuditReport};
use crate::cli::output::{self, Styled};
use crate::discovery;
use crate::fetch::HttpClient;
use anyhow::{Context, Result};

/// Run the audit command. `target` is a site root or a sitemap URL.
pub async fn run(target: &str, concurrency: usize) -> Result<()> {
    let s = Styled::new();
    let client = HttpClient::new()?;

    // A target ending in .xml names the sitemap itself; derive the site
    // from its host.
    let (site, sitemap_url) = if target.ends_with(".xml") {
        let file_url = crate::urlutil::correct_file_url(target);
        let site = crate::urlutil::origin_of(&file_url)
            .ok_or_else(|| anyhow::anyhow!("cannot derive a site from '{target}'"))?;
        (site, Some(file_url))
    } else {
        (target.to_string(), None)
    };

    if !output::is_quiet() && !output::is_json() {
        eprintln!("  Auditing {target}...");
    }

    let sitemap = discovery::fetch_sitemap_tree(&client, &site, sitemap_url.as_deref(), true)
        .await
        .context("failed to fetch sitemap")?;
    let report = audit::audit_sitemap(&client, &sitemap, concurrency).await?;

    if output::is_json() {
        if let Ok(value) = serde_json::to_value(&report) {
            output::print_json(&value);
        }
    } else {
        print_report(&s, &report);
    }

    if !report.broken.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(s: &Styled, report: &AuditReport) {
    eprintln!();
    eprintln!("  {}", s.bold(&report.site));
    eprintln!("  {:<19}{}", "URLs listed:", report.total_urls);
    eprintln!(
        "  {:<19}{}",
        "Reachable:",
        s.green(&report.reachable.to_string())
    );

    print_count_line(s, "Broken", report.broken.len(), true);
    if output::is_verbose() {
        for b in &report.broken {
            eprintln!("    {} {} (HTTP {})", s.fail_sym(), b.url, b.status);
        }
    }

    print_count_line(s, "Redirected", report.redirected.len(), false);
    if output::is_verbose() {
        for r in &report.redirected {
            eprintln!("    {} {} -> {}", s.warn_sym(), r.from, r.to);
        }
    }

    print_count_line(s, "Non-HTML", report.non_html.len(), false);
    if report.robots_checked {
        print_count_line(s, "Robots-disallowed", report.robots_disallowed.len(), false);
        if output::is_verbose() {
            for url in &report.robots_disallowed {
                eprintln!("    {} {url}", s.warn_sym());
            }
        }
    } else {
        eprintln!(
            "  {:<19}{}",
            "Robots-disallowed:",
            s.dim("(robots.txt unavailable)")
        );
    }
    print_count_line(s, "Duplicates", report.duplicates.len(), false);
    print_count_line(s, "Invalid metadata", report.invalid_entries.len(), false);
    if output::is_verbose() {
        for issue in &report.invalid_entries {
            eprintln!("    {} {}: {}", s.warn_sym(), issue.loc, issue.problem);
        }
    }

    eprintln!();
    if report.is_clean() {
        eprintln!("  {} Sitemap is clean.", s.ok_sym());
    } else {
        eprintln!(
            "  {} Findings above; re-run with --verbose for details.",
            s.warn_sym()
        );
    }
}

fn print_count_line(s: &Styled, label: &str, count: usize, is_error: bool) {
    let value = if count == 0 {
        s.dim("0")
    } else if is_error {
        s.red(&count.to_string())
    } else {
        s.yellow(&count.to_string())
    };
    eprintln!("  {:<19}{value}", format!("{label}:"));
}
