//! Per-entry validation against the sitemaps.org constraints.

use crate::model::entry::UrlEntry;
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// Maximum URL entries a single sitemap file may carry.
pub const MAX_URLS_PER_SITEMAP: usize = 50_000;
/// Maximum length of a `<loc>` value.
pub const MAX_LOC_LEN: usize = 2048;

/// A validation problem found on one entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntryIssue {
    /// Location of the offending entry (may be empty).
    pub loc: String,
    /// Human-readable description of the problem.
    pub problem: String,
}

/// Check a single entry. Returns one issue per violated constraint.
pub fn validate_entry(entry: &UrlEntry) -> Vec<EntryIssue> {
    let mut issues = Vec::new();
    let issue = |problem: String| EntryIssue {
        loc: entry.loc.clone(),
        problem,
    };

    if entry.loc.is_empty() {
        issues.push(issue("empty <loc>".to_string()));
    } else {
        if entry.loc.len() > MAX_LOC_LEN {
            issues.push(issue(format!(
                "<loc> is {} chars, limit is {MAX_LOC_LEN}",
                entry.loc.len()
            )));
        }
        match Url::parse(&entry.loc) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => issues.push(issue(format!("unsupported scheme '{}'", url.scheme()))),
            Err(_) => issues.push(issue("<loc> is not an absolute URL".to_string())),
        }
    }

    if let Some(lastmod) = &entry.lastmod {
        if !is_valid_lastmod(lastmod) {
            issues.push(issue(format!("invalid <lastmod> '{lastmod}'")));
        }
    }

    if let Some(priority) = entry.priority {
        if !(0.0..=1.0).contains(&priority) {
            issues.push(issue(format!("<priority> {priority} outside 0.0..=1.0")));
        }
    }

    issues
}

/// Locations listed more than once across a set of entries.
pub fn find_duplicates<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a UrlEntry>,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for entry in entries {
        if !seen.insert(entry.loc.as_str()) && reported.insert(entry.loc.as_str()) {
            duplicates.push(entry.loc.clone());
        }
    }
    duplicates
}

/// Accept `YYYY-MM-DD` dates and RFC 3339 timestamps, the two lastmod
/// forms the protocol allows.
pub fn is_valid_lastmod(value: &str) -> bool {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_entry_has_no_issues() {
        let entry = UrlEntry::new("https://example.com/about").with_lastmod("2023-04-06");
        assert!(validate_entry(&entry).is_empty());
    }

    #[test]
    fn test_empty_and_relative_locs_flagged() {
        let entry = UrlEntry::parsed("", "", vec![]);
        assert_eq!(validate_entry(&entry).len(), 1);

        let entry = UrlEntry::parsed("/about", "", vec![]);
        let issues = validate_entry(&entry);
        assert!(issues
            .iter()
            .any(|i| i.problem.contains("absolute")));
    }

    #[test]
    fn test_bad_scheme_flagged() {
        let entry = UrlEntry::parsed("ftp://example.com/file", "", vec![]);
        let issues = validate_entry(&entry);
        assert!(issues.iter().any(|i| i.problem.contains("scheme")));
    }

    #[test]
    fn test_lastmod_forms() {
        assert!(is_valid_lastmod("2023-04-06"));
        assert!(is_valid_lastmod("2023-04-06T10:30:00+02:00"));
        assert!(!is_valid_lastmod("06/04/2023"));
        assert!(!is_valid_lastmod("yesterday"));
    }

    #[test]
    fn test_priority_range() {
        let entry = UrlEntry::new("https://example.com/").with_priority(1.5);
        assert!(validate_entry(&entry)
            .iter()
            .any(|i| i.problem.contains("priority")));
    }

    #[test]
    fn test_find_duplicates_reports_once() {
        let entries = vec![
            UrlEntry::new("https://example.com/a"),
            UrlEntry::new("https://example.com/b"),
            UrlEntry::new("https://example.com/a"),
            UrlEntry::new("https://example.com/a"),
        ];
        assert_eq!(find_duplicates(&entries), vec!["https://example.com/a"]);
    }
}
