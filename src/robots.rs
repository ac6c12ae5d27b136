//! Minimal robots.txt parsing.
//!
//! Two things matter for sitemaps: the global `Sitemap:` directives used
//! during discovery, and the Allow/Disallow rules the audit pass checks
//! listed URLs against.

use crate::urlutil;

/// Rules parsed from a robots.txt file for one user agent.
#[derive(Debug, Clone, Default)]
pub struct RobotsTxt {
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub crawl_delay: Option<f32>,
    pub sitemap_urls: Vec<String>,
}

impl RobotsTxt {
    /// Parse robots.txt text for one user agent.
    ///
    /// Rules from a group naming `user_agent` exactly win over the `*`
    /// group; with neither present everything is allowed. `Sitemap:`
    /// directives are global and collected regardless of group,
    /// deduplicated in order.
    pub fn parse(txt: &str, user_agent: &str) -> Self {
        let ua_lower = user_agent.to_lowercase();
        let mut star = RobotsTxt::default();
        let mut exact = RobotsTxt::default();
        let mut has_exact_group = false;
        let mut sitemap_urls: Vec<String> = Vec::new();

        // Consecutive User-agent lines open one shared group.
        let mut applies_star = false;
        let mut applies_exact = false;
        let mut prev_was_ua = false;

        for line in txt.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // Inline comments
            let line = line.split('#').next().unwrap_or("").trim();

            let Some((raw_key, _)) = line.split_once(':') else {
                continue;
            };
            let key = raw_key.trim().to_lowercase();
            // Sitemap values are URLs and contain ':' themselves
            let value = line[raw_key.len() + 1..].trim();

            if key == "user-agent" {
                if !prev_was_ua {
                    applies_star = false;
                    applies_exact = false;
                }
                let ua = value.to_lowercase();
                if ua == "*" {
                    applies_star = true;
                }
                if ua == ua_lower {
                    applies_exact = true;
                    has_exact_group = true;
                }
                prev_was_ua = true;
                continue;
            }
            prev_was_ua = false;

            if key == "sitemap" {
                if !value.is_empty() && !sitemap_urls.iter().any(|s| s == value) {
                    sitemap_urls.push(value.to_string());
                }
                continue;
            }

            for (applies, rules) in [(applies_exact, &mut exact), (applies_star, &mut star)] {
                if !applies {
                    continue;
                }
                match key.as_str() {
                    "allow" if !value.is_empty() => rules.allow.push(value.to_string()),
                    "disallow" if !value.is_empty() => rules.disallow.push(value.to_string()),
                    "crawl-delay" => {
                        if let Ok(delay) = value.parse::<f32>() {
                            rules.crawl_delay = Some(delay);
                        }
                    }
                    _ => {}
                }
            }
        }

        let mut rules = if has_exact_group { exact } else { star };
        rules.sitemap_urls = sitemap_urls;
        rules
    }

    /// Check whether a path (or full URL) is allowed. The longer of any
    /// matching Allow/Disallow pattern wins, Allow on ties.
    pub fn is_allowed(&self, url_or_path: &str) -> bool {
        let path = path_component(url_or_path);

        let longest_disallow = self
            .disallow
            .iter()
            .filter(|p| pattern_matches(path, p))
            .map(|p| p.len())
            .max();
        let longest_allow = self
            .allow
            .iter()
            .filter(|p| pattern_matches(path, p))
            .map(|p| p.len())
            .max();

        match (longest_allow, longest_disallow) {
            (Some(a), Some(d)) => a >= d,
            (None, Some(_)) => false,
            _ => true,
        }
    }
}

/// Reduce a full URL to its path; bare paths pass through.
fn path_component(url_or_path: &str) -> &str {
    if url_or_path.starts_with("http://") || url_or_path.starts_with("https://") {
        let stripped = urlutil::strip_fragment(url_or_path);
        let after_scheme = &stripped[stripped.find("://").map(|i| i + 3).unwrap_or(0)..];
        match after_scheme.find('/') {
            Some(i) => &after_scheme[i..],
            None => "/",
        }
    } else {
        url_or_path
    }
}

/// robots.txt prefix matching with trailing `*` and `$` support.
fn pattern_matches(path: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return path.starts_with(prefix);
    }
    if let Some(exact) = pattern.strip_suffix('$') {
        return path == exact;
    }
    path.starts_with(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROBOTS: &str = r#"
# robots for example.com
User-agent: *
Allow: /
Disallow: /admin
Disallow: /private/
Crawl-delay: 1.5

Sitemap: https://example.com/sitemap.xml
Sitemap: https://example.com/news-sitemap.xml
Sitemap: https://example.com/sitemap.xml
"#;

    #[test]
    fn test_parse_collects_sitemaps_deduplicated() {
        let rules = RobotsTxt::parse(ROBOTS, "sitemapper");
        assert_eq!(
            rules.sitemap_urls,
            vec![
                "https://example.com/sitemap.xml",
                "https://example.com/news-sitemap.xml"
            ]
        );
        assert_eq!(rules.crawl_delay, Some(1.5));
    }

    #[test]
    fn test_is_allowed() {
        let rules = RobotsTxt::parse(ROBOTS, "sitemapper");
        assert!(rules.is_allowed("/"));
        assert!(rules.is_allowed("/blog/post"));
        assert!(!rules.is_allowed("/admin"));
        assert!(!rules.is_allowed("/admin/settings"));
        assert!(!rules.is_allowed("/private/data"));
    }

    #[test]
    fn test_is_allowed_accepts_full_urls() {
        let rules = RobotsTxt::parse(ROBOTS, "sitemapper");
        assert!(!rules.is_allowed("https://example.com/admin/settings"));
        assert!(rules.is_allowed("https://example.com/about"));
        assert!(rules.is_allowed("https://example.com"));
    }

    #[test]
    fn test_allow_overrides_disallow_on_longer_match() {
        let txt = "User-agent: *\nDisallow: /api/\nAllow: /api/public/\n";
        let rules = RobotsTxt::parse(txt, "sitemapper");
        assert!(!rules.is_allowed("/api/secret"));
        assert!(rules.is_allowed("/api/public/docs"));
    }

    #[test]
    fn test_group_scoping() {
        let txt = "User-agent: googlebot\nDisallow: /\n\nUser-agent: sitemapper\nDisallow: /tmp/\n";
        let rules = RobotsTxt::parse(txt, "sitemapper");
        assert!(rules.is_allowed("/about"));
        assert!(!rules.is_allowed("/tmp/cache"));
    }
}
