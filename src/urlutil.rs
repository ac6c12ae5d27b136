//! URL fix-up and normalization helpers.
//!
//! Sites are frequently given without a scheme or trailing slash
//! ("example.com"); sitemap locations arrive as full URLs. These helpers
//! bring both into canonical form before any request is made.

use url::Url;

/// Canonicalize a site root: prepend `http://` when no scheme is present
/// and make sure the URL ends with a slash so paths can be appended.
pub fn correct_site_url(site: &str) -> String {
    let mut url = site.trim().to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        url = format!("http://{url}");
    }
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Canonicalize a file URL: prepend a scheme when missing, but never
/// append a trailing slash (the path names a file, not a root).
pub fn correct_file_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Host component of a URL, if it parses.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Origin (scheme + host, trailing slash) of a URL, if it parses.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{}://{host}/", parsed.scheme()))
}

/// Resolve a possibly-relative href against a base URL.
///
/// Falls back to naive concatenation when the base does not parse.
pub fn resolve_href(href: &str, base: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(joined) => joined.to_string(),
        Err(_) => {
            let base = base.trim_end_matches('/');
            let href = href.trim_start_matches('/');
            format!("{base}/{href}")
        }
    }
}

/// Strip a fragment from a URL.
pub fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

/// Last path segment of a location, used as the on-disk file name.
///
/// `https://example.com/post-sitemap.xml` -> `post-sitemap.xml`.
pub fn file_name_of(loc: &str) -> String {
    strip_fragment(loc)
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(loc)
        .to_string()
}
