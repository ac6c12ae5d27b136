//! On-disk cache of fetched sitemap trees, one JSON file per host.

use crate::model::sitemap::Sitemap;
use std::path::PathBuf;

/// Root directory for sitemapper state.
///
/// `SITEMAPPER_HOME` overrides the default `~/.sitemapper`.
pub fn sitemapper_home() -> PathBuf {
    if let Ok(p) = std::env::var("SITEMAPPER_HOME") {
        return PathBuf::from(p);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".sitemapper")
}

/// Directory holding cached sitemap trees.
pub fn cache_dir() -> PathBuf {
    sitemapper_home().join("cache")
}

/// Path a host's cached tree is stored under.
pub fn cached_path(host: &str) -> PathBuf {
    cache_dir().join(format!("{host}.json"))
}

/// Load a host's cached sitemap tree, if present and readable.
pub fn load(host: &str) -> Option<Sitemap> {
    let data = std::fs::read_to_string(cached_path(host)).ok()?;
    serde_json::from_str(&data).ok()
}

/// Age of a host's cache entry in seconds, if present.
pub fn age_secs(host: &str) -> Option<u64> {
    cached_path(host)
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.elapsed().ok())
        .map(|d| d.as_secs())
}

/// Store a sitemap tree for a host, creating the cache directory as needed.
pub fn store(host: &str, sitemap: &Sitemap) -> std::io::Result<()> {
    std::fs::create_dir_all(cache_dir())?;
    let data = serde_json::to_string_pretty(sitemap).unwrap_or_default();
    std::fs::write(cached_path(host), data)
}

/// Remove one host's cache entry. Returns whether a file was removed.
pub fn clear_host(host: &str) -> std::io::Result<bool> {
    let path = cached_path(host);
    if path.exists() {
        std::fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Remove every cached tree. Returns (files removed, bytes freed).
pub fn clear_all() -> std::io::Result<(usize, u64)> {
    let mut count = 0;
    let mut bytes = 0u64;
    if let Ok(entries) = std::fs::read_dir(cache_dir()) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(meta) = path.metadata() {
                    bytes += meta.len();
                }
                std::fs::remove_file(&path)?;
                count += 1;
            }
        }
    }
    Ok((count, bytes))
}
