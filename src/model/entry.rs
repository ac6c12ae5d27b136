//! A single `<url>` entry of a sitemap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One URL listed in a sitemap, with its optional sitemaps.org metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlEntry {
    /// Full location URL, scheme included.
    pub loc: String,
    /// Last modification date (`YYYY-MM-DD` or RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
    /// Expected change frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
    /// Crawl priority in `0.0..=1.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    /// Image locations attached via the sitemap-image extension.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl UrlEntry {
    /// Create an entry with `lastmod` defaulting to today's date.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: Some(today()),
            changefreq: None,
            priority: None,
            images: Vec::new(),
        }
    }

    /// Create an entry with explicit metadata, as parsed from XML.
    /// Empty strings become `None`.
    pub fn parsed(loc: impl Into<String>, lastmod: &str, images: Vec<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: if lastmod.is_empty() {
                None
            } else {
                Some(lastmod.to_string())
            },
            changefreq: None,
            priority: None,
            images,
        }
    }

    pub fn with_lastmod(mut self, lastmod: impl Into<String>) -> Self {
        self.lastmod = Some(lastmod.into());
        self
    }

    pub fn with_changefreq(mut self, freq: ChangeFreq) -> Self {
        self.changefreq = Some(freq);
        self
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Append image locations to this entry.
    pub fn add_images<I, S>(&mut self, images: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images.extend(images.into_iter().map(Into::into));
    }
}

/// `<changefreq>` values defined by sitemaps.org.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFreq {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(ChangeFreq::Always),
            "hourly" => Ok(ChangeFreq::Hourly),
            "daily" => Ok(ChangeFreq::Daily),
            "weekly" => Ok(ChangeFreq::Weekly),
            "monthly" => Ok(ChangeFreq::Monthly),
            "yearly" => Ok(ChangeFreq::Yearly),
            "never" => Ok(ChangeFreq::Never),
            _ => Err(()),
        }
    }
}

/// Today's date in the `YYYY-MM-DD` form sitemaps use.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
