//! `[sitemap]` section configuration.
//!
//! Output location and the table of static pages listed ahead of posts.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// How frequently a page is likely to change, per the sitemaps.org protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
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
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page that exists independently of `posts.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticPage {
    /// Path below the base URL. Empty means the homepage.
    #[serde(default)]
    pub path: String,

    /// Relative priority in `0.0..=1.0`.
    pub priority: f32,

    pub changefreq: ChangeFreq,
}

/// `[sitemap]` section in factsite.toml.
///
/// # Example
/// ```toml
/// [sitemap]
/// path = "public/sitemap.xml"
///
/// [[sitemap.pages]]
/// path = ""
/// priority = 1.0
/// changefreq = "weekly"
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Output file (relative to root).
    #[serde(default = "defaults::sitemap::path")]
    #[educe(Default = defaults::sitemap::path())]
    pub path: PathBuf,

    /// Static pages, emitted in this order. Replaces the default table when set.
    #[serde(default = "defaults::sitemap::pages")]
    #[educe(Default = defaults::sitemap::pages())]
    pub pages: Vec<StaticPage>,
}
