//! `[rss]` section configuration.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::path::PathBuf;

/// `[rss]` section in factsite.toml.
///
/// # Example
/// ```toml
/// [rss]
/// path = "public/rss.xml"
/// title = "Facts"
/// limit = 10
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct RssConfig {
    /// Output file (relative to root).
    #[serde(default = "defaults::rss::path")]
    #[educe(Default = defaults::rss::path())]
    pub path: PathBuf,

    /// Channel title.
    #[serde(default = "defaults::rss::title")]
    #[educe(Default = defaults::rss::title())]
    pub title: String,

    /// Channel description.
    #[serde(default = "defaults::rss::description")]
    #[educe(Default = defaults::rss::description())]
    pub description: String,

    /// Channel language tag.
    #[serde(default = "defaults::rss::language")]
    #[educe(Default = defaults::rss::language())]
    pub language: String,

    /// Maximum number of items, newest first.
    #[serde(default = "defaults::rss::limit")]
    #[educe(Default = defaults::rss::limit())]
    pub limit: usize,

    /// XSL stylesheet referenced from the feed. Empty disables it.
    #[serde(default = "defaults::rss::stylesheet")]
    #[educe(Default = defaults::rss::stylesheet())]
    pub stylesheet: String,
}
