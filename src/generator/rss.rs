//! RSS feed generation.
//!
//! Lists the newest posts, each with a plain-text excerpt of its body and one
//! category per tag. Sentinel posts are never part of the feed.

use super::sitemap::escape_xml;
use crate::{
    config::SiteConfig,
    data::{Post, load_posts},
    log,
};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, sync::LazyLock};

// ============================================================================
// Constants
// ============================================================================

/// Excerpt length in characters, before the `...` marker.
const EXCERPT_CHARS: usize = 300;

const GENERATOR: &str = concat!("factsite ", env!("CARGO_PKG_VERSION"));

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&[a-zA-Z]+;").unwrap());

// ============================================================================
// Public API
// ============================================================================

/// Load posts, write the feed and log the item count.
///
/// `now` stamps every item's `pubDate` and the channel's `lastBuildDate`.
pub fn build_rss(config: &SiteConfig, now: DateTime<Utc>) -> Result<usize> {
    let posts = load_posts(&config.build.posts)?;

    let feed = RssFeed::build(config, &posts, now)?;
    let count = feed.items.len();
    feed.write()?;

    log!("rss"; "{count} items");
    if config.base.is_placeholder() {
        log!(
            "rss";
            "[base.url] is still {}, set your real domain before publishing",
            config.base.url
        );
    }
    Ok(count)
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// rss feed builder
struct RssFeed<'a> {
    config: &'a SiteConfig,
    items: Vec<rss::Item>,
    /// RFC 2822 build time
    date: String,
}

impl<'a> RssFeed<'a> {
    /// Convert the newest non-sentinel posts, last entry of the file first.
    fn build(config: &'a SiteConfig, posts: &[Post], now: DateTime<Utc>) -> Result<Self> {
        let date = format_date(now);
        let base = config.base.url_trimmed();

        let items = posts
            .iter()
            .rev()
            .filter(|post| post.id.sentinel().is_none())
            .take(config.rss.limit)
            .map(|post| post_to_rss_item(post, base, &date))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            items,
            date,
        })
    }

    /// Generate rss xml string
    fn into_xml(self) -> Result<String> {
        let feed = &self.config.rss;

        let channel = ChannelBuilder::default()
            .title(&feed.title)
            .link(self.config.base.url_trimmed())
            .description(&feed.description)
            .language(feed.language.clone())
            .generator(GENERATOR.to_string())
            .last_build_date(self.date)
            .items(self.items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(with_stylesheet(channel.to_string(), &feed.stylesheet))
    }

    /// Write rss feed to file, replacing any previous one.
    fn write(self) -> Result<()> {
        let config = self.config;
        let rss_path = &config.rss.path;
        let xml = self.into_xml()?;

        fs::write(rss_path, xml)
            .with_context(|| format!("Failed to write rss feed to {}", rss_path.display()))?;

        log!("rss"; "{}", rss_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a post to an rss item linking to its page.
///
/// Fails when the post's tags or text have the wrong JSON type.
fn post_to_rss_item(post: &Post, base: &str, date: &str) -> Result<rss::Item> {
    let link = format!("{base}/post.html?id={}", post.id);
    let categories = post
        .tag_list()?
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.as_str()).build())
        .collect::<Vec<_>>();

    Ok(ItemBuilder::default()
        .title(post.title.to_string())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(excerpt(post.body()?))
        .pub_date(date.to_string())
        .categories(categories)
        .build())
}

/// Plain text of `html`, cut to [`EXCERPT_CHARS`] characters plus `...`.
fn excerpt(html: &str) -> String {
    let text = strip_html(html);
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text,
    }
}

/// Drop tags and soft hyphens, then decode the common named entities.
///
/// Unknown entities and numeric references are left as they are.
fn strip_html(html: &str) -> String {
    let text = RE_TAG.replace_all(html, "").replace("&shy;", "");

    RE_ENTITY
        .replace_all(&text, |caps: &Captures| match decode_entity(&caps[0]) {
            Some(decoded) => decoded.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<&'static str> {
    Some(match entity {
        "&amp;" => "&",
        "&lt;" => "<",
        "&gt;" => ">",
        "&quot;" => "\"",
        "&ndash;" => "–",
        "&mdash;" => "—",
        "&hellip;" => "…",
        _ => return None,
    })
}

/// Format as RFC 2822 with a `GMT` zone, e.g. `Wed, 01 Jan 2025 12:00:00 GMT`.
fn format_date(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Insert an `xml-stylesheet` instruction right after the XML declaration.
fn with_stylesheet(xml: String, href: &str) -> String {
    if href.is_empty() {
        return xml;
    }

    let pi = format!(r#"<?xml-stylesheet type="text/xsl" href="{}"?>"#, escape_xml(href));
    match xml.find("?>") {
        Some(end) if xml.starts_with("<?xml ") => {
            let (decl, rest) = xml.split_at(end + 2);
            format!("{decl}\n{pi}{rest}")
        }
        _ => format!("{pi}\n{xml}"),
    }
}

// ============================================================================
// Tests
// ============================================================================
