//! Sitemap generation.
//!
//! Generates a sitemap.xml listing the static pages, every post page and one
//! page per tag, for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/post.html?id=1</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.6</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::{ChangeFreq, SiteConfig},
    data::{Post, load_posts},
    log,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::{collections::BTreeSet, fmt, fs};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const POST_CHANGEFREQ: ChangeFreq = ChangeFreq::Monthly;
const POST_PRIORITY: f32 = 0.6;
const TAG_CHANGEFREQ: ChangeFreq = ChangeFreq::Weekly;
const TAG_PRIORITY: f32 = 0.7;

// ============================================================================
// Public API
// ============================================================================

/// Load posts, write the sitemap and log a summary.
///
/// `lastmod` defaults to today's local date.
pub fn build_sitemap(config: &SiteConfig, lastmod: Option<NaiveDate>) -> Result<SitemapSummary> {
    let posts = load_posts(&config.build.posts)?;
    let lastmod = lastmod.unwrap_or_else(|| Local::now().date_naive());

    let sitemap = Sitemap::from_posts(config, &posts, lastmod)?;
    let summary = sitemap.summary;
    sitemap.write(config)?;

    log!("sitemap"; "{summary}");
    if config.base.is_placeholder() {
        log!(
            "sitemap";
            "[base.url] is still {}, set your real domain before publishing",
            config.base.url
        );
    }
    Ok(summary)
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
struct Sitemap {
    /// List of URL entries: static pages, then posts, then tags
    urls: Vec<UrlEntry>,
    /// Shared `<lastmod>` value, YYYY-MM-DD
    lastmod: String,
    summary: SitemapSummary,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    changefreq: ChangeFreq,
    priority: f32,
}

/// Page counts per source, logged after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitemapSummary {
    pub static_pages: usize,
    pub post_pages: usize,
    pub tag_pages: usize,
}

impl SitemapSummary {
    pub const fn total(&self) -> usize {
        self.static_pages + self.post_pages + self.tag_pages
    }
}

impl fmt::Display for SitemapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} static pages, {} post pages, {} tag pages, {} urls total",
            self.static_pages,
            self.post_pages,
            self.tag_pages,
            self.total()
        )
    }
}

impl Sitemap {
    /// Collect URL entries from the static page table and the posts.
    ///
    /// A post whose id is a sentinel without a page of its own (the alert)
    /// contributes neither a post URL nor tags, so its tags are never read.
    fn from_posts(config: &SiteConfig, posts: &[Post], lastmod: NaiveDate) -> Result<Self> {
        let base = config.base.url_trimmed();
        let listed: Vec<&Post> = posts.iter().filter(|post| has_page(post)).collect();
        let tags = collect_tags(&listed)?;

        let static_urls = config.sitemap.pages.iter().map(|page| UrlEntry {
            loc: if page.path.is_empty() {
                base.to_string()
            } else {
                format!("{base}/{}", page.path)
            },
            changefreq: page.changefreq,
            priority: page.priority,
        });
        let post_urls = listed.iter().map(|post| UrlEntry {
            loc: format!("{base}/post.html?id={}", post.id),
            changefreq: POST_CHANGEFREQ,
            priority: POST_PRIORITY,
        });
        let tag_urls = tags.iter().map(|tag| UrlEntry {
            loc: format!("{base}/tag.html?tag={}", encode_tag(tag)),
            changefreq: TAG_CHANGEFREQ,
            priority: TAG_PRIORITY,
        });

        let summary = SitemapSummary {
            static_pages: config.sitemap.pages.len(),
            post_pages: listed.len(),
            tag_pages: tags.len(),
        };

        Ok(Self {
            urls: static_urls.chain(post_urls).chain(tag_urls).collect(),
            lastmod: lastmod.format("%Y-%m-%d").to_string(),
            summary,
        })
    }

    /// Generate sitemap XML string: one element per line, no trailing newline.
    fn into_xml(self) -> String {
        let mut lines = Vec::with_capacity(self.urls.len() * 6 + 3);

        lines.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string());
        lines.push(format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));

        for entry in self.urls {
            lines.push("  <url>".to_string());
            lines.push(format!("    <loc>{}</loc>", escape_xml(&entry.loc)));
            lines.push(format!("    <lastmod>{}</lastmod>", self.lastmod));
            lines.push(format!("    <changefreq>{}</changefreq>", entry.changefreq));
            lines.push(format!("    <priority>{}</priority>", format_priority(entry.priority)));
            lines.push("  </url>".to_string());
        }

        lines.push("</urlset>".to_string());
        lines.join("\n")
    }

    /// Write sitemap to output file, replacing any previous one.
    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = &config.sitemap.path;
        let xml = self.into_xml();

        fs::write(sitemap_path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{}", sitemap_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Whether the post gets its own URL. Only a sentinel can opt out.
fn has_page(post: &Post) -> bool {
    post.id.sentinel().is_none_or(|sentinel| sentinel.has_page())
}

/// Distinct tags of the given posts, sorted ascending.
fn collect_tags<'a>(posts: &[&'a Post]) -> Result<BTreeSet<&'a str>> {
    let mut tags = BTreeSet::new();
    for &post in posts {
        tags.extend(post.tag_list()?.iter().map(String::as_str));
    }
    Ok(tags)
}

/// Percent-encode a tag for use as a query value.
///
/// Leaves `/` alone, matching the links the site's own tag pages generate.
fn encode_tag(tag: &str) -> String {
    urlencoding::encode(tag).replace("%2F", "/")
}

/// Render a priority with at least one decimal (`1.0`, `0.7`, `0.25`).
fn format_priority(priority: f32) -> String {
    if priority.fract() == 0.0 {
        format!("{priority:.1}")
    } else {
        priority.to_string()
    }
}

/// Escape special XML characters.
pub(super) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn example_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.url = "https://example.com".into();
        config
    }

    fn example_posts() -> Vec<Post> {
        serde_json::from_value(json!([
            {"id": "alert", "title": "x", "tags": ["a"]},
            {"id": 1, "title": "Fact #1", "tags": ["a", "b"]},
            {"id": 2, "title": "Fact #2", "tags": ["b"]},
        ]))
        .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn locs(xml: &str) -> Vec<&str> {
        xml.lines()
            .filter_map(|line| line.trim().strip_prefix("<loc>"))
            .filter_map(|line| line.strip_suffix("</loc>"))
            .collect()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_encode_tag() {
        assert_eq!(encode_tag("movies"), "movies");
        assert_eq!(encode_tag("tax revolt"), "tax%20revolt");
        assert_eq!(encode_tag("a&b"), "a%26b");
        assert_eq!(encode_tag("blade/trinity"), "blade/trinity");
        assert_eq!(encode_tag("one-two_three.~"), "one-two_three.~");
        assert_eq!(encode_tag("café"), "caf%C3%A9");
    }

    #[test]
    fn test_format_priority() {
        assert_eq!(format_priority(1.0), "1.0");
        assert_eq!(format_priority(0.0), "0.0");
        assert_eq!(format_priority(0.7), "0.7");
        assert_eq!(format_priority(0.25), "0.25");
    }

    #[test]
    fn test_example_collection() {
        let config = example_config();
        let sitemap = Sitemap::from_posts(&config, &example_posts(), date()).unwrap();
        assert_eq!(
            sitemap.summary,
            SitemapSummary {
                static_pages: 6,
                post_pages: 2,
                tag_pages: 2,
            }
        );
        assert_eq!(sitemap.summary.total(), 10);

        let xml = sitemap.into_xml();
        assert_eq!(
            locs(&xml),
            [
                "https://example.com",
                "https://example.com/about.html",
                "https://example.com/faq.html",
                "https://example.com/statement.html",
                "https://example.com/death.html",
                "https://example.com/tax-revolt.html",
                "https://example.com/post.html?id=1",
                "https://example.com/post.html?id=2",
                "https://example.com/tag.html?tag=a",
                "https://example.com/tag.html?tag=b",
            ]
        );
        assert_eq!(xml.matches("<url>").count(), 10);
        assert_eq!(xml.matches("<lastmod>2025-01-01</lastmod>").count(), 10);
        assert!(!xml.contains("id=alert"));
    }

    #[test]
    fn test_xml_structure() {
        let config = example_config();
        let xml = Sitemap::from_posts(&config, &example_posts(), date()).unwrap().into_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines[1], format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        assert_eq!(
            &lines[2..8],
            [
                "  <url>",
                "    <loc>https://example.com</loc>",
                "    <lastmod>2025-01-01</lastmod>",
                "    <changefreq>weekly</changefreq>",
                "    <priority>1.0</priority>",
                "  </url>",
            ]
        );
        assert_eq!(*lines.last().unwrap(), "</urlset>");
        assert!(!xml.ends_with('\n'));
    }

    #[test]
    fn test_post_and_tag_entries() {
        let config = example_config();
        let xml = Sitemap::from_posts(&config, &example_posts(), date()).unwrap().into_xml();

        assert!(xml.contains(
            "    <loc>https://example.com/post.html?id=1</loc>\n    <lastmod>2025-01-01</lastmod>\n    <changefreq>monthly</changefreq>\n    <priority>0.6</priority>"
        ));
        assert!(xml.contains(
            "    <loc>https://example.com/tag.html?tag=b</loc>\n    <lastmod>2025-01-01</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>0.7</priority>"
        ));
    }

    #[test]
    fn test_big_book_is_listed() {
        let config = example_config();
        let posts: Vec<Post> = serde_json::from_value(json!([
            {"id": "big-book", "title": "The Book", "tags": ["books"]},
            {"id": "alert", "title": "Notice", "tags": ["news"]},
        ]))
        .unwrap();

        let sitemap = Sitemap::from_posts(&config, &posts, date()).unwrap();
        assert_eq!(sitemap.summary.post_pages, 1);
        assert_eq!(sitemap.summary.tag_pages, 1);

        let xml = sitemap.into_xml();
        assert!(xml.contains("<loc>https://example.com/post.html?id=big-book</loc>"));
        assert!(xml.contains("<loc>https://example.com/tag.html?tag=books</loc>"));
        assert!(!xml.contains("tag=news"));
    }

    #[test]
    fn test_tags_sorted_and_deduplicated() {
        let config = example_config();
        let posts: Vec<Post> = serde_json::from_value(json!([
            {"id": 1, "title": "Fact #1", "tags": ["taxes", "Movies", "movies"]},
            {"id": 2, "title": "Fact #2", "tags": ["movies", "art & craft"]},
        ]))
        .unwrap();

        let xml = Sitemap::from_posts(&config, &posts, date()).unwrap().into_xml();
        let tag_locs: Vec<&str> = locs(&xml)
            .into_iter()
            .filter(|loc| loc.contains("tag.html"))
            .collect();
        assert_eq!(
            tag_locs,
            [
                "https://example.com/tag.html?tag=Movies",
                "https://example.com/tag.html?tag=art%20%26%20craft",
                "https://example.com/tag.html?tag=movies",
                "https://example.com/tag.html?tag=taxes",
            ]
        );
    }

    #[test]
    fn test_alert_fields_never_read() {
        let config = example_config();
        let posts: Vec<Post> = serde_json::from_value(json!([
            {"id": "alert", "title": null, "tags": [1]},
            {"id": 1, "title": "Fact #1", "tags": ["a"]},
        ]))
        .unwrap();

        let sitemap = Sitemap::from_posts(&config, &posts, date()).unwrap();
        assert_eq!(sitemap.summary.post_pages, 1);
        assert_eq!(sitemap.summary.tag_pages, 1);
    }

    #[test]
    fn test_listed_post_with_bad_tags() {
        let config = example_config();
        let posts: Vec<Post> = serde_json::from_value(json!([
            {"id": "big-book", "title": 5, "tags": "books"},
        ]))
        .unwrap();

        let err = Sitemap::from_posts(&config, &posts, date()).err().unwrap();
        assert!(err.to_string().starts_with("Post `big-book`: tags must be a list of strings"));
    }

    #[test]
    fn test_label_ids_are_escaped() {
        let config = example_config();
        let posts: Vec<Post> =
            serde_json::from_value(json!([{"id": "a&b", "title": "odd"}])).unwrap();

        let xml = Sitemap::from_posts(&config, &posts, date()).unwrap().into_xml();
        assert!(xml.contains("<loc>https://example.com/post.html?id=a&amp;b</loc>"));
    }

    #[test]
    fn test_trailing_slash_base_url() {
        let mut config = example_config();
        config.base.url = "https://example.com/".into();

        let xml = Sitemap::from_posts(&config, &[], date()).unwrap().into_xml();
        assert_eq!(locs(&xml)[0], "https://example.com");
        assert_eq!(locs(&xml)[1], "https://example.com/about.html");
    }

    #[test]
    fn test_empty_page_table() {
        let mut config = example_config();
        config.sitemap.pages.clear();

        let sitemap = Sitemap::from_posts(&config, &[], date()).unwrap();
        assert_eq!(sitemap.summary.total(), 0);

        let xml = sitemap.into_xml();
        assert!(!xml.contains("<url>"));
        assert!(xml.ends_with("</urlset>"));
    }

    fn write_posts(dir: &TempDir, config: &mut SiteConfig) {
        let posts = dir.path().join("posts.json");
        fs::write(&posts, serde_json::to_string(&json!([
            {"id": "alert", "title": "x", "tags": ["a"]},
            {"id": 1, "title": "Fact #1", "tags": ["a", "b"]},
            {"id": 2, "title": "Fact #2", "tags": ["b"]},
        ])).unwrap())
        .unwrap();
        config.build.posts = posts;
        config.sitemap.path = dir.path().join("sitemap.xml");
    }

    #[test]
    fn test_build_sitemap_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut config = example_config();
        write_posts(&dir, &mut config);

        let summary = build_sitemap(&config, Some(date())).unwrap();
        assert_eq!(summary.total(), 10);

        let xml = fs::read_to_string(&config.sitemap.path).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert_eq!(locs(&xml).len(), 10);
    }

    #[test]
    fn test_build_sitemap_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut config = example_config();
        write_posts(&dir, &mut config);

        build_sitemap(&config, Some(date())).unwrap();
        let first = fs::read(&config.sitemap.path).unwrap();
        build_sitemap(&config, Some(date())).unwrap();
        let second = fs::read(&config.sitemap.path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_sitemap_defaults_to_today() {
        let dir = TempDir::new().unwrap();
        let mut config = example_config();
        write_posts(&dir, &mut config);

        let before = Local::now().date_naive();
        build_sitemap(&config, None).unwrap();
        let after = Local::now().date_naive();

        let xml = fs::read_to_string(&config.sitemap.path).unwrap();
        let stamped = [before, after]
            .iter()
            .any(|day| xml.contains(&format!("<lastmod>{}</lastmod>", day.format("%Y-%m-%d"))));
        assert!(stamped);
    }

    #[test]
    fn test_build_sitemap_unwritable_output() {
        let dir = TempDir::new().unwrap();
        let mut config = example_config();
        write_posts(&dir, &mut config);
        config.sitemap.path = dir.path().join("missing").join("sitemap.xml");

        let err = build_sitemap(&config, Some(date())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write sitemap to"));
    }
}
