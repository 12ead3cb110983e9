//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    /// Placeholder domain. The sitemap summary reminds the user to replace it.
    pub const PLACEHOLDER_URL: &str = "https://yourwebsite.com";

    pub fn url() -> String {
        PLACEHOLDER_URL.into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn posts() -> PathBuf {
        "posts.json".into()
    }
}

// ============================================================================
// [sitemap] Section Defaults
// ============================================================================

pub mod sitemap {
    use super::super::{ChangeFreq, StaticPage};
    use std::path::PathBuf;

    pub fn path() -> PathBuf {
        "sitemap.xml".into()
    }

    /// Pages that exist outside `posts.json`, homepage first.
    pub fn pages() -> Vec<StaticPage> {
        [
            ("", 1.0, ChangeFreq::Weekly),
            ("about.html", 0.8, ChangeFreq::Monthly),
            ("faq.html", 0.7, ChangeFreq::Monthly),
            ("statement.html", 0.6, ChangeFreq::Yearly),
            ("death.html", 0.7, ChangeFreq::Monthly),
            ("tax-revolt.html", 0.7, ChangeFreq::Monthly),
        ]
        .into_iter()
        .map(|(path, priority, changefreq)| StaticPage {
            path: path.into(),
            priority,
            changefreq,
        })
        .collect()
    }
}

// ============================================================================
// [rss] Section Defaults
// ============================================================================

pub mod rss {
    use std::path::PathBuf;

    pub fn path() -> PathBuf {
        "rss.xml".into()
    }

    pub fn title() -> String {
        "Wesley Snipes Facts™".into()
    }

    pub fn description() -> String {
        "Your Home for Wesley Snipes Fact Checks!".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }

    pub const fn limit() -> usize {
        20
    }

    pub fn stylesheet() -> String {
        "rss.xsl".into()
    }
}
