//! Post consistency checking.
//!
//! Every numeric post must be titled `Fact #<id>`, and numeric ids must run
//! consecutively in file order. Sentinel posts are skipped entirely and do not
//! interrupt the run.

use crate::{
    config::SiteConfig,
    data::{Post, PostId, load_posts},
    log,
};
use anyhow::{Result, bail};
use regex::Regex;
use std::{fmt, sync::LazyLock};

/// Title of a numeric post. ASCII digits only, anchored on both ends.
static RE_FACT_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Fact #([0-9]+)$").unwrap());

// ============================================================================
// Public API
// ============================================================================

/// Load posts, check them and log the report.
///
/// With `strict`, any issue turns into an error so the process exits non-zero.
pub fn check_site(config: &SiteConfig, strict: bool) -> Result<()> {
    let posts = load_posts(&config.build.posts)?;
    let report = Report::new(check_posts(&posts));

    if report.is_ok() {
        log!("check"; "{report}");
    } else {
        log!("error"; "{report}");
    }

    if strict && !report.is_ok() {
        bail!("{} consistency error(s) in {}", report.issues.len(), config.build.posts.display());
    }
    Ok(())
}

/// Single pass over `posts`, collecting issues in file order.
pub fn check_posts(posts: &[Post]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut prev_num: Option<i64> = None;

    for (index, post) in posts.iter().enumerate() {
        let Some(id) = post.id.as_numeric() else {
            if post.id.sentinel().is_none() {
                issues.push(Issue::IdNotInt {
                    index,
                    id: post.id.clone(),
                });
            }
            continue;
        };

        let Some(caps) = post.title().and_then(|title| RE_FACT_TITLE.captures(title)) else {
            issues.push(Issue::TitleFormat {
                index,
                title: post.title.to_string(),
            });
            continue;
        };

        // Digits too long for i64 cannot equal any id
        let title_num = caps[1].parse::<i64>().ok();
        if title_num != Some(id) {
            issues.push(Issue::IdTitleMismatch {
                index,
                id,
                title: post.title.to_string(),
            });
        }

        if let Some(prev) = prev_num
            && prev.checked_add(1) != Some(id)
        {
            issues.push(Issue::Gap { prev, current: id });
        }
        prev_num = Some(id);
    }

    issues
}

// ============================================================================
// Issues and Report
// ============================================================================

/// A single inconsistency found in the posts collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    IdNotInt { index: usize, id: PostId },
    TitleFormat { index: usize, title: String },
    IdTitleMismatch { index: usize, id: i64, title: String },
    Gap { prev: i64, current: i64 },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdNotInt { index, id } => write!(f, "Post {index}: id is not int: {id}"),
            Self::TitleFormat { index, title } => {
                write!(f, "Post {index}: title format error: {title}")
            }
            Self::IdTitleMismatch { index, id, title } => {
                write!(f, "Post {index}: id/title mismatch: id={id}, title={title}")
            }
            Self::Gap { prev, current } => write!(
                f,
                "Gap or out-of-order: previous id={prev}, current id={current}"
            ),
        }
    }
}

/// Outcome of a check, rendered as the console report.
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    pub const fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return f.write_str("✓ All numeric ids and titles match, and are consecutive without gaps.");
        }
        f.write_str("Errors found:")?;
        for issue in &self.issues {
            write!(f, "\n{issue}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
