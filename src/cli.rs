//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// factsite maintenance CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: factsite.toml)
    #[arg(short = 'C', long, default_value = "factsite.toml")]
    pub config: PathBuf,

    /// Posts file path (relative to project root)
    #[arg(short, long)]
    pub posts: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Verify post ids and titles are well-formed, matched and consecutive
    Check {
        /// Exit with an error when any inconsistency is found
        #[arg(long)]
        strict: bool,
    },

    /// Generate sitemap.xml from static pages, posts and tags
    Sitemap {
        #[command(flatten)]
        sitemap_args: SitemapArgs,
    },

    /// Generate rss.xml from the newest posts
    Rss {
        #[command(flatten)]
        rss_args: RssArgs,
    },
}

/// Arguments for the Sitemap command
#[derive(clap::Args, Debug, Clone)]
pub struct SitemapArgs {
    /// Override base URL for the site.
    ///
    /// Useful for CI/CD deployments where the production URL differs from the
    /// one in factsite.toml.
    ///
    /// Example:
    ///   factsite sitemap --base-url "https://facts.example.com"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Output file path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Date written to every <lastmod> entry, as YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    pub lastmod: Option<NaiveDate>,
}

/// Arguments for the Rss command
#[derive(clap::Args, Debug, Clone)]
pub struct RssArgs {
    /// Override base URL for the site
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Output file path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of items in the feed
    #[arg(short, long)]
    pub limit: Option<usize>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}
