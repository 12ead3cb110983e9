//! factsite - consistency checker, sitemap and rss generator for a JSON-driven facts blog.

mod check;
mod cli;
mod config;
mod data;
mod generator;
mod logger;

use anyhow::Result;
use chrono::Utc;
use check::check_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use generator::{build_rss, build_sitemap};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Check { strict } => check_site(&config, *strict),
        Commands::Sitemap { sitemap_args } => {
            build_sitemap(&config, sitemap_args.lastmod).map(|_| ())
        }
        Commands::Rss { .. } => build_rss(&config, Utc::now()).map(|_| ()),
    }
}
