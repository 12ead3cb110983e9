//! Site configuration management for `factsite.toml`.
//!
//! The file is optional: every field has a default, so a bare checkout with
//! only `posts.json` works out of the box.
//!
//! # Sections
//!
//! | Section      | Purpose                                    |
//! |--------------|--------------------------------------------|
//! | `[base]`     | Site URL used for absolute sitemap links   |
//! | `[build]`    | Project root and posts file                |
//! | `[sitemap]`  | Sitemap output path and static page table  |
//! | `[rss]`      | Feed output path, channel metadata, limit  |
//!
//! # Example
//!
//! ```toml
//! [base]
//! url = "https://facts.example.com"
//!
//! [build]
//! posts = "posts.json"
//!
//! [sitemap]
//! path = "sitemap.xml"
//!
//! [rss]
//! limit = 20
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod rss;
mod sitemap;

pub use sitemap::{ChangeFreq, StaticPage};

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use self::rss::RssConfig;
use sitemap::SitemapConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing factsite.toml
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Input settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Sitemap settings
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// RSS feed settings
    #[serde(default)]
    pub rss: RssConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config named by the CLI, falling back to defaults when absent,
    /// then apply CLI overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.posts, cli.posts.as_ref());

        match &cli.command {
            Commands::Sitemap { sitemap_args } => {
                Self::update_option(&mut self.base.url, sitemap_args.base_url.as_ref());
                Self::update_option(&mut self.sitemap.path, sitemap_args.output.as_ref());
            }
            Commands::Rss { rss_args } => {
                Self::update_option(&mut self.base.url, rss_args.base_url.as_ref());
                Self::update_option(&mut self.rss.path, rss_args.output.as_ref());
                Self::update_option(&mut self.rss.limit, rss_args.limit.as_ref());
            }
            Commands::Check { .. } => {}
        }

        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.posts = Self::normalize_path(&root.join(&self.build.posts));
        self.sitemap.path = Self::normalize_path(&root.join(&self.sitemap.path));
        self.rss.path = Self::normalize_path(&root.join(&self.rss.path));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration after CLI overrides are applied
    pub fn validate(&self) -> Result<()> {
        let url = &self.base.url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!(ConfigError::Validation(format!(
                "[base.url] must start with http:// or https://, got `{url}`"
            )));
        }

        if let Some(page) = self
            .sitemap
            .pages
            .iter()
            .find(|page| !(0.0..=1.0).contains(&page.priority))
        {
            bail!(ConfigError::Validation(format!(
                "[sitemap.pages] priority of `{}` must be within 0.0..=1.0, got {}",
                page.path, page.priority
            )));
        }

        if self.rss.limit == 0 {
            bail!(ConfigError::Validation("[rss.limit] must be at least 1".into()));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
