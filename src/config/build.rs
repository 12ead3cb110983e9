//! `[build]` section configuration.
//!
//! Contains input paths shared by every subcommand.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::path::PathBuf;

/// `[build]` section in factsite.toml.
///
/// # Example
/// ```toml
/// [build]
/// posts = "data/posts.json"
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Posts collection, a JSON array (relative to root).
    #[serde(default = "defaults::build::posts")]
    #[educe(Default = defaults::build::posts())]
    pub posts: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.root, None);
        assert_eq!(config.build.posts, PathBuf::from("posts.json"));
    }

    #[test]
    fn test_build_config_custom() {
        let config = r#"
            [build]
            root = "site"
            posts = "data/posts.json"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.root, Some(PathBuf::from("site")));
        assert_eq!(config.build.posts, PathBuf::from("data/posts.json"));
    }

    #[test]
    fn test_build_config_unknown_field() {
        let config = r#"
            [build]
            output = "public"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }
}
