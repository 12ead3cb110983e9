//! `[base]` section configuration.

use super::defaults;
use educe::Educe;
use serde::Deserialize;

/// `[base]` section in factsite.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// url = "https://facts.example.com"
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Base URL for absolute links in the sitemap, without trailing path.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: String,
}

impl BaseConfig {
    /// Base URL with any trailing `/` removed, ready for `{url}/{path}` joins.
    pub fn url_trimmed(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Whether the URL is still the shipped placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.url_trimmed() == defaults::base::PLACEHOLDER_URL
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            url = "https://facts.example.com"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.url, "https://facts.example.com");
        assert!(!config.base.is_placeholder());
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.url, "https://yourwebsite.com");
        assert!(config.base.is_placeholder());
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            url = "https://facts.example.com"
            title = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_url_trimmed() {
        let base = BaseConfig {
            url: "https://example.com/blog/".into(),
        };
        assert_eq!(base.url_trimmed(), "https://example.com/blog");

        let base = BaseConfig {
            url: "https://yourwebsite.com/".into(),
        };
        assert!(base.is_placeholder());
    }
}
