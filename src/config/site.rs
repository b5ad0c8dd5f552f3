//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,

    // URL
    pub url: String,
    pub root: String,
    pub permalink: String,

    // Directory
    pub source_dir: String,
    /// Settings store file, relative to the site directory
    pub settings_file: String,

    // Writing
    pub render_drafts: bool,

    // Sitemap labels and markup
    #[serde(default)]
    pub sitemap: SitemapConfig,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            permalink: ":year/:month/:day/:title/".to_string(),

            source_dir: "source".to_string(),
            settings_file: ".sitemap/settings.json".to_string(),

            render_drafts: false,

            sitemap: SitemapConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Serialize as YAML for `init`
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Labels and markup settings of the rendered sitemap.
///
/// Labels are passed through to the output untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub pages_title: String,
    pub posts_title: String,
    pub uncategorized_label: String,
    pub empty_message: String,
    /// Name of the embeddable tag, e.g. `[ordered_sitemap]`
    pub tag_name: String,
    /// CSS class of the wrapper element
    pub class_name: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            pages_title: "Pages".to_string(),
            posts_title: "Blog Posts".to_string(),
            uncategorized_label: "Uncategorized".to_string(),
            empty_message: "No content to display.".to_string(),
            tag_name: "ordered_sitemap".to_string(),
            class_name: "ordered-sitemap".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.source_dir, "source");
        assert_eq!(config.settings_file, ".sitemap/settings.json");
        assert_eq!(config.sitemap.posts_title, "Blog Posts");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://blog.example.com
sitemap:
  pages_title: Sayfalar
  posts_title: Blog Yazıları
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.url, "https://blog.example.com");
        assert_eq!(config.sitemap.pages_title, "Sayfalar");
        assert_eq!(config.sitemap.posts_title, "Blog Yazıları");
        // untouched fields keep their defaults
        assert_eq!(config.sitemap.tag_name, "ordered_sitemap");
        assert_eq!(config.root, "/");
    }
}
