//! Initialize a new sitemap site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::{FileSettingsStore, SiteConfig};
use crate::sitemap::SitemapSettings;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();

    fs::create_dir_all(target_dir.join(&config.source_dir).join("_posts"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        let content = format!(
            "# Ordered sitemap configuration\n\n{}",
            config.to_yaml()?
        );
        fs::write(&config_path, content)?;
        tracing::info!("Created {:?}", config_path);
    }

    let store = FileSettingsStore::new(target_dir.join(&config.settings_file));
    if !store.path().exists() {
        SitemapSettings::default().save(&store)?;
        tracing::info!("Created {:?}", store.path());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sitemap;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_layout_and_defaults() {
        let temp = TempDir::new().unwrap();
        init_site(temp.path()).unwrap();

        assert!(temp.path().join("_config.yml").exists());
        assert!(temp.path().join("source/_posts").is_dir());

        let site = Sitemap::new(temp.path()).unwrap();
        let settings = SitemapSettings::load(&site.settings());
        assert_eq!(settings, SitemapSettings::default());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(temp.path()).unwrap();

        let content = fs::read_to_string(temp.path().join("_config.yml")).unwrap();
        assert_eq!(content, "title: Mine\n");
    }
}
