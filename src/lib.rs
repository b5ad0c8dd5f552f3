//! ordered-sitemap: categorized, administrator-ordered sitemap listings
//!
//! A site's pages and posts are sorted by a named strategy, split into
//! category buckets, optionally rearranged by a hand-made order, and assembled
//! into sections ready for presentation.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod sitemap;

use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{FileSettingsStore, SiteConfig};
use content::loader::ContentLoader;
use sitemap::{RenderTree, SitemapError, TagAttributes};

/// A site directory with its configuration and stores
#[derive(Clone)]
pub struct Sitemap {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Settings file
    pub settings_path: PathBuf,
}

impl Sitemap {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = base_dir.join(&config.source_dir);
        let settings_path = base_dir.join(&config.settings_file);

        Self {
            config,
            base_dir,
            source_dir,
            settings_path,
        }
    }

    /// File-backed content store over the source directory
    pub fn content(&self) -> ContentLoader<'_> {
        ContentLoader::new(self)
    }

    /// File-backed settings store
    pub fn settings(&self) -> FileSettingsStore {
        FileSettingsStore::new(&self.settings_path)
    }

    /// Render the sitemap tree with validated tag attributes
    pub fn render_with(&self, attrs: &TagAttributes) -> Result<RenderTree, SitemapError> {
        sitemap::render(
            &self.content(),
            &self.settings(),
            &self.config.sitemap,
            attrs,
        )
    }

    /// Render the sitemap tree with raw tag attributes
    pub fn render(&self, attrs: &HashMap<String, String>) -> Result<RenderTree> {
        Ok(self.render_with(&TagAttributes::from_map(attrs))?)
    }

    /// Render the sitemap as HTML
    pub fn render_html(&self, attrs: &HashMap<String, String>) -> Result<String> {
        let tree = self.render(attrs)?;
        Ok(helpers::render_html(&tree, &self.config.sitemap))
    }
}
