//! Configuration module

mod settings;
mod site;

pub use settings::{FileSettingsStore, MemorySettingsStore, SettingsError, SettingsStore};
pub use site::{SiteConfig, SitemapConfig};
