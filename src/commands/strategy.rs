//! Show or change the stored sort strategies

use anyhow::Result;

use crate::sitemap::{SitemapSettings, SortStrategy};
use crate::Sitemap;

/// Describe the stored strategies and the available keys
pub fn show(sitemap: &Sitemap) -> String {
    let settings = SitemapSettings::load(&sitemap.settings());

    let mut out = format!(
        "pages: {}\nposts: {}\n\nAvailable:\n",
        settings.page_order, settings.post_order
    );
    for strategy in SortStrategy::ALL {
        out.push_str(&format!("  {:<10} {}\n", strategy.key(), strategy.label()));
    }
    out
}

/// Store new strategies; `None` keeps the current value
pub fn update(
    sitemap: &Sitemap,
    pages: Option<SortStrategy>,
    posts: Option<SortStrategy>,
) -> Result<SitemapSettings> {
    let store = sitemap.settings();
    let mut settings = SitemapSettings::load(&store);

    if let Some(strategy) = pages {
        settings.page_order = strategy;
    }
    if let Some(strategy) = posts {
        settings.post_order = strategy;
    }

    settings.save_strategies(&store)?;
    tracing::info!(
        "Page order: {}, post order: {}",
        settings.page_order,
        settings.post_order
    );
    Ok(settings)
}

/// Run the strategy command
pub fn run(sitemap: &Sitemap, pages: Option<SortStrategy>, posts: Option<SortStrategy>) -> Result<()> {
    if pages.is_none() && posts.is_none() {
        print!("{}", show(sitemap));
    } else {
        update(sitemap, pages, posts)?;
        println!("Saved sort strategies");
    }
    Ok(())
}
