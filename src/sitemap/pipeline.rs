//! The render pipeline
//!
//! One render takes one snapshot of the settings and one fetch per content
//! kind, then sorts, partitions, applies explicit orders and assembles. Nothing
//! is shared between renders.

use thiserror::Error;

use super::assemble::{assemble, RenderGroup, RenderTree, Section};
use super::attrs::TagAttributes;
use super::explicit;
use super::partition::partition;
use super::settings::SitemapSettings;
use super::strategy::resolve;
use crate::config::{SettingsStore, SitemapConfig};
use crate::content::{ContentError, ContentKind, ContentQuery, ContentStore};

/// Errors from rendering a sitemap
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The content store failed; passed through as-is
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Render the sitemap tree
pub fn render(
    content: &dyn ContentStore,
    settings: &dyn SettingsStore,
    labels: &SitemapConfig,
    attrs: &TagAttributes,
) -> Result<RenderTree, SitemapError> {
    let settings = SitemapSettings::load(settings);

    let sections = [
        build_section(content, ContentKind::Page, &settings, attrs, labels)?,
        build_section(content, ContentKind::Post, &settings, attrs, labels)?,
    ];

    let tree = assemble(&sections);
    tracing::debug!(
        "Rendered sitemap: {} sections, {} items",
        tree.sections().len(),
        tree.item_count()
    );
    Ok(tree)
}

/// Build one section exactly as it will be displayed
pub fn build_section(
    content: &dyn ContentStore,
    kind: ContentKind,
    settings: &SitemapSettings,
    attrs: &TagAttributes,
    labels: &SitemapConfig,
) -> Result<Section, SitemapError> {
    let strategy = attrs
        .order_for(kind)
        .unwrap_or_else(|| settings.strategy_for(kind));

    let mut items = content.query(&ContentQuery::published(kind))?;
    resolve(strategy, kind).sort(&mut items);
    tracing::debug!("Sorted {} {}s by {}", items.len(), kind, strategy);

    let groups = match kind {
        ContentKind::Page => vec![RenderGroup::flat(items)],
        ContentKind::Post => {
            let split = partition(items, &settings.buckets);
            let mut groups = split.groups;
            if !split.residual.is_empty() {
                let mut residual = split.residual;
                // A heading only makes sense next to other headings
                if !groups.is_empty() {
                    residual.label = Some(labels.uncategorized_label.clone());
                }
                groups.push(residual);
            }
            groups
        }
    };

    let explicit_ids = settings.explicit_order.get(kind.section());
    let groups = groups
        .into_iter()
        .map(|group| RenderGroup {
            label: group.label,
            items: explicit::apply(group.items, explicit_ids),
        })
        .collect();

    let title = match kind {
        ContentKind::Page => &labels.pages_title,
        ContentKind::Post => &labels.posts_title,
    };

    Ok(Section::new(kind.section(), title.clone(), groups))
}
