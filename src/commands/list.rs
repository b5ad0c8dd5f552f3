//! List site content in sitemap order

use anyhow::Result;

use crate::content::{ContentKind, ContentStore, CATEGORY_TAXONOMY};
use crate::helpers::render_groups_text;
use crate::sitemap::{build_section, Section, SitemapSettings, TagAttributes};
use crate::Sitemap;

/// Describe the content of one or all sections, with ids
pub fn describe(sitemap: &Sitemap, content_type: &str) -> Result<String> {
    let settings = SitemapSettings::load(&sitemap.settings());
    let content = sitemap.content();
    let labels = &sitemap.config.sitemap;

    let kinds: Vec<ContentKind> = match content_type {
        "all" => vec![ContentKind::Page, ContentKind::Post],
        "category" | "categories" => {
            let terms = content.list_terms(CATEGORY_TAXONOMY)?;
            let mut out = format!("Categories ({}):\n", terms.len());
            for term in terms {
                out.push_str(&format!("  [{}] {}\n", term.id, term.name));
            }
            return Ok(out);
        }
        other => match ContentKind::from_section(other) {
            Some(kind) => vec![kind],
            None => anyhow::bail!(
                "Unknown type: {}. Available: all, page, post, category",
                other
            ),
        },
    };

    let mut out = String::new();
    for kind in kinds {
        let section = build_section(&content, kind, &settings, &TagAttributes::default(), labels)?;
        out.push_str(&describe_section(&section, &settings, kind));
    }
    Ok(out)
}

fn describe_section(section: &Section, settings: &SitemapSettings, kind: ContentKind) -> String {
    let ids = section.ids();
    let placed = settings
        .explicit_order
        .get(kind.section())
        .iter()
        .filter(|id| ids.contains(*id))
        .count();
    let mut out = format!(
        "{} ({}) - sorted by {}{}\n",
        section.title,
        ids.len(),
        settings.strategy_for(kind),
        if placed == 0 {
            String::new()
        } else {
            format!(", {} placed by hand", placed)
        }
    );

    out.push_str(&render_groups_text(&section.groups, true));
    out
}

/// Run the list command
pub fn run(sitemap: &Sitemap, content_type: &str) -> Result<()> {
    print!("{}", describe(sitemap, content_type)?);
    Ok(())
}
