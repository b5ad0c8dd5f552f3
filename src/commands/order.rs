//! Manage hand-made explicit orders

use anyhow::{Context, Result};

use crate::content::{ContentKind, ItemId};
use crate::sitemap::explicit::{move_id, parse_id_list};
use crate::sitemap::{build_section, SitemapSettings, TagAttributes};
use crate::Sitemap;

fn parse_section(section: &str) -> Result<ContentKind> {
    ContentKind::from_section(section)
        .with_context(|| format!("Unknown section: {}. Available: pages, posts", section))
}

/// Ids of a section in the order they are currently displayed
pub fn displayed_ids(sitemap: &Sitemap, settings: &SitemapSettings, kind: ContentKind) -> Result<Vec<ItemId>> {
    let section = build_section(
        &sitemap.content(),
        kind,
        settings,
        &TagAttributes::default(),
        &sitemap.config.sitemap,
    )?;
    Ok(section.ids())
}

/// Describe the stored explicit orders, for one section or all of them
pub fn show(sitemap: &Sitemap, section: Option<&str>) -> Result<String> {
    let settings = SitemapSettings::load(&sitemap.settings());

    let kinds = match section {
        Some(name) => vec![parse_section(name)?],
        None => vec![ContentKind::Page, ContentKind::Post],
    };

    let mut out = String::new();
    for kind in kinds {
        let ids = settings.explicit_order.get(kind.section());
        if ids.is_empty() {
            out.push_str(&format!("{}: (none)\n", kind.section()));
        } else {
            let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            out.push_str(&format!("{}: {}\n", kind.section(), joined.join(",")));
        }
    }
    Ok(out)
}

/// Replace the explicit order of a section with a comma separated id list
pub fn set(sitemap: &Sitemap, section: &str, ids: &str) -> Result<Vec<ItemId>> {
    let kind = parse_section(section)?;
    let store = sitemap.settings();
    let mut settings = SitemapSettings::load(&store);

    let ids = parse_id_list(ids);
    settings.explicit_order.set(kind.section(), ids.clone());
    settings.save_explicit_order(&store)?;

    tracing::info!("Set {} order to {} ids", kind.section(), ids.len());
    Ok(ids)
}

/// Move one item to a 1-based position and store the whole displayed sequence.
///
/// Bucket membership is not affected, so within a bucketed section the item
/// moves inside its own group. Returns the order as displayed after the move.
pub fn move_item(sitemap: &Sitemap, section: &str, id: ItemId, position: usize) -> Result<Vec<ItemId>> {
    let kind = parse_section(section)?;
    let store = sitemap.settings();
    let mut settings = SitemapSettings::load(&store);

    let current = displayed_ids(sitemap, &settings, kind)?;
    let Some(moved) = move_id(&current, id, position.saturating_sub(1)) else {
        anyhow::bail!("No item with id {} in {}", id, kind.section());
    };

    settings.explicit_order.set(kind.section(), moved);
    settings.save_explicit_order(&store)?;

    let displayed = displayed_ids(sitemap, &settings, kind)?;
    tracing::info!("Moved {} to position {} in {}", id, position, kind.section());
    Ok(displayed)
}

/// Drop the explicit order of a section, returning whether one existed
pub fn reset(sitemap: &Sitemap, section: &str) -> Result<bool> {
    let kind = parse_section(section)?;
    let store = sitemap.settings();
    let mut settings = SitemapSettings::load(&store);

    let existed = settings.explicit_order.clear(kind.section());
    if existed {
        settings.save_explicit_order(&store)?;
        tracing::info!("Cleared {} order", kind.section());
    }
    Ok(existed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::term_id;
    use crate::sitemap::CategoryBucket;
    use std::fs;
    use tempfile::TempDir;

    fn write_page(dir: &std::path::Path, name: &str, id: u64, title: &str, order: i64) {
        fs::write(
            dir.join(format!("{}.md", name)),
            format!("---\ntitle: {}\nid: {}\norder: {}\n---\nbody\n", title, id, order),
        )
        .unwrap();
    }

    fn site() -> (TempDir, Sitemap) {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        fs::create_dir_all(source.join("_posts")).unwrap();
        write_page(&source, "a", 1, "Alpha", 2);
        write_page(&source, "b", 2, "Beta", 1);
        write_page(&source, "c", 3, "Gamma", 3);
        let sitemap = Sitemap::new(temp.path()).unwrap();
        (temp, sitemap)
    }

    #[test]
    fn test_move_stores_full_sequence() {
        let (_temp, sitemap) = site();
        let settings = SitemapSettings::load(&sitemap.settings());
        assert_eq!(displayed_ids(&sitemap, &settings, ContentKind::Page).unwrap(), vec![2, 1, 3]);

        let moved = move_item(&sitemap, "pages", 3, 1).unwrap();
        assert_eq!(moved, vec![3, 2, 1]);

        let settings = SitemapSettings::load(&sitemap.settings());
        assert_eq!(settings.explicit_order.get("pages"), &[3, 2, 1]);
        assert_eq!(displayed_ids(&sitemap, &settings, ContentKind::Page).unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn test_move_stays_inside_bucket_group() {
        let (temp, sitemap) = site();
        let posts = temp.path().join("source/_posts");
        for (name, id, date, category) in [
            ("a", 20, "2024-02-03", "categories: News\n"),
            ("b", 21, "2024-02-02", ""),
            ("c", 22, "2024-02-01", ""),
        ] {
            fs::write(
                posts.join(format!("{}.md", name)),
                format!("---\ntitle: Post {}\nid: {}\ndate: {}\n{}---\n", name, id, date, category),
            )
            .unwrap();
        }
        let mut settings = SitemapSettings::load(&sitemap.settings());
        settings.buckets = vec![CategoryBucket::new("News", term_id("News"))];
        settings.save_buckets(&sitemap.settings()).unwrap();

        let displayed = move_item(&sitemap, "posts", 22, 1).unwrap();
        assert_eq!(displayed, vec![20, 22, 21]);

        let settings = SitemapSettings::load(&sitemap.settings());
        assert_eq!(settings.explicit_order.get("posts"), &[22, 20, 21]);
        assert_eq!(displayed_ids(&sitemap, &settings, ContentKind::Post).unwrap(), displayed);
    }

    #[test]
    fn test_move_unknown_id() {
        let (_temp, sitemap) = site();
        assert!(move_item(&sitemap, "pages", 99, 1).is_err());
        assert!(move_item(&sitemap, "widgets", 1, 1).is_err());
    }

    #[test]
    fn test_set_show_reset() {
        let (_temp, sitemap) = site();
        assert_eq!(set(&sitemap, "pages", "3, 1,3,x").unwrap(), vec![3, 1]);
        assert_eq!(show(&sitemap, Some("pages")).unwrap(), "pages: 3,1\n");
        assert_eq!(show(&sitemap, None).unwrap(), "pages: 3,1\nposts: (none)\n");

        assert!(reset(&sitemap, "pages").unwrap());
        assert!(!reset(&sitemap, "pages").unwrap());
        assert_eq!(show(&sitemap, Some("pages")).unwrap(), "pages: (none)\n");
    }
}
