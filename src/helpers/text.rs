//! Plain-text output, used by the CLI

use crate::config::SitemapConfig;
use crate::sitemap::{RenderGroup, RenderTree};

/// Render the tree as an indented outline
pub fn render_text(tree: &RenderTree, config: &SitemapConfig, show_ids: bool) -> String {
    let sections = tree.sections();
    if sections.is_empty() {
        return format!("{}\n", config.empty_message);
    }

    let mut out = String::new();
    for section in sections {
        out.push_str(&format!("{} ({}):\n", section.title, section.ids().len()));
        out.push_str(&render_groups_text(&section.groups, show_ids));
    }
    out
}

/// Render groups as indented lines, labelled groups one level deeper
pub fn render_groups_text(groups: &[RenderGroup], show_ids: bool) -> String {
    let mut out = String::new();
    for group in groups {
        let indent = if let Some(label) = &group.label {
            out.push_str(&format!("  {}:\n", label));
            "    "
        } else {
            "  "
        };
        for item in &group.items {
            if show_ids {
                out.push_str(&format!("{}[{}] {}\n", indent, item.id, item.title));
            } else {
                out.push_str(&format!("{}{} <{}>\n", indent, item.title, item.permalink));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentItem, ContentKind};
    use crate::sitemap::Section;

    #[test]
    fn test_outline() {
        let tree = RenderTree::Sections {
            sections: vec![Section::new(
                "posts",
                "Blog Posts",
                vec![
                    RenderGroup::labeled("News", vec![ContentItem::new(7, "Hello", ContentKind::Post)]),
                    RenderGroup::labeled("Uncategorized", vec![ContentItem::new(8, "Misc", ContentKind::Post)]),
                ],
            )],
        };
        let text = render_text(&tree, &SitemapConfig::default(), true);
        assert_eq!(
            text,
            "Blog Posts (2):\n  News:\n    [7] Hello\n  Uncategorized:\n    [8] Misc\n"
        );
    }

    #[test]
    fn test_empty() {
        let text = render_text(&RenderTree::Empty, &SitemapConfig::default(), false);
        assert_eq!(text, "No content to display.\n");
    }
}
