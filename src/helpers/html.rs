//! HTML output for a render tree

use crate::config::SitemapConfig;
use crate::content::ContentItem;
use crate::sitemap::{RenderGroup, RenderTree, Section};

/// Render the whole sitemap.
///
/// # Examples
/// ```ignore
/// render_html(&tree, &config.sitemap)
/// // -> <div class="ordered-sitemap"><div class="ordered-sitemap__section ordered-sitemap__pages">...
/// ```
pub fn render_html(tree: &RenderTree, config: &SitemapConfig) -> String {
    let class = html_escape(&config.class_name);
    let mut html = format!(r#"<div class="{}">"#, class);

    match tree {
        RenderTree::Empty => {
            html.push_str(&format!(
                r#"<p class="{}__empty">{}</p>"#,
                class,
                html_escape(&config.empty_message)
            ));
        }
        RenderTree::Sections { sections } => {
            for section in sections {
                html.push_str(&render_section(section, &class));
            }
        }
    }

    html.push_str("</div>");
    html
}

fn render_section(section: &Section, class: &str) -> String {
    let mut html = format!(
        r#"<div class="{class}__section {class}__{key}"><h2>{title}</h2>"#,
        class = class,
        key = slug::slugify(&section.key),
        title = html_escape(&section.title)
    );

    for group in &section.groups {
        html.push_str(&render_group(group, class));
    }

    html.push_str("</div>");
    html
}

fn render_group(group: &RenderGroup, class: &str) -> String {
    let mut html = String::new();
    if let Some(label) = &group.label {
        html.push_str(&format!(
            r#"<h3 class="{}__group-title">{}</h3>"#,
            class,
            html_escape(label)
        ));
    }
    html.push_str(&list_items(&group.items));
    html
}

/// Generate a `<ul>` of links
pub fn list_items(items: &[ContentItem]) -> String {
    let mut html = "<ul>".to_string();

    for item in items {
        html.push_str(&format!(
            r#"<li><a href="{}">{}</a></li>"#,
            html_escape(&item.permalink),
            html_escape(&item.title)
        ));
    }

    html.push_str("</ul>");
    html
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;

    fn item(id: u64, title: &str) -> ContentItem {
        ContentItem::new(id, title, ContentKind::Post)
            .with_permalink(format!("https://example.com/{}/", id))
    }

    #[test]
    fn test_empty_tree() {
        let html = render_html(&RenderTree::Empty, &SitemapConfig::default());
        assert_eq!(
            html,
            r#"<div class="ordered-sitemap"><p class="ordered-sitemap__empty">No content to display.</p></div>"#
        );
    }

    #[test]
    fn test_sections_and_group_titles() {
        let tree = RenderTree::Sections {
            sections: vec![Section::new(
                "posts",
                "Blog Posts",
                vec![
                    RenderGroup::labeled("News", vec![item(1, "Hello")]),
                    RenderGroup::flat(vec![item(2, "World")]),
                ],
            )],
        };

        let html = render_html(&tree, &SitemapConfig::default());
        assert!(html.contains(r#"<div class="ordered-sitemap__section ordered-sitemap__posts">"#));
        assert!(html.contains("<h2>Blog Posts</h2>"));
        assert!(html.contains(r#"<h3 class="ordered-sitemap__group-title">News</h3>"#));
        assert!(html.contains(r#"<a href="https://example.com/1/">Hello</a>"#));
        assert!(html.find("Hello").unwrap() < html.find("World").unwrap());
        assert_eq!(html.matches("<h3").count(), 1);
    }

    #[test]
    fn test_escaping() {
        assert_eq!(html_escape(r#"<b>"Tom & Jerry's"</b>"#), "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;");
        let html = list_items(&[item(1, "<script>")]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
