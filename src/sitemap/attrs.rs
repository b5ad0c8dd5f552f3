//! Embeddable tag attributes
//!
//! The tag accepts a free-form attribute map. Only the ordering overrides are
//! recognised; everything else is ignored.

use std::collections::HashMap;

use super::strategy::SortStrategy;
use crate::content::ContentKind;

/// Validated tag attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagAttributes {
    /// Page ordering override; `None` uses the stored setting
    pub page_order: Option<SortStrategy>,
    /// Post ordering override; `None` uses the stored setting
    pub post_order: Option<SortStrategy>,
}

impl TagAttributes {
    /// Validate a raw attribute map.
    ///
    /// Attribute names match case-insensitively and ignore `_`/`-`, so
    /// `pageOrder`, `page_order` and `page-order` are the same attribute.
    /// When several spellings are present, `pageOrder`/`postOrder` wins, then
    /// `page_order`/`post_order`, then the remaining names in byte order.
    /// A present but unknown value orders by title.
    pub fn from_map(attrs: &HashMap<String, String>) -> Self {
        let mut entries: Vec<(&String, &String)> = attrs.iter().collect();
        entries.sort_by(|(a, _), (b, _)| spelling_rank(a).cmp(&spelling_rank(b)).then(a.cmp(b)));

        let mut result = Self::default();
        for (name, value) in entries {
            let slot = match normalize_name(name).as_str() {
                "pageorder" => &mut result.page_order,
                "postorder" => &mut result.post_order,
                _ => {
                    tracing::debug!("Ignoring tag attribute {:?}", name);
                    continue;
                }
            };
            if slot.is_some() {
                tracing::debug!("Ignoring tag attribute {:?}, already set", name);
                continue;
            }
            *slot = Some(SortStrategy::parse_or_default(value));
        }
        result
    }

    /// Build from `(name, value)` pairs; a repeated name keeps its last value
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::from_map(&map)
    }

    /// Override for a kind, if any
    pub fn order_for(&self, kind: ContentKind) -> Option<SortStrategy> {
        match kind {
            ContentKind::Page => self.page_order,
            ContentKind::Post => self.post_order,
        }
    }
}

fn spelling_rank(name: &str) -> u8 {
    match name {
        "pageOrder" | "postOrder" => 0,
        "page_order" | "post_order" => 1,
        _ => 2,
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognised_spellings() {
        let attrs = TagAttributes::from_pairs([("pageOrder", "title_desc"), ("post-order", "date_asc")]);
        assert_eq!(attrs.page_order, Some(SortStrategy::TitleDesc));
        assert_eq!(attrs.post_order, Some(SortStrategy::DateAsc));

        let attrs = TagAttributes::from_pairs([("PAGE_ORDER", "menu_asc")]);
        assert_eq!(attrs.order_for(ContentKind::Page), Some(SortStrategy::MenuThenTitleAsc));
        assert_eq!(attrs.order_for(ContentKind::Post), None);
    }

    #[test]
    fn test_garbage_is_tolerated() {
        let attrs = TagAttributes::from_pairs([("postOrder", "zzz"), ("colour", "blue"), ("", "")]);
        assert_eq!(attrs.post_order, Some(SortStrategy::TitleAsc));
        assert_eq!(attrs.page_order, None);
    }

    #[test]
    fn test_conflicting_spellings_resolve_the_same_way() {
        for _ in 0..64 {
            let attrs = TagAttributes::from_pairs([
                ("page_order", "title_asc"),
                ("pageOrder", "title_desc"),
                ("PAGE-ORDER", "date_asc"),
                ("post-order", "date_asc"),
                ("post_order", "menu_asc"),
            ]);
            assert_eq!(attrs.page_order, Some(SortStrategy::TitleDesc));
            assert_eq!(attrs.post_order, Some(SortStrategy::MenuThenTitleAsc));
        }

        let attrs = TagAttributes::from_pairs([("Page-Order", "date_desc"), ("page-order", "title_desc")]);
        assert_eq!(attrs.page_order, Some(SortStrategy::DateDesc));
    }

    #[test]
    fn test_missing_attributes() {
        assert_eq!(TagAttributes::from_map(&HashMap::new()), TagAttributes::default());
    }
}
