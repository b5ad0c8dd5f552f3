//! Sort strategies and the comparators they resolve to

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::content::{ContentItem, ContentKind};

/// A named, closed choice of ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortStrategy {
    /// Menu position, then title (pages only; posts sort by title)
    #[serde(rename = "menu_asc")]
    MenuThenTitleAsc,
    #[default]
    #[serde(rename = "title_asc")]
    TitleAsc,
    #[serde(rename = "title_desc")]
    TitleDesc,
    #[serde(rename = "date_asc")]
    DateAsc,
    #[serde(rename = "date_desc")]
    DateDesc,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 5] = [
        SortStrategy::MenuThenTitleAsc,
        SortStrategy::TitleAsc,
        SortStrategy::TitleDesc,
        SortStrategy::DateDesc,
        SortStrategy::DateAsc,
    ];

    /// Stored/wire key
    pub fn key(&self) -> &'static str {
        match self {
            SortStrategy::MenuThenTitleAsc => "menu_asc",
            SortStrategy::TitleAsc => "title_asc",
            SortStrategy::TitleDesc => "title_desc",
            SortStrategy::DateAsc => "date_asc",
            SortStrategy::DateDesc => "date_desc",
        }
    }

    /// Human-readable description
    pub fn label(&self) -> &'static str {
        match self {
            SortStrategy::MenuThenTitleAsc => "Menu order (A → Z)",
            SortStrategy::TitleAsc => "Title (A → Z)",
            SortStrategy::TitleDesc => "Title (Z → A)",
            SortStrategy::DateDesc => "Publish date (newest first)",
            SortStrategy::DateAsc => "Publish date (oldest first)",
        }
    }

    /// Look up a key, `None` when it is not one of the known strategies
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(key))
    }

    /// Look up a key, falling back to [`SortStrategy::TitleAsc`]
    pub fn parse_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            tracing::warn!("Unknown sort strategy {:?}, using title_asc", key);
            SortStrategy::TitleAsc
        })
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| {
            let known: Vec<_> = Self::ALL.iter().map(|s| s.key()).collect();
            format!("unknown sort strategy {:?} (expected one of {})", s, known.join(", "))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrimaryKey {
    MenuPosition,
    TitleAsc,
    TitleDesc,
    DateAsc,
    DateDesc,
}

/// A total order over content items.
///
/// Equal primary keys fall through to the case-insensitive title and then to
/// the id, so two distinct items never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparator {
    primary: PrimaryKey,
}

impl Comparator {
    pub fn compare(&self, a: &ContentItem, b: &ContentItem) -> Ordering {
        let primary = match self.primary {
            PrimaryKey::MenuPosition => a.menu_position.cmp(&b.menu_position),
            PrimaryKey::TitleAsc => compare_titles(a, b),
            PrimaryKey::TitleDesc => compare_titles(b, a),
            PrimaryKey::DateAsc => a.published_at.cmp(&b.published_at),
            PrimaryKey::DateDesc => b.published_at.cmp(&a.published_at),
        };

        primary
            .then_with(|| compare_titles(a, b))
            .then_with(|| a.id.cmp(&b.id))
    }

    /// Sort items in place
    pub fn sort(&self, items: &mut [ContentItem]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

/// Resolve a strategy to the comparator used for a content kind
pub fn resolve(strategy: SortStrategy, kind: ContentKind) -> Comparator {
    let primary = match (strategy, kind) {
        (SortStrategy::MenuThenTitleAsc, ContentKind::Page) => PrimaryKey::MenuPosition,
        (SortStrategy::MenuThenTitleAsc, ContentKind::Post) => PrimaryKey::TitleAsc,
        (SortStrategy::TitleAsc, _) => PrimaryKey::TitleAsc,
        (SortStrategy::TitleDesc, _) => PrimaryKey::TitleDesc,
        (SortStrategy::DateAsc, _) => PrimaryKey::DateAsc,
        (SortStrategy::DateDesc, _) => PrimaryKey::DateDesc,
    };
    Comparator { primary }
}

/// Resolve a raw key; unknown keys sort by title
pub fn resolve_key(key: &str, kind: ContentKind) -> Comparator {
    resolve(SortStrategy::parse_or_default(key), kind)
}

/// Case-insensitive, locale-naive title comparison
pub fn compare_titles(a: &ContentItem, b: &ContentItem) -> Ordering {
    let lower = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    lower(&a.title).cmp(&lower(&b.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn item(id: u64, title: &str) -> ContentItem {
        ContentItem::new(id, title, ContentKind::Post)
    }

    fn ids(items: &[ContentItem]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_title_asc_scenario() {
        let mut items = vec![item(1, "B"), item(2, "A"), item(3, "C")];
        resolve(SortStrategy::TitleAsc, ContentKind::Post).sort(&mut items);
        assert_eq!(ids(&items), vec![2, 1, 3]);
    }

    #[test]
    fn test_title_desc_and_case_insensitivity() {
        let mut items = vec![item(1, "banana"), item(2, "Apple"), item(3, "cherry")];
        resolve(SortStrategy::TitleDesc, ContentKind::Post).sort(&mut items);
        assert_eq!(ids(&items), vec![3, 1, 2]);
    }

    #[test]
    fn test_unknown_key_falls_back_to_title_asc() {
        assert_eq!(SortStrategy::parse_or_default("zzz"), SortStrategy::TitleAsc);
        let mut items = vec![item(1, "B"), item(2, "A"), item(3, "C")];
        resolve_key("zzz", ContentKind::Page).sort(&mut items);
        assert_eq!(ids(&items), vec![2, 1, 3]);
    }

    #[test]
    fn test_menu_order_for_pages() {
        let mut pages = vec![
            ContentItem::new(1, "Zeta", ContentKind::Page).with_menu_position(1),
            ContentItem::new(2, "Alpha", ContentKind::Page).with_menu_position(2),
            ContentItem::new(3, "Beta", ContentKind::Page).with_menu_position(1),
        ];
        resolve(SortStrategy::MenuThenTitleAsc, ContentKind::Page).sort(&mut pages);
        assert_eq!(ids(&pages), vec![3, 1, 2]);
    }

    #[test]
    fn test_menu_order_degrades_to_title_for_posts() {
        let mut posts = vec![
            item(1, "Zeta").with_menu_position(-5),
            item(2, "Alpha").with_menu_position(9),
        ];
        resolve(SortStrategy::MenuThenTitleAsc, ContentKind::Post).sort(&mut posts);
        assert_eq!(ids(&posts), vec![2, 1]);
    }

    #[test]
    fn test_dates_with_title_then_id_tiebreak() {
        let day = |d| Local.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
        let mut posts = vec![
            item(4, "Same").with_date(day(2)),
            item(1, "Old").with_date(day(1)),
            item(3, "same").with_date(day(2)),
            item(2, "New").with_date(day(3)),
        ];

        resolve(SortStrategy::DateDesc, ContentKind::Post).sort(&mut posts);
        assert_eq!(ids(&posts), vec![2, 3, 4, 1]);

        resolve(SortStrategy::DateAsc, ContentKind::Post).sort(&mut posts);
        assert_eq!(ids(&posts), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_keys_round_trip_through_serde() {
        for strategy in SortStrategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.key()));
            assert_eq!(strategy.key().parse::<SortStrategy>().unwrap(), strategy);
        }
        assert!("bogus".parse::<SortStrategy>().is_err());
        assert_eq!(SortStrategy::from_key(" DATE_DESC "), Some(SortStrategy::DateDesc));
    }
}
