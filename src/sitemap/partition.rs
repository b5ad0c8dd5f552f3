//! Category buckets and first-match-wins partitioning

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::assemble::RenderGroup;
use crate::content::{ContentItem, TermId};

/// An administrator-defined group bound to one category term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub label: String,
    /// Bound term; `0` leaves the bucket inactive
    #[serde(alias = "termRef", alias = "term_ref")]
    pub term: TermId,
}

impl CategoryBucket {
    pub fn new(label: impl Into<String>, term: TermId) -> Self {
        Self {
            label: label.into(),
            term,
        }
    }

    /// Whether the bucket takes part in partitioning
    pub fn is_active(&self) -> bool {
        self.term != 0 && !self.label.trim().is_empty()
    }
}

/// Result of partitioning a pool of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Non-empty bucket groups, in bucket declaration order
    pub groups: Vec<RenderGroup>,
    /// Items no bucket claimed, in their incoming order
    pub residual: RenderGroup,
}

/// Split items into bucket groups plus a residual group.
///
/// Buckets are visited in declaration order and each claims every unclaimed
/// item carrying its term, so an item lands in at most one group. Inactive
/// buckets and buckets that claim nothing produce no group.
pub fn partition(items: Vec<ContentItem>, buckets: &[CategoryBucket]) -> Partition {
    let memberships: Vec<HashSet<TermId>> = items
        .iter()
        .map(|item| item.terms.iter().copied().collect())
        .collect();

    let mut slots: Vec<Option<ContentItem>> = items.into_iter().map(Some).collect();
    let mut groups = Vec::new();

    for bucket in buckets {
        if !bucket.is_active() {
            tracing::debug!("Skipping inactive bucket {:?}", bucket.label);
            continue;
        }

        let claimed: Vec<ContentItem> = slots
            .iter_mut()
            .zip(&memberships)
            .filter(|(slot, terms)| slot.is_some() && terms.contains(&bucket.term))
            .filter_map(|(slot, _)| slot.take())
            .collect();

        if claimed.is_empty() {
            continue;
        }
        groups.push(RenderGroup::labeled(bucket.label.trim(), claimed));
    }

    let residual = RenderGroup::flat(slots.into_iter().flatten().collect());

    Partition { groups, residual }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;

    fn post(id: u64, terms: Vec<TermId>) -> ContentItem {
        ContentItem::new(id, format!("Post {}", id), ContentKind::Post).with_terms(terms)
    }

    fn labels(p: &Partition) -> Vec<&str> {
        p.groups.iter().filter_map(|g| g.label.as_deref()).collect()
    }

    #[test]
    fn test_first_match_wins_and_empty_bucket_omitted() {
        let buckets = vec![CategoryBucket::new("News", 5), CategoryBucket::new("Tips", 5)];
        let result = partition(vec![post(1, vec![5])], &buckets);

        assert_eq!(labels(&result), vec!["News"]);
        assert_eq!(result.groups[0].ids(), vec![1]);
        assert!(result.residual.is_empty());
    }

    #[test]
    fn test_declaration_order_sets_precedence() {
        let items = || vec![post(1, vec![5, 6])];

        let news_first = partition(
            items(),
            &[CategoryBucket::new("News", 5), CategoryBucket::new("Tips", 6)],
        );
        assert_eq!(labels(&news_first), vec!["News"]);

        let tips_first = partition(
            items(),
            &[CategoryBucket::new("Tips", 6), CategoryBucket::new("News", 5)],
        );
        assert_eq!(labels(&tips_first), vec!["Tips"]);
    }

    #[test]
    fn test_inactive_buckets_are_skipped() {
        let buckets = vec![
            CategoryBucket::new("Unbound", 0),
            CategoryBucket::new("   ", 5),
            CategoryBucket::new("Tips", 6),
        ];
        let result = partition(vec![post(1, vec![5]), post(2, vec![6])], &buckets);

        assert_eq!(labels(&result), vec!["Tips"]);
        assert_eq!(result.residual.ids(), vec![1]);
    }

    #[test]
    fn test_residual_keeps_incoming_order() {
        let items = vec![post(3, vec![]), post(1, vec![7]), post(2, vec![5]), post(4, vec![])];
        let result = partition(items, &[CategoryBucket::new("News", 5)]);

        assert_eq!(result.groups[0].ids(), vec![2]);
        assert_eq!(result.residual.ids(), vec![3, 1, 4]);
        assert_eq!(result.residual.label, None);
    }

    #[test]
    fn test_no_buckets_everything_residual() {
        let result = partition(vec![post(1, vec![5]), post(2, vec![])], &[]);
        assert!(result.groups.is_empty());
        assert_eq!(result.residual.ids(), vec![1, 2]);
    }

    #[test]
    fn test_bucket_deserializes_legacy_field_names() {
        let bucket: CategoryBucket =
            serde_json::from_str(r#"{"label": "News", "termRef": 5}"#).unwrap();
        assert_eq!(bucket, CategoryBucket::new("News", 5));
    }
}
