//! Property-based tests for the ordering engine.
//!
//! Titles, dates and menu positions are drawn from tiny ranges so that ties
//! are common and the tie-breaking rules actually get exercised.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Local, TimeZone};
use proptest::prelude::*;

use ordered_sitemap::content::{ContentItem, ContentKind, ItemId};
use ordered_sitemap::sitemap::{apply, partition, resolve, CategoryBucket, SortStrategy};

fn kind() -> impl Strategy<Value = ContentKind> {
    prop_oneof![Just(ContentKind::Page), Just(ContentKind::Post)]
}

fn sort_strategy() -> impl Strategy<Value = SortStrategy> {
    prop::sample::select(SortStrategy::ALL.to_vec())
}

/// Items with distinct ids and deliberately colliding attributes.
fn items(kind: ContentKind) -> impl Strategy<Value = Vec<ContentItem>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["alpha", "Alpha", "beta", "Gamma", "gamma", ""]),
            0i64..4,
            0i64..3,
            prop::collection::vec(1u64..5, 0..3),
        ),
        0..20,
    )
    .prop_map(move |rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (title, day, menu, terms))| {
                let date = Local
                    .timestamp_opt(1_700_000_000 + day * 86_400, 0)
                    .single()
                    .unwrap();
                ContentItem::new(i as ItemId + 1, title, kind)
                    .with_date(date)
                    .with_menu_position(menu)
                    .with_terms(terms)
            })
            .collect()
    })
}

fn kind_and_items() -> impl Strategy<Value = (ContentKind, Vec<ContentItem>)> {
    kind().prop_flat_map(|k| (Just(k), items(k)))
}

fn ids(items: &[ContentItem]) -> Vec<ItemId> {
    items.iter().map(|i| i.id).collect()
}

proptest! {
    /// Every strategy is a strict total order: antisymmetric and only equal
    /// on the same item.
    #[test]
    fn comparator_is_total((kind, items) in kind_and_items(), strategy in sort_strategy()) {
        let cmp = resolve(strategy, kind);
        for a in &items {
            for b in &items {
                let ab = cmp.compare(a, b);
                prop_assert_eq!(ab, cmp.compare(b, a).reverse());
                prop_assert_eq!(ab == Ordering::Equal, a.id == b.id);
            }
        }
    }

    /// Sorting does not depend on the order items arrive in.
    #[test]
    fn sort_ignores_input_order((kind, items) in kind_and_items(), strategy in sort_strategy()) {
        let cmp = resolve(strategy, kind);

        let mut forward = items.clone();
        cmp.sort(&mut forward);

        let mut backward: Vec<ContentItem> = items.into_iter().rev().collect();
        cmp.sort(&mut backward);

        prop_assert_eq!(ids(&forward), ids(&backward));
    }

    /// Partitioning loses nothing, duplicates nothing and keeps relative order.
    #[test]
    fn partition_conserves_items(
        items in items(ContentKind::Post),
        terms in prop::collection::vec(0u64..6, 0..4),
    ) {
        let buckets: Vec<CategoryBucket> = terms
            .iter()
            .enumerate()
            .map(|(i, term)| CategoryBucket::new(format!("Bucket {}", i), *term))
            .collect();

        let split = partition(items.clone(), &buckets);

        let mut seen = HashSet::new();
        let mut total = 0;
        for group in split.groups.iter().chain(std::iter::once(&split.residual)) {
            total += group.len();
            for item in &group.items {
                prop_assert!(seen.insert(item.id));
            }
            let positions: Vec<usize> = group
                .items
                .iter()
                .filter_map(|g| items.iter().position(|i| i.id == g.id))
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert_eq!(total, items.len());

        for item in &split.residual.items {
            prop_assert!(!buckets.iter().any(|b| b.is_active() && item.has_term(b.term)));
        }
        for group in &split.groups {
            prop_assert!(!group.is_empty());
        }
    }

    /// Applying an explicit order twice changes nothing, and ranked items
    /// lead in rank order.
    #[test]
    fn explicit_order_is_idempotent(
        items in items(ContentKind::Page),
        order in prop::collection::vec(1u64..25, 0..10),
    ) {
        let once = apply(items.clone(), &order);
        let twice = apply(once.clone(), &order);
        prop_assert_eq!(ids(&once), ids(&twice));

        let mut expected_ids = ids(&items);
        expected_ids.sort();
        let mut got_ids = ids(&once);
        got_ids.sort();
        prop_assert_eq!(got_ids, expected_ids);

        let present: HashSet<ItemId> = items.iter().map(|i| i.id).collect();
        let mut leading = Vec::new();
        for id in &order {
            if present.contains(id) && !leading.contains(id) {
                leading.push(*id);
            }
        }
        prop_assert_eq!(&ids(&once)[..leading.len()], &leading[..]);
    }
}
