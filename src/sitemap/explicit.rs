//! Hand-made ordering with graceful fallback
//!
//! An explicit order is a sequence of item ids per section, normally produced
//! by dragging items around in an admin list. Items it names come first in
//! that order; everything else keeps its algorithmic position behind them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use super::strategy::compare_titles;
use crate::content::{ContentItem, ItemId};

/// Reorder items so explicitly ranked ones lead.
///
/// Ranked items follow their rank; unranked items keep their incoming
/// relative order after them. Ids that match no item are ignored. A
/// duplicated id keeps the rank of its first occurrence.
pub fn apply(items: Vec<ContentItem>, explicit_ids: &[ItemId]) -> Vec<ContentItem> {
    if explicit_ids.is_empty() {
        return items;
    }

    let mut ranks: HashMap<ItemId, usize> = HashMap::with_capacity(explicit_ids.len());
    for (rank, id) in explicit_ids.iter().enumerate() {
        ranks.entry(*id).or_insert(rank);
    }

    let mut decorated: Vec<(usize, usize, ContentItem)> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let rank = ranks.get(&item.id).copied().unwrap_or(usize::MAX);
            (rank, index, item)
        })
        .collect();

    decorated.sort_by(|(rank_a, index_a, a), (rank_b, index_b, b)| {
        rank_a
            .cmp(rank_b)
            .then(index_a.cmp(index_b))
            .then_with(|| compare_titles(a, b))
    });

    decorated.into_iter().map(|(_, _, item)| item).collect()
}

/// Normalize a stored id list.
///
/// Accepts an array of numbers or numeric strings, or a single
/// comma-separated string. Zero, negative, fractional and non-numeric entries
/// are dropped; duplicates keep their first occurrence.
pub fn normalize_ids(value: &Value) -> Vec<ItemId> {
    let raw: Vec<Option<ItemId>> = match value {
        Value::Array(entries) => entries.iter().map(id_from_value).collect(),
        Value::String(s) => s.split(',').map(parse_id).collect(),
        Value::Number(_) => vec![id_from_value(value)],
        _ => Vec::new(),
    };
    dedup_ids(raw.into_iter().flatten())
}

/// Normalize ids typed by hand, e.g. `"3, 1,2"`
pub fn parse_id_list(input: &str) -> Vec<ItemId> {
    dedup_ids(input.split(',').filter_map(parse_id))
}

fn id_from_value(value: &Value) -> Option<ItemId> {
    match value {
        Value::Number(n) => n.as_u64().filter(|id| *id > 0),
        Value::String(s) => parse_id(s),
        _ => None,
    }
}

fn parse_id(s: &str) -> Option<ItemId> {
    s.trim().parse::<ItemId>().ok().filter(|id| *id > 0)
}

fn dedup_ids(ids: impl Iterator<Item = ItemId>) -> Vec<ItemId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

/// Move `id` to `position` (0-based, clamped) within a displayed order.
///
/// This is what a drag-and-drop list submits: the whole sequence after the
/// move. Returns `None` when `id` is not in the sequence.
pub fn move_id(order: &[ItemId], id: ItemId, position: usize) -> Option<Vec<ItemId>> {
    let from = order.iter().position(|x| *x == id)?;
    let mut moved = order.to_vec();
    moved.remove(from);
    let to = position.min(moved.len());
    moved.insert(to, id);
    Some(moved)
}

/// Explicit orders keyed by section name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExplicitOrder(IndexMap<String, Vec<ItemId>>);

impl ExplicitOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read leniently from a stored value; anything malformed reads as empty
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            if !value.is_null() {
                tracing::warn!("Ignoring malformed explicit order: {}", value);
            }
            return Self::default();
        };

        Self(
            map.iter()
                .map(|(section, ids)| (section.clone(), normalize_ids(ids)))
                .collect(),
        )
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// The order of a section, empty when none was set
    pub fn get(&self, section: &str) -> &[ItemId] {
        self.0.get(section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the order of a section, dropping zero and duplicate ids
    pub fn set(&mut self, section: impl Into<String>, ids: Vec<ItemId>) {
        let ids = dedup_ids(ids.into_iter().filter(|id| *id > 0));
        self.0.insert(section.into(), ids);
    }

    pub fn clear(&mut self, section: &str) -> bool {
        self.0.shift_remove(section).is_some()
    }
}
