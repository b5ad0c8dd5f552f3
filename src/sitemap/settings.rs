//! Typed sitemap settings read from a [`SettingsStore`]

use serde_json::{json, Value};

use super::explicit::ExplicitOrder;
use super::partition::CategoryBucket;
use super::strategy::SortStrategy;
use crate::config::{SettingsError, SettingsStore};
use crate::content::{ContentKind, TermId};

pub const PAGE_ORDER_KEY: &str = "sitemap.page_order";
pub const POST_ORDER_KEY: &str = "sitemap.post_order";
pub const BUCKETS_KEY: &str = "sitemap.buckets";
pub const EXPLICIT_ORDER_KEY: &str = "sitemap.explicit_order";

/// A validated snapshot of the sitemap settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSettings {
    pub page_order: SortStrategy,
    pub post_order: SortStrategy,
    pub buckets: Vec<CategoryBucket>,
    pub explicit_order: ExplicitOrder,
}

impl Default for SitemapSettings {
    fn default() -> Self {
        Self {
            page_order: SortStrategy::MenuThenTitleAsc,
            post_order: SortStrategy::DateDesc,
            buckets: Vec::new(),
            explicit_order: ExplicitOrder::new(),
        }
    }
}

impl SitemapSettings {
    /// Read every setting from one snapshot, replacing anything invalid with
    /// its safe default
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();
        let mut values = store
            .get_many(&[PAGE_ORDER_KEY, POST_ORDER_KEY, BUCKETS_KEY, EXPLICIT_ORDER_KEY])
            .into_iter();
        let mut next = || values.next().flatten();

        Self {
            page_order: read_strategy(next(), PAGE_ORDER_KEY, defaults.page_order),
            post_order: read_strategy(next(), POST_ORDER_KEY, defaults.post_order),
            buckets: next().map(|v| buckets_from_value(&v)).unwrap_or_default(),
            explicit_order: next()
                .map(|v| ExplicitOrder::from_value(&v))
                .unwrap_or_default(),
        }
    }

    /// Strategy configured for a kind
    pub fn strategy_for(&self, kind: ContentKind) -> SortStrategy {
        match kind {
            ContentKind::Page => self.page_order,
            ContentKind::Post => self.post_order,
        }
    }

    /// Write both strategies together
    pub fn save_strategies(&self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
        store.set_many(self.strategy_entries())
    }

    pub fn save_buckets(&self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
        store.set(BUCKETS_KEY, serde_json::to_value(&self.buckets)?)
    }

    pub fn save_explicit_order(&self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
        store.set(EXPLICIT_ORDER_KEY, self.explicit_order.to_value())
    }

    /// Write every setting in one store update
    pub fn save(&self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
        let mut entries = self.strategy_entries();
        entries.push((BUCKETS_KEY, serde_json::to_value(&self.buckets)?));
        entries.push((EXPLICIT_ORDER_KEY, self.explicit_order.to_value()));
        store.set_many(entries)
    }

    fn strategy_entries(&self) -> Vec<(&'static str, Value)> {
        vec![
            (PAGE_ORDER_KEY, json!(self.page_order.key())),
            (POST_ORDER_KEY, json!(self.post_order.key())),
        ]
    }
}

fn read_strategy(value: Option<Value>, key: &str, default: SortStrategy) -> SortStrategy {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::String(s)) => SortStrategy::parse_or_default(&s),
        Some(other) => {
            tracing::warn!("Ignoring non-string {} value {}, using title_asc", key, other);
            SortStrategy::TitleAsc
        }
    }
}

/// Read a stored bucket sequence.
///
/// Records that are not objects are dropped. A missing or non-numeric term
/// reads as `0` and a missing label as empty, which leaves the bucket
/// persisted but inactive.
pub fn buckets_from_value(value: &Value) -> Vec<CategoryBucket> {
    let Value::Array(entries) = value else {
        if !value.is_null() {
            tracing::warn!("Ignoring malformed bucket list: {}", value);
        }
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let Value::Object(record) = entry else {
                tracing::warn!("Dropping malformed bucket record: {}", entry);
                return None;
            };

            let label = record
                .get("label")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let term = ["term", "termRef", "term_ref"]
                .iter()
                .find_map(|k| record.get(*k))
                .map(term_from_value)
                .unwrap_or(0);

            Some(CategoryBucket { label, term })
        })
        .collect()
}

fn term_from_value(value: &Value) -> TermId {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
