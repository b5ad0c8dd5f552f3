//! Render tree assembly

use serde::Serialize;

use crate::content::{ContentItem, ItemId};

/// An optionally labelled run of items
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderGroup {
    pub label: Option<String>,
    pub items: Vec<ContentItem>,
}

impl RenderGroup {
    /// A group without a heading
    pub fn flat(items: Vec<ContentItem>) -> Self {
        Self { label: None, items }
    }

    pub fn labeled(label: impl Into<String>, items: Vec<ContentItem>) -> Self {
        Self {
            label: Some(label.into()),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.id).collect()
    }
}

/// A top-level section such as "Pages" or "Blog Posts"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Stable section key ("pages", "posts"); also the explicit-order key
    pub key: String,
    /// Display title
    pub title: String,
    pub groups: Vec<RenderGroup>,
}

impl Section {
    pub fn new(key: impl Into<String>, title: impl Into<String>, groups: Vec<RenderGroup>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(RenderGroup::is_empty)
    }

    /// Ids in display order, across all groups
    pub fn ids(&self) -> Vec<ItemId> {
        self.groups.iter().flat_map(|g| g.items.iter().map(|i| i.id)).collect()
    }
}

/// The assembled sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderTree {
    /// Nothing to show anywhere
    Empty,
    Sections { sections: Vec<Section> },
}

impl RenderTree {
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderTree::Empty)
    }

    pub fn sections(&self) -> &[Section] {
        match self {
            RenderTree::Empty => &[],
            RenderTree::Sections { sections } => sections,
        }
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections().iter().find(|s| s.key == key)
    }

    pub fn item_count(&self) -> usize {
        self.sections()
            .iter()
            .flat_map(|s| &s.groups)
            .map(RenderGroup::len)
            .sum()
    }
}

/// Assemble sections into a render tree.
///
/// Empty groups are dropped, sections left without items are dropped, and a
/// tree with no sections collapses to [`RenderTree::Empty`].
pub fn assemble(sections: &[Section]) -> RenderTree {
    let sections: Vec<Section> = sections
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| Section {
            key: s.key.clone(),
            title: s.title.clone(),
            groups: s.groups.iter().filter(|g| !g.is_empty()).cloned().collect(),
        })
        .collect();

    if sections.is_empty() {
        RenderTree::Empty
    } else {
        RenderTree::Sections { sections }
    }
}
