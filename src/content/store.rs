//! Content store interface
//!
//! The sitemap never reaches into a content repository directly. Everything it
//! needs goes through [`ContentStore`]: a filtered query for pages or posts and
//! a listing of the category taxonomy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::item::{ContentItem, ContentKind, ContentStatus, ItemId, Term, TermId};

/// Errors raised by a content store
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content source {path:?} is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("unknown taxonomy: {0}")]
    UnknownTaxonomy(String),
    #[error("content store failure: {0}")]
    Backend(String),
}

/// The taxonomy buckets are bound to
pub const CATEGORY_TAXONOMY: &str = "category";

/// A content query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub kind: ContentKind,
    pub status: ContentStatus,
    pub taxonomy_filter: Option<TermId>,
    pub exclude_ids: Vec<ItemId>,
}

impl ContentQuery {
    /// Published items of a kind
    pub fn published(kind: ContentKind) -> Self {
        Self {
            kind,
            status: ContentStatus::Published,
            taxonomy_filter: None,
            exclude_ids: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn in_term(mut self, term: TermId) -> Self {
        self.taxonomy_filter = Some(term);
        self
    }

    pub fn excluding(mut self, ids: Vec<ItemId>) -> Self {
        self.exclude_ids = ids;
        self
    }

    /// Whether an item satisfies every filter of this query
    pub fn matches(&self, item: &ContentItem) -> bool {
        item.kind == self.kind
            && item.matches_status(self.status)
            && self.taxonomy_filter.map_or(true, |t| item.has_term(t))
            && !self.exclude_ids.contains(&item.id)
    }
}

/// Source of pages, posts, and category terms
pub trait ContentStore {
    /// Fetch every item matching the query, in the store's natural order
    fn query(&self, query: &ContentQuery) -> Result<Vec<ContentItem>, ContentError>;

    /// List the terms of a taxonomy
    fn list_terms(&self, taxonomy: &str) -> Result<Vec<Term>, ContentError>;
}

/// In-memory content store, mostly useful for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    items: Vec<ContentItem>,
    terms: Vec<Term>,
}

impl MemoryContentStore {
    pub fn new(items: Vec<ContentItem>, terms: Vec<Term>) -> Self {
        Self { items, terms }
    }
}

impl ContentStore for MemoryContentStore {
    fn query(&self, query: &ContentQuery) -> Result<Vec<ContentItem>, ContentError> {
        Ok(self
            .items
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect())
    }

    fn list_terms(&self, taxonomy: &str) -> Result<Vec<Term>, ContentError> {
        if taxonomy != CATEGORY_TAXONOMY {
            return Err(ContentError::UnknownTaxonomy(taxonomy.to_string()));
        }
        Ok(self.terms.clone())
    }
}
