//! Content item and taxonomy term models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a content item
pub type ItemId = u64;

/// Identifier of a taxonomy term. `0` means "no term".
pub type TermId = u64;

/// The kind of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Page,
    Post,
}

impl ContentKind {
    /// Name of the section this kind is listed under
    pub fn section(&self) -> &'static str {
        match self {
            ContentKind::Page => "pages",
            ContentKind::Post => "posts",
        }
    }

    /// Parse a section or kind name ("page", "pages", "post", "posts")
    pub fn from_section(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "page" | "pages" => Some(ContentKind::Page),
            "post" | "posts" => Some(ContentKind::Post),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Page => f.write_str("page"),
            ContentKind::Post => f.write_str("post"),
        }
    }
}

/// Publication status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Published,
    Draft,
    Any,
}

/// A snapshot of a page or post taken for one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique, stable id
    pub id: ItemId,

    /// Display title
    pub title: String,

    /// Full permalink URL
    pub permalink: String,

    /// Page or post
    pub kind: ContentKind,

    /// Publication date
    pub published_at: DateTime<Local>,

    /// Menu position (pages); lower comes first
    pub menu_position: i64,

    /// Category term ids this item belongs to
    #[serde(default)]
    pub terms: Vec<TermId>,

    /// Whether the item is published
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl ContentItem {
    /// Create a published item with minimal required fields
    pub fn new(id: ItemId, title: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            id,
            title: title.into(),
            permalink: String::new(),
            kind,
            published_at: Local::now(),
            menu_position: 0,
            terms: Vec::new(),
            published: true,
        }
    }

    pub fn with_permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = permalink.into();
        self
    }

    pub fn with_date(mut self, published_at: DateTime<Local>) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn with_menu_position(mut self, position: i64) -> Self {
        self.menu_position = position;
        self
    }

    pub fn with_terms(mut self, terms: Vec<TermId>) -> Self {
        self.terms = terms;
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    /// Whether this item belongs to the given term
    pub fn has_term(&self, term: TermId) -> bool {
        term != 0 && self.terms.contains(&term)
    }

    /// Whether this item passes a status filter
    pub fn matches_status(&self, status: ContentStatus) -> bool {
        match status {
            ContentStatus::Published => self.published,
            ContentStatus::Draft => !self.published,
            ContentStatus::Any => true,
        }
    }
}

/// A taxonomy term (category)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
}

impl Term {
    pub fn new(id: TermId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// URL-friendly form of the term name
    pub fn slug(&self) -> String {
        slug::slugify(&self.name)
    }

    /// Whether a user-supplied reference (id, name, or slug) names this term
    pub fn matches_ref(&self, reference: &str) -> bool {
        let reference = reference.trim();
        if let Ok(id) = reference.parse::<TermId>() {
            return id == self.id;
        }
        self.name.eq_ignore_ascii_case(reference) || self.slug() == slug::slugify(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_names() {
        assert_eq!(ContentKind::from_section("Pages"), Some(ContentKind::Page));
        assert_eq!(ContentKind::from_section("post"), Some(ContentKind::Post));
        assert_eq!(ContentKind::from_section("drafts"), None);
        assert_eq!(ContentKind::Post.section(), "posts");
    }

    #[test]
    fn test_has_term_ignores_zero() {
        let item = ContentItem::new(1, "A", ContentKind::Post).with_terms(vec![0, 5]);
        assert!(item.has_term(5));
        assert!(!item.has_term(0));
        assert!(!item.has_term(6));
    }

    #[test]
    fn test_status_filter() {
        let draft = ContentItem::new(1, "Draft", ContentKind::Post).unpublished();
        assert!(!draft.matches_status(ContentStatus::Published));
        assert!(draft.matches_status(ContentStatus::Draft));
        assert!(draft.matches_status(ContentStatus::Any));
    }

    #[test]
    fn test_term_matches_ref() {
        let term = Term::new(42, "Rust Tips");
        assert!(term.matches_ref("42"));
        assert!(term.matches_ref("rust tips"));
        assert!(term.matches_ref("rust-tips"));
        assert!(!term.matches_ref("7"));
    }
}
