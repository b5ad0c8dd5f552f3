//! Content module - content items, taxonomy terms, and the stores that supply them

mod frontmatter;
mod item;
pub mod loader;
mod store;

pub use frontmatter::FrontMatter;
pub use item::{ContentItem, ContentKind, ContentStatus, ItemId, Term, TermId};
pub use store::{ContentError, ContentQuery, ContentStore, MemoryContentStore, CATEGORY_TAXONOMY};
