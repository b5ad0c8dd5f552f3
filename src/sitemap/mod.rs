//! The ordering and grouping engine
//!
//! - [`strategy`] turns a named sort strategy into a total-order comparator
//! - [`partition`] splits posts into category buckets plus a residual group
//! - [`explicit`] applies a hand-made id order on top of the sorted result
//! - [`assemble`] builds the final [`RenderTree`]
//!
//! [`render`] runs the whole pipeline against injected content and settings
//! stores.

pub mod assemble;
pub mod attrs;
pub mod explicit;
pub mod partition;
pub mod pipeline;
pub mod settings;
pub mod strategy;

pub use assemble::{assemble, RenderGroup, RenderTree, Section};
pub use attrs::TagAttributes;
pub use explicit::{apply, ExplicitOrder};
pub use partition::{partition, CategoryBucket, Partition};
pub use pipeline::{build_section, render, SitemapError};
pub use settings::SitemapSettings;
pub use strategy::{resolve, resolve_key, Comparator, SortStrategy};
