//! Presentation helpers
//!
//! Turn a render tree into markup or text, expand embedded sitemap tags, and
//! build URLs relative to the site root.

mod html;
mod tags;
mod text;
mod url;

pub use html::*;
pub use tags::*;
pub use text::*;
pub use url::*;
