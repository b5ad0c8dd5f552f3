//! List taxonomy terms usable by buckets

use anyhow::Result;

use crate::content::{ContentStore, CATEGORY_TAXONOMY};
use crate::Sitemap;

/// Category terms as pretty-printed `{id, name}` JSON records
pub fn describe(sitemap: &Sitemap) -> Result<String> {
    let terms = sitemap.content().list_terms(CATEGORY_TAXONOMY)?;
    Ok(serde_json::to_string_pretty(&terms)?)
}

/// Run the terms command
pub fn run(sitemap: &Sitemap) -> Result<()> {
    println!("{}", describe(sitemap)?);
    Ok(())
}
