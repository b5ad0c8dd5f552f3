//! Expand embedded sitemap tags inside a document

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::helpers::{expand_tags, render_html};
use crate::sitemap::SitemapError;
use crate::Sitemap;

/// Expand every sitemap tag in `text`
pub fn expand(sitemap: &Sitemap, text: &str) -> Result<String> {
    let labels = &sitemap.config.sitemap;
    let expanded = expand_tags(text, &labels.tag_name, |attrs| {
        let tree = sitemap.render_with(attrs)?;
        Ok::<_, SitemapError>(render_html(&tree, labels))
    })?;
    Ok(expanded)
}

/// Run the expand command, writing to `output` or stdout
pub fn run(sitemap: &Sitemap, input: &Path, output: Option<&Path>) -> Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))?;
    let expanded = expand(sitemap, &text)?;

    match output {
        Some(path) => {
            fs::write(path, expanded).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote {:?}", path);
        }
        None => print!("{}", expanded),
    }
    Ok(())
}
