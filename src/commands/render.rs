//! Render the sitemap

use anyhow::Result;
use clap::ValueEnum;
use std::collections::HashMap;

use crate::helpers::{render_html, render_text};
use crate::Sitemap;

/// Output format of `render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
    Text,
}

/// Render the sitemap to a string
pub fn render(
    sitemap: &Sitemap,
    format: OutputFormat,
    attrs: &HashMap<String, String>,
) -> Result<String> {
    let tree = sitemap.render(attrs)?;

    let output = match format {
        OutputFormat::Html => render_html(&tree, &sitemap.config.sitemap),
        OutputFormat::Json => serde_json::to_string_pretty(&tree)?,
        OutputFormat::Text => render_text(&tree, &sitemap.config.sitemap, false),
    };
    Ok(output)
}

/// Run the render command
pub fn run(sitemap: &Sitemap, format: OutputFormat, attrs: &HashMap<String, String>) -> Result<()> {
    println!("{}", render(sitemap, format, attrs)?.trim_end());
    Ok(())
}

/// Parse `key=value` command-line attributes
pub fn parse_attr(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {:?}", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}
