//! Manage category buckets

use anyhow::{Context, Result};

use crate::content::{ContentStore, Term, CATEGORY_TAXONOMY};
use crate::sitemap::{CategoryBucket, SitemapSettings};
use crate::Sitemap;

/// Describe the configured buckets, in partition order
pub fn list(sitemap: &Sitemap) -> Result<String> {
    let settings = SitemapSettings::load(&sitemap.settings());
    if settings.buckets.is_empty() {
        return Ok("No buckets configured\n".to_string());
    }

    let terms = sitemap.content().list_terms(CATEGORY_TAXONOMY)?;

    let mut out = String::new();
    for (index, bucket) in settings.buckets.iter().enumerate() {
        let term_name = terms
            .iter()
            .find(|t| t.id == bucket.term)
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        out.push_str(&format!(
            "{}. {} -> [{}] {}{}\n",
            index + 1,
            bucket.label,
            bucket.term,
            term_name,
            if bucket.is_active() { "" } else { " (inactive)" }
        ));
    }
    Ok(out)
}

fn find_term(sitemap: &Sitemap, reference: &str) -> Result<Term> {
    let terms = sitemap.content().list_terms(CATEGORY_TAXONOMY)?;
    terms
        .into_iter()
        .find(|t| t.matches_ref(reference))
        .with_context(|| format!("No category matches {:?}", reference))
}

fn check_index(index: usize, len: usize) -> Result<usize> {
    if index == 0 || index > len {
        anyhow::bail!("No bucket at position {} ({} configured)", index, len);
    }
    Ok(index - 1)
}

/// Add a bucket bound to the category named by `term` (id, name or slug).
///
/// `position` is 1-based; the bucket is appended when it is absent or past
/// the end.
pub fn add(
    sitemap: &Sitemap,
    label: &str,
    term: &str,
    position: Option<usize>,
) -> Result<CategoryBucket> {
    let label = label.trim();
    if label.is_empty() {
        anyhow::bail!("Bucket label must not be empty");
    }

    let term = find_term(sitemap, term)?;
    let store = sitemap.settings();
    let mut settings = SitemapSettings::load(&store);

    let bucket = CategoryBucket::new(label, term.id);
    let at = position
        .map(|p| p.saturating_sub(1).min(settings.buckets.len()))
        .unwrap_or(settings.buckets.len());
    settings.buckets.insert(at, bucket.clone());
    settings.save_buckets(&store)?;

    tracing::info!("Added bucket {:?} for category {:?}", label, term.name);
    Ok(bucket)
}

/// Remove the bucket at a 1-based position
pub fn remove(sitemap: &Sitemap, index: usize) -> Result<CategoryBucket> {
    let store = sitemap.settings();
    let mut settings = SitemapSettings::load(&store);

    let at = check_index(index, settings.buckets.len())?;
    let removed = settings.buckets.remove(at);
    settings.save_buckets(&store)?;

    tracing::info!("Removed bucket {:?}", removed.label);
    Ok(removed)
}

/// Move a bucket between 1-based positions
pub fn move_bucket(sitemap: &Sitemap, from: usize, to: usize) -> Result<Vec<CategoryBucket>> {
    let store = sitemap.settings();
    let mut settings = SitemapSettings::load(&store);

    let len = settings.buckets.len();
    let from = check_index(from, len)?;
    let to = check_index(to, len)?;

    let bucket = settings.buckets.remove(from);
    settings.buckets.insert(to, bucket);
    settings.save_buckets(&store)?;

    Ok(settings.buckets)
}
