//! Content loader - a file-backed content store over the source directory

use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::item::{ContentItem, ContentKind, ContentStatus, ItemId, Term, TermId};
use super::store::{ContentError, ContentQuery, ContentStore, CATEGORY_TAXONOMY};
use super::FrontMatter;
use crate::Sitemap;

/// Largest id that survives a round trip through a JSON number
const MAX_SAFE_ID: u64 = (1 << 53) - 1;

/// Loads pages from the source directory and posts from `source/_posts`
pub struct ContentLoader<'a> {
    sitemap: &'a Sitemap,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(sitemap: &'a Sitemap) -> Self {
        Self { sitemap }
    }

    /// Load every item of a kind, including drafts
    pub fn load(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ContentError> {
        match kind {
            ContentKind::Page => self.load_pages(),
            ContentKind::Post => self.load_posts(),
        }
    }

    /// Load all posts from source/_posts, newest first
    pub fn load_posts(&self) -> Result<Vec<ContentItem>, ContentError> {
        let posts_dir = self.sitemap.source_dir.join("_posts");
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        for path in markdown_files(&posts_dir)? {
            match self.load_item(&path, ContentKind::Post) {
                Ok(post) => posts.push(post),
                Err(e) => tracing::warn!("Skipping post {:?}: {}", path, e),
            }
        }

        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(a.id.cmp(&b.id)));
        Ok(posts)
    }

    /// Load all pages (markdown files outside `_`-prefixed directories)
    pub fn load_pages(&self) -> Result<Vec<ContentItem>, ContentError> {
        let source_dir = &self.sitemap.source_dir;
        if !source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        for path in markdown_files(source_dir)? {
            let relative = path.strip_prefix(source_dir).unwrap_or(&path);
            let in_special_dir = relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str())
                .is_some_and(|first| first.starts_with('_'));
            if in_special_dir {
                continue;
            }

            match self.load_item(&path, ContentKind::Page) {
                Ok(page) => pages.push(page),
                Err(e) => tracing::warn!("Skipping page {:?}: {}", path, e),
            }
        }

        Ok(pages)
    }

    /// Load a single page or post
    fn load_item(&self, path: &Path, kind: ContentKind) -> Result<ContentItem, ContentError> {
        let read_err = |reason: String| ContentError::Read {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| read_err(e.to_string()))?;
        let (fm, _body) = FrontMatter::parse(&content).map_err(|e| read_err(e.to_string()))?;

        let source = self.relative_source(path);

        let date = fm.parse_date().unwrap_or_else(|| {
            fs::metadata(path)
                .and_then(|m| m.modified())
                .map(DateTime::<Local>::from)
                .unwrap_or_else(|_| Local::now())
        });

        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let permalink = match (&fm.permalink, kind) {
            (Some(custom), _) => self.full_url(custom),
            (None, ContentKind::Page) => self.full_url(&page_path(&source)),
            (None, ContentKind::Post) => {
                let slug = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("untitled");
                self.full_url(&self.post_path(&date, slug, &fm.categories))
            }
        };

        let id = match fm.id {
            Some(id) if id > 0 => id,
            _ => stable_id(&format!("{}:{}", kind, source)),
        };

        let mut item = ContentItem::new(id, title, kind)
            .with_permalink(permalink)
            .with_date(date)
            .with_menu_position(fm.menu_order)
            .with_terms(fm.categories.iter().map(|c| term_id(c)).collect());
        item.published = fm.published;

        Ok(item)
    }

    /// Source path relative to the source dir, with forward slashes
    fn relative_source(&self, path: &Path) -> String {
        path.strip_prefix(&self.sitemap.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Post path from the configured permalink pattern
    fn post_path(&self, date: &DateTime<Local>, slug: &str, categories: &[String]) -> String {
        let category = categories
            .first()
            .map(|c| slug::slugify(c))
            .unwrap_or_default();

        self.sitemap
            .config
            .permalink
            .replace(":year", &date.format("%Y").to_string())
            .replace(":month", &date.format("%m").to_string())
            .replace(":day", &date.format("%d").to_string())
            .replace(":i_month", &date.format("%-m").to_string())
            .replace(":i_day", &date.format("%-d").to_string())
            .replace(":title", slug)
            .replace(":name", slug)
            .replace(":category", &category)
    }

    fn full_url(&self, path: &str) -> String {
        crate::helpers::full_url_for(&self.sitemap.config, path)
    }
}

impl ContentStore for ContentLoader<'_> {
    fn query(&self, query: &ContentQuery) -> Result<Vec<ContentItem>, ContentError> {
        let query = if self.sitemap.config.render_drafts {
            query.clone().with_status(ContentStatus::Any)
        } else {
            query.clone()
        };

        let items: Vec<ContentItem> = self
            .load(query.kind)?
            .into_iter()
            .filter(|item| query.matches(item))
            .collect();

        tracing::debug!("Loaded {} {}s", items.len(), query.kind);
        Ok(items)
    }

    fn list_terms(&self, taxonomy: &str) -> Result<Vec<Term>, ContentError> {
        if taxonomy != CATEGORY_TAXONOMY {
            return Err(ContentError::UnknownTaxonomy(taxonomy.to_string()));
        }

        let posts_dir = self.sitemap.source_dir.join("_posts");
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        // keyed by slug so "Rust" and "rust" collapse to one term
        let mut terms: BTreeMap<String, Term> = BTreeMap::new();
        for path in markdown_files(&posts_dir)? {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok((fm, _)) = FrontMatter::parse(&content) else {
                continue;
            };
            for name in fm.categories {
                terms
                    .entry(slug::slugify(&name))
                    .or_insert_with(|| Term::new(term_id(&name), name.clone()));
            }
        }

        Ok(terms.into_values().collect())
    }
}

/// Every markdown file below `dir`, in path order
fn markdown_files(dir: &Path) -> Result<Vec<std::path::PathBuf>, ContentError> {
    fs::metadata(dir).map_err(|source| ContentError::SourceUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_markdown_file(p))
        .collect();
    files.sort();
    Ok(files)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// URL path of a page: `about/index.md` -> `about/`, `contact.md` -> `contact/`
fn page_path(source: &str) -> String {
    let without_ext = source.trim_end_matches(".md").trim_end_matches(".markdown");
    if without_ext.ends_with("/index") || without_ext == "index" {
        without_ext.trim_end_matches("index").to_string()
    } else {
        format!("{}/", without_ext)
    }
}

/// Deterministic positive id derived from a key
pub fn stable_id(key: &str) -> ItemId {
    let digest = Sha256::digest(key.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    let id = u64::from_be_bytes(bytes) & MAX_SAFE_ID;
    id.max(1)
}

/// Term id of a category name
pub fn term_id(name: &str) -> TermId {
    stable_id(&format!("{}:{}", CATEGORY_TAXONOMY, slug::slugify(name)))
}
