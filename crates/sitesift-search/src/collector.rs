//! Article collection from Markdown posts.
//!
//! Walks the posts directory and turns every `*.md` file with a titled YAML
//! frontmatter block into a [`Document`]. Posts that cannot be used are
//! reported, not fatal.

use std::{
    fs,
    path::{Path, PathBuf},
};

use sitesift_core::{Document, config::ContentConfig, frontmatter::parse_frontmatter};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{Result, SearchError, index::SearchIndex};

/// A post left out of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPost {
    /// Path of the post.
    pub path: PathBuf,

    /// Why it was left out.
    pub reason: String,
}

/// Result of a collection run.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Collected documents, newest first.
    pub documents: Vec<Document>,

    /// Posts that were left out.
    pub skipped: Vec<SkippedPost>,
}

impl Collection {
    /// Wrap the documents in a search index.
    pub fn into_index(self) -> SearchIndex {
        SearchIndex::new(self.documents)
    }
}

/// Collects post documents from a directory.
#[derive(Debug, Clone)]
pub struct ArticleCollector {
    posts_dir: PathBuf,
    excerpt_length: usize,
}

impl ArticleCollector {
    /// Create a collector for a posts directory.
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            excerpt_length: 160,
        }
    }

    /// Create a collector from the content configuration.
    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(&config.posts_dir).with_excerpt_length(config.excerpt_length)
    }

    /// Set the length of excerpts derived from post bodies.
    #[must_use]
    pub fn with_excerpt_length(mut self, excerpt_length: usize) -> Self {
        self.excerpt_length = excerpt_length;
        self
    }

    /// The posts directory.
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Collect all posts.
    ///
    /// Fails only if the directory cannot be walked or a file cannot be read.
    pub fn collect(&self) -> Result<Collection> {
        let mut collection = Collection::default();

        for entry in WalkDir::new(&self.posts_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }

            let content = fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
            match self.read_article(&content, path) {
                Ok(document) => {
                    debug!(path = %path.display(), url = %document.url, "Collected post");
                    collection.documents.push(document);
                }
                Err(reason) => {
                    warn!(path = %path.display(), %reason, "Skipping post");
                    collection.skipped.push(SkippedPost {
                        path: path.to_path_buf(),
                        reason,
                    });
                }
            }
        }

        // Dates are `YYYY-MM-DD`, so string order is date order; undated last.
        collection.documents.sort_by(|a, b| b.date.cmp(&a.date));

        info!(
            posts_dir = %self.posts_dir.display(),
            documents = collection.documents.len(),
            skipped = collection.skipped.len(),
            "Collected articles"
        );

        Ok(collection)
    }

    fn read_article(&self, content: &str, path: &Path) -> std::result::Result<Document, String> {
        let (frontmatter, body) = parse_frontmatter(content, path)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| "no frontmatter".to_string())?;

        let title = frontmatter
            .title()
            .ok_or_else(|| "missing title".to_string())?
            .to_string();

        let excerpt = frontmatter
            .excerpt
            .as_deref()
            .map(str::trim)
            .filter(|excerpt| !excerpt.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| body_excerpt(body, self.excerpt_length));

        let url = match frontmatter.permalink.as_deref().map(str::trim) {
            Some(permalink) if !permalink.is_empty() => permalink.to_string(),
            _ => permalink_for(path.strip_prefix(&self.posts_dir).unwrap_or(path)),
        };

        Ok(Document {
            title,
            excerpt,
            tags: frontmatter.tags.clone(),
            url,
            date: frontmatter.normalized_date(),
            categories: frontmatter.categories.clone(),
            ..Document::default()
        })
    }
}

/// First non-blank line of the body, cut to `max_chars` characters.
pub fn body_excerpt(body: &str, max_chars: usize) -> String {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(max_chars).collect())
        .unwrap_or_default()
}

/// Default URL of a post: its path below the posts directory, as `.html`.
pub fn permalink_for(relative: &Path) -> String {
    let html = relative.with_extension("html");
    let parts: Vec<_> = html
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    format!("/{}", parts.join("/"))
}
