//! JSON document index shipped with the site.
//!
//! The browser loads the whole file into memory, so it stays a flat list of
//! documents in page order with no precomputed structure.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use sitesift_core::Document;
use tracing::{info, warn};

use crate::{
    Result, SearchError,
    engine::{Match, SearchOptions, search_with},
    facets::{FacetFilter, FacetValues},
    snapshot::{PageSnapshot, build_index},
};

/// Current index format version.
pub const INDEX_VERSION: u32 = 1;

/// Recommended maximum size of the serialized index (500KB).
pub const MAX_INDEX_SIZE: usize = 500 * 1024;

/// A serializable set of documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Index format version.
    pub version: u32,

    /// All indexed documents, in page order.
    pub documents: Vec<Document>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SearchIndex {
    /// Create an index over the given documents.
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            version: INDEX_VERSION,
            documents,
        }
    }

    /// Build an index from a snapshot of the rendered page.
    pub fn from_snapshot(snapshot: &PageSnapshot) -> Self {
        Self::new(build_index(snapshot))
    }

    /// Search the indexed documents.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<Match<'_>> {
        search_with(query, &self.documents, options)
    }

    /// Facet values of the indexed documents.
    pub fn facets(&self) -> FacetValues {
        FacetValues::collect(&self.documents)
    }

    /// Documents passing a facet filter.
    pub fn filter(&self, filter: &FacetFilter) -> Vec<&Document> {
        filter.apply(&self.documents)
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Serialize the index to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the index to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize an index from JSON, rejecting unknown versions.
    pub fn from_json(json: &str) -> Result<Self> {
        let index: Self = serde_json::from_str(json)?;
        if index.version != INDEX_VERSION {
            return Err(SearchError::Version {
                found: index.version,
                expected: INDEX_VERSION,
            });
        }
        Ok(index)
    }

    /// Write the index to a file, creating parent directories.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;

        if json.len() > MAX_INDEX_SIZE {
            warn!(
                size = json.len(),
                max = MAX_INDEX_SIZE,
                "Search index exceeds recommended size"
            );
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SearchError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| SearchError::io(path, e))?;

        info!(
            path = %path.display(),
            documents = self.documents.len(),
            "Wrote search index"
        );
        Ok(())
    }

    /// Read an index file.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
        Self::from_json(&json)
    }
}
