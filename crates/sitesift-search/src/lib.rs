//! sitesift Search Library
//!
//! In-memory text filtering over the cards of a rendered blog page.
//!
//! # Features
//!
//! - **Snapshot extraction**: [`build_index`] turns a [`PageSnapshot`] into documents
//! - **Ranked substring search**: title beats excerpt beats tags, top five kept
//! - **Highlighting**: case-insensitive match segments for rendering
//! - **Facets**: year / category / tag filtering
//! - **Article collection**: Markdown posts to a JSON [`SearchIndex`]
//!
//! # Example
//!
//! ```
//! use sitesift_core::Document;
//! use sitesift_search::{Relevance, search};
//!
//! let docs = vec![
//!     Document::post("Rust Guide", "/rust"),
//!     Document::post("Go Basics", "/go").with_excerpt("Rust is mentioned here"),
//! ];
//!
//! let results = search("rust", &docs);
//! assert_eq!(results[0].relevance, Relevance::Title);
//! assert_eq!(results[1].relevance, Relevance::Excerpt);
//! ```

pub mod collector;
pub mod engine;
pub mod facets;
pub mod highlight;
pub mod index;
pub mod query;
pub mod snapshot;

pub use collector::{ArticleCollector, Collection, SkippedPost, body_excerpt, permalink_for};
pub use engine::{
    MAX_RESULTS, Match, Relevance, SearchOptions, relevance, search, search_query, search_with,
};
pub use facets::{FacetFilter, FacetValues};
pub use highlight::{Segment, highlight, preview};
pub use index::{INDEX_VERSION, MAX_INDEX_SIZE, SearchIndex};
pub use query::{MIN_QUERY_LEN, Query};
pub use snapshot::{CardSnapshot, PageSnapshot, TagLink, build_index};
use thiserror::Error;

/// Search-related errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// I/O error on an index or post file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal error.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unsupported index format.
    #[error("Unsupported index version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },
}

impl SearchError {
    /// Create an I/O error bound to a path.
    pub fn io(path: impl Into<std::path::PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
