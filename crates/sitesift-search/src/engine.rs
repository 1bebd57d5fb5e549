//! Ranked substring search.
//!
//! Every document is tested against the query on three fields. The first
//! field that contains the query decides the relevance:
//!
//! | Field   | Relevance |
//! |---------|-----------|
//! | title   | 3         |
//! | excerpt | 2         |
//! | any tag | 1         |
//!
//! Matches are sorted by relevance, highest first. The sort is stable, so
//! documents of equal relevance keep their page order. Only the first
//! [`MAX_RESULTS`] matches are kept by default.

use serde::Serialize;
use sitesift_core::{Document, config::SearchConfig};
use tracing::debug;

use crate::query::{MIN_QUERY_LEN, Query};

/// Default size of the result list.
pub const MAX_RESULTS: usize = 5;

/// Which field of a document matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Relevance {
    /// One of the tags contains the query.
    Tag = 1,
    /// The excerpt contains the query.
    Excerpt = 2,
    /// The title contains the query.
    Title = 3,
}

impl Relevance {
    /// Ordinal score.
    pub fn score(self) -> u8 {
        self as u8
    }
}

impl From<Relevance> for u8 {
    fn from(relevance: Relevance) -> Self {
        relevance.score()
    }
}

/// A document paired with its relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match<'a> {
    /// The matching document.
    pub document: &'a Document,

    /// How the document matched.
    pub relevance: Relevance,

    /// Position of the document in the searched set.
    pub position: usize,
}

/// Search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Minimum query length in characters.
    pub min_query_len: usize,

    /// Maximum number of matches returned.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_len: MIN_QUERY_LEN,
            max_results: MAX_RESULTS,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            min_query_len: config.min_query_len,
            max_results: config.max_results,
        }
    }
}

/// Relevance of a document for a query, `None` if nothing matches.
pub fn relevance(document: &Document, query: &Query) -> Option<Relevance> {
    if query.found_in(&document.title) {
        Some(Relevance::Title)
    } else if query.found_in(&document.excerpt) {
        Some(Relevance::Excerpt)
    } else if document.tags.iter().any(|tag| query.found_in(tag)) {
        Some(Relevance::Tag)
    } else {
        None
    }
}

/// Search with the default options.
pub fn search<'a>(query: &str, documents: &'a [Document]) -> Vec<Match<'a>> {
    search_with(query, documents, &SearchOptions::default())
}

/// Search raw user input.
///
/// Returns an empty list when the input is not a usable query.
pub fn search_with<'a>(
    query: &str,
    documents: &'a [Document],
    options: &SearchOptions,
) -> Vec<Match<'a>> {
    match Query::parse(query, options.min_query_len) {
        Some(query) => search_query(&query, documents, options.max_results),
        None => Vec::new(),
    }
}

/// Search with an already normalized query.
pub fn search_query<'a>(query: &Query, documents: &'a [Document], limit: usize) -> Vec<Match<'a>> {
    let mut matches: Vec<Match<'a>> = documents
        .iter()
        .enumerate()
        .filter_map(|(position, document)| {
            relevance(document, query).map(|relevance| Match {
                document,
                relevance,
                position,
            })
        })
        .collect();

    let total = matches.len();

    // `sort_by` is stable: equal relevance keeps document order.
    matches.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    matches.truncate(limit);

    debug!(
        query = query.as_str(),
        total,
        returned = matches.len(),
        "Evaluated search query"
    );

    matches
}
