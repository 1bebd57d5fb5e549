//! In-memory search engine for page scripts.
//!
//! Holds a [`SearchIndex`] fetched from the site or built from documents the
//! page script extracted itself.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use sitesift_core::{Document, DocumentKind};
use sitesift_search::{FacetFilter, SearchIndex, SearchOptions};
use wasm_bindgen::prelude::*;

use crate::markup::highlight_html;

/// A search result as handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Link target.
    pub url: String,

    /// Document title.
    pub title: String,

    /// Document excerpt, possibly empty.
    pub excerpt: String,

    /// Card kind.
    pub kind: DocumentKind,

    /// 3 for a title match, 2 for an excerpt match, 1 for a tag match.
    pub relevance: u8,
}

/// Ranked hits for `query`, at most `limit` of them.
pub fn hits(index: &SearchIndex, query: &str, limit: Option<usize>) -> Vec<SearchHit> {
    let mut options = SearchOptions::default();
    if let Some(limit) = limit {
        options.max_results = limit;
    }

    index
        .search(query, &options)
        .into_iter()
        .map(|found| SearchHit {
            url: found.document.url.clone(),
            title: found.document.title.clone(),
            excerpt: found.document.excerpt.clone(),
            kind: found.document.kind,
            relevance: found.relevance.score(),
        })
        .collect()
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Search engine for WASM.
#[wasm_bindgen]
pub struct SiftEngine {
    index: SearchIndex,
}

#[wasm_bindgen]
impl SiftEngine {
    /// Load a search index from a URL.
    #[wasm_bindgen(js_name = load)]
    pub async fn load(index_url: &str) -> Result<SiftEngine, JsValue> {
        let response = Request::get(index_url)
            .send()
            .await
            .map_err(|e| JsValue::from_str(&format!("Network error: {e}")))?;

        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "Failed to load index: HTTP {}",
                response.status()
            )));
        }

        let json = response
            .text()
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to read response: {e}")))?;

        Self::from_json(&json)
    }

    /// Create from a serialized index.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<SiftEngine, JsValue> {
        let index = SearchIndex::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse index: {e}")))?;

        Ok(Self { index })
    }

    /// Create from an array of document objects.
    #[wasm_bindgen(js_name = fromDocuments)]
    pub fn from_documents(documents: JsValue) -> Result<SiftEngine, JsValue> {
        let documents: Vec<Document> = serde_wasm_bindgen::from_value(documents)
            .map_err(|e| JsValue::from_str(&format!("Invalid documents: {e}")))?;

        Ok(Self {
            index: SearchIndex::new(documents),
        })
    }

    /// Search the index. Returns an array of hits, best first.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<JsValue, JsValue> {
        to_js(&hits(&self.index, query, limit))
    }

    /// Distinct years, categories and tags of the indexed documents.
    pub fn facets(&self) -> Result<JsValue, JsValue> {
        to_js(&self.index.facets())
    }

    /// Documents matching a `{ year, category, tag }` selection, in index order.
    pub fn filter(&self, filter: JsValue) -> Result<JsValue, JsValue> {
        let filter: FacetFilter = if filter.is_undefined() || filter.is_null() {
            FacetFilter::default()
        } else {
            serde_wasm_bindgen::from_value(filter)
                .map_err(|e| JsValue::from_str(&format!("Invalid filter: {e}")))?
        };
        to_js(&self.index.filter(&filter))
    }

    /// Escaped HTML of `text` with query occurrences wrapped in `<mark>`.
    pub fn highlight(text: &str, query: &str) -> String {
        highlight_html(text, query)
    }

    /// Get the number of indexed documents.
    #[wasm_bindgen(js_name = documentCount)]
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }
}
