//! Browser tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use sitesift_core::Document;
use sitesift_search_wasm::{SearchHit, SiftEngine};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn engine() -> SiftEngine {
    let docs = vec![
        Document::post("SQL Tips", "/sql"),
        Document::post("Dashboards", "/dash").with_excerpt("Writing SQL for BI"),
    ];
    let value = serde_wasm_bindgen::to_value(&docs).expect("documents to js");
    SiftEngine::from_documents(value).expect("engine")
}

#[wasm_bindgen_test]
fn search_returns_ranked_hits() {
    let value = engine().search("sql", None).expect("search");
    let hits: Vec<SearchHit> = serde_wasm_bindgen::from_value(value).expect("hits from js");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].url, "/sql");
    assert_eq!(hits[0].relevance, 3);
    assert_eq!(hits[1].relevance, 2);
}

#[wasm_bindgen_test]
fn filter_accepts_missing_selection() {
    let value = engine().filter(JsValue::UNDEFINED).expect("filter");
    let docs: Vec<Document> = serde_wasm_bindgen::from_value(value).expect("docs from js");
    assert_eq!(docs.len(), 2);
}
