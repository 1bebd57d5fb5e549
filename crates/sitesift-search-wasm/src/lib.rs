//! Sitesift Search WASM Bindings
//!
//! Exposes the sitesift search engine to plain page scripts.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { SiftEngine } from 'sitesift-search-wasm';
//!
//! await init();
//! const engine = await SiftEngine.load('/search.json');
//!
//! for (const hit of engine.search('rust')) {
//!   console.log(hit.relevance, SiftEngine.highlight(hit.title, 'rust'));
//! }
//! ```

pub mod engine;
pub mod markup;

pub use engine::{SearchHit, SiftEngine, hits};
pub use markup::{escape_html, highlight_html};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up panic hook for better error messages in the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the version of the search library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
