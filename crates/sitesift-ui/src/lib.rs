//! Sitesift UI Components
//!
//! Leptos components for the blog search widget.
//!
//! # Components
//!
//! - [`SearchWidget`] - Search input with a debounced suggestion list
//! - [`Suggestions`] - The suggestion list on its own
//! - [`SearchModal`] - The widget in a modal dialog
//! - [`SearchShortcut`] - Cmd/Ctrl + K and trigger buttons opening the modal
//! - [`SearchApp`] - Modal and shortcut over the current page, see [`mount`]
//!
//! The widget state lives in [`SearchSession`], which is plain Rust and is
//! tested without a browser. [`render`] turns a result list into the
//! [`SuggestionList`] the components draw.
//!
//! # Example
//!
//! ```ignore
//! use leptos::prelude::*;
//! use sitesift_search::build_index;
//! use sitesift_ui::{CardSelectors, SearchWidget, snapshot_page};
//!
//! #[component]
//! fn App() -> impl IntoView {
//!     let documents = Signal::derive(|| build_index(&snapshot_page(&CardSelectors::default())));
//!
//!     view! { <SearchWidget documents=documents /> }
//! }
//! ```
//!
//! A page that only wants the modal can mount everything at start-up:
//!
//! ```ignore
//! #[wasm_bindgen(start)]
//! pub fn start() {
//!     sitesift_ui::mount(SearchConfig::default(), CardSelectors::default());
//! }
//! ```

pub mod app;
pub mod dom;
pub mod search;
pub mod session;
pub mod view;

pub use app::{SearchApp, init_logging, mount};
pub use dom::{CardSelectors, snapshot_page};
pub use search::{DEFAULT_TRIGGERS, SearchModal, SearchShortcut, SearchWidget, Suggestions};
pub use session::{InputOutcome, Key, KeyOutcome, SearchSession, SessionState, is_open_shortcut};
pub use view::{Span, SuggestionItem, SuggestionList, render};
