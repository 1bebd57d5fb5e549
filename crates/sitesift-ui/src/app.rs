//! Page entry point.
//!
//! `tracing` events from every sitesift crate reach the browser console
//! through the `log` facade once [`init_logging`] has run.

use leptos::prelude::*;
use sitesift_core::config::SearchConfig;
use sitesift_search::build_index;

use crate::{
    dom::{CardSelectors, snapshot_page},
    search::{SearchModal, SearchShortcut},
};

/// Install the panic hook and the console logger.
///
/// Safe to call more than once; the first logger stays installed.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("Console logger already installed");
    }
}

/// Search modal and its global triggers over the cards of the current page.
#[component]
pub fn SearchApp(
    /// Search tuning.
    #[prop(optional)]
    config: SearchConfig,
    /// Where the searchable content lives in the page.
    #[prop(optional)]
    selectors: CardSelectors,
) -> impl IntoView {
    let documents = RwSignal::new(build_index(&snapshot_page(&selectors)));
    let open = RwSignal::new(false);

    view! {
      <SearchShortcut open=open />
      <SearchModal open=open documents=documents config=config />
    }
}

/// Mount [`SearchApp`] on the page body.
///
/// Call once the page content is in the DOM, e.g. from a
/// `#[wasm_bindgen(start)]` function.
pub fn mount(config: SearchConfig, selectors: CardSelectors) {
    init_logging(log::Level::Info);

    if !config.enabled {
        tracing::info!("Search disabled, nothing mounted");
        return;
    }

    leptos::mount::mount_to_body(move || view! { <SearchApp config=config selectors=selectors /> });
}
