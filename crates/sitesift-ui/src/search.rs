//! Search components for the sitesift frontend.
//!
//! Provides the SearchWidget, Suggestions, SearchModal and SearchShortcut
//! Leptos components.

use std::time::Duration;

use leptos::{ev, html, prelude::*};
use sitesift_core::{Document, DocumentKind, config::SearchConfig};
use wasm_bindgen::JsCast;

use crate::{
    session::{InputOutcome, Key, KeyOutcome, SearchSession, is_open_shortcut},
    view::{Span, SuggestionItem, SuggestionList},
};

/// Elements that open the search modal when clicked.
pub const DEFAULT_TRIGGERS: &str = ".navbar-search-button, [data-search-trigger]";

fn now() -> Duration {
    Duration::from_secs_f64(js_sys::Date::now() / 1000.0)
}

fn navigate(url: &str) {
    if let Err(err) = window().location().set_href(url) {
        tracing::warn!(?err, %url, "Navigation failed");
    }
}

/// Search input with a debounced suggestion list.
///
/// Each keystroke clears the pending timer and starts a new one, so a burst
/// of typing is evaluated once, with the last value. The suggestion list
/// closes on Escape and on clicks outside the widget. Enter without a
/// selection and the search button both submit to the full results page.
///
/// Renders nothing when `config.enabled` is false.
#[component]
pub fn SearchWidget(
    /// Documents extracted from the page. A new value rebuilds the index.
    #[prop(into)]
    documents: Signal<Vec<Document>>,
    /// Search tuning.
    #[prop(optional)]
    config: SearchConfig,
    /// Placeholder text for the input.
    #[prop(default = "Search...".to_string())]
    placeholder: String,
    /// Focus the input once mounted.
    #[prop(optional)]
    autofocus: bool,
    /// Called when the search button is pressed with a blank input.
    #[prop(optional)]
    on_empty_submit: Option<Callback<()>>,
) -> impl IntoView {
    if !config.enabled {
        tracing::debug!("Search disabled, widget not mounted");
        return ().into_any();
    }

    let debounce = config.debounce();
    let session = StoredValue::new(SearchSession::new(Vec::new(), &config));
    let input = RwSignal::new(String::new());
    let list = RwSignal::new(SuggestionList::Hidden);
    let timer = StoredValue::new(None::<TimeoutHandle>);
    let container = NodeRef::<html::Div>::new();
    let input_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if autofocus && let Some(el) = input_ref.get() {
            let _ = el.focus();
        }
    });

    let refresh = move || list.set(session.with_value(SearchSession::view));

    let cancel_timer = move || {
        if let Some(handle) = timer.get_value() {
            handle.clear();
        }
        timer.set_value(None);
    };

    Effect::new(move |_| {
        let docs = documents.get();
        cancel_timer();
        session.update_value(|s| s.reindex(docs));
        refresh();
    });

    let on_input = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        input.set(value.clone());

        cancel_timer();
        match session.try_update_value(|s| s.input_changed(&value, now())) {
            Some(InputOutcome::Scheduled(_)) => {
                refresh();
                let fired = move || {
                    timer.set_value(None);
                    if session.try_update_value(SearchSession::fire).unwrap_or(false) {
                        refresh();
                    }
                };
                match set_timeout_with_handle(fired, debounce) {
                    Ok(handle) => timer.set_value(Some(handle)),
                    Err(err) => tracing::warn!(?err, "Failed to schedule search"),
                }
            }
            Some(InputOutcome::Cleared) => refresh(),
            None => {}
        }
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        let outcome = session
            .try_update_value(|s| s.key(Key::from_name(&ev.key())))
            .unwrap_or(KeyOutcome::Ignored);

        match outcome {
            KeyOutcome::Ignored => {}
            KeyOutcome::Handled => {
                ev.prevent_default();
                cancel_timer();
                refresh();
            }
            KeyOutcome::Navigate(url) => {
                ev.prevent_default();
                cancel_timer();
                refresh();
                navigate(&url);
            }
        }
    };

    let on_submit = move |_: ev::MouseEvent| {
        cancel_timer();
        match session.try_update_value(SearchSession::submit).flatten() {
            Some(url) => {
                refresh();
                navigate(&url);
            }
            None => {
                if let Some(callback) = on_empty_submit {
                    callback.run(());
                }
            }
        }
    };

    let on_hover = Callback::new(move |index: usize| {
        session.update_value(|s| s.set_active(index));
        refresh();
    });

    let outside_click = window_event_listener(ev::click, move |ev| {
        let Some(root) = container.get_untracked() else {
            return;
        };
        let inside = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
            .is_some_and(|node| root.contains(Some(&node)));

        if !inside && session.try_update_value(SearchSession::click_outside).unwrap_or(false) {
            cancel_timer();
            refresh();
        }
    });
    on_cleanup(move || outside_click.remove());

    view! {
      <div class="sitesift-search" node_ref=container>
        <input
          node_ref=input_ref
          type="search"
          class="sitesift-search-input"
          placeholder=placeholder
          autocomplete="off"
          aria-label="Search"
          prop:value=move || input.get()
          on:input=on_input
          on:keydown=on_keydown
        />
        <button type="button" class="sitesift-search-button" aria-label="Search" on:click=on_submit>
          <span class="sitesift-icon-search" aria-hidden="true"></span>
        </button>
        <Suggestions list=list on_hover=on_hover />
      </div>
    }
    .into_any()
}

/// Search modal wrapping a [`SearchWidget`].
///
/// The widget is mounted on open and dropped on close, so each opening
/// starts with an empty input. Escape, the close button and clicks on the
/// overlay close the modal. Page scrolling is locked while it is open.
#[component]
pub fn SearchModal(
    /// Whether the modal is open.
    open: RwSignal<bool>,
    /// Documents extracted from the page.
    #[prop(into)]
    documents: Signal<Vec<Document>>,
    /// Search tuning.
    #[prop(optional)]
    config: SearchConfig,
    /// Placeholder text for the input.
    #[prop(default = "Search posts, tags, categories...".to_string())]
    placeholder: String,
) -> impl IntoView {
    Effect::new(move |_| {
        let overflow = if open.get() { "hidden" } else { "" };
        if let Some(body) = document().body()
            && let Err(err) = body.style().set_property("overflow", overflow)
        {
            tracing::warn!(?err, "Failed to toggle page scrolling");
        }
    });

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if Key::from_name(&ev.key()) == Key::Escape {
            ev.prevent_default();
            open.set(false);
        }
    };

    let on_content_click = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
      <Show when=move || open.get()>
        <div class="sitesift-modal-overlay" on:click=move |_| open.set(false) on:keydown=on_keydown>
          <div class="sitesift-modal" role="dialog" aria-modal="true" on:click=on_content_click>
            <div class="sitesift-modal-header">
              <SearchWidget
                documents=documents
                config=config.clone()
                placeholder=placeholder.clone()
                autofocus=true
              />
              <button
                type="button"
                class="sitesift-modal-close"
                aria-label="Close search"
                on:click=move |_| open.set(false)
              >
                "×"
              </button>
            </div>
            <div class="sitesift-modal-footer">
              <span class="sitesift-modal-hint">
                <kbd>"↑"</kbd>
                <kbd>"↓"</kbd>
                " Navigate"
              </span>
              <span class="sitesift-modal-hint">
                <kbd>"Enter"</kbd>
                " Select"
              </span>
              <span class="sitesift-modal-hint">
                <kbd>"Esc"</kbd>
                " Close"
              </span>
            </div>
          </div>
        </div>
      </Show>
    }
}

/// Global triggers for a [`SearchModal`].
///
/// Opens the modal on Cmd/Ctrl + K and on clicks on any element matching
/// `triggers`, including elements added after mounting.
#[component]
#[allow(clippy::unused_unit)]
pub fn SearchShortcut(
    /// Signal to control modal open state.
    open: RwSignal<bool>,
    /// Selector of the elements that open the modal.
    #[prop(default = DEFAULT_TRIGGERS.to_string())]
    triggers: String,
) -> impl IntoView {
    let keydown = window_event_listener(ev::keydown, move |ev| {
        if is_open_shortcut(&ev.key(), ev.ctrl_key(), ev.meta_key()) {
            ev.prevent_default();
            open.set(true);
        }
    });

    let click = window_event_listener(ev::click, move |ev| {
        let on_trigger = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(&triggers).ok().flatten())
            .is_some();

        if on_trigger {
            ev.prevent_default();
            open.set(true);
        }
    });

    on_cleanup(move || {
        keydown.remove();
        click.remove();
    });
}

/// Suggestion list component.
#[component]
pub fn Suggestions(
    /// What to show.
    #[prop(into)]
    list: Signal<SuggestionList>,
    /// Called with the item index when the pointer enters a suggestion.
    #[prop(optional)]
    on_hover: Option<Callback<usize>>,
) -> impl IntoView {
    view! {
      <div
        class="sitesift-suggestions"
        class:visible=move || list.with(SuggestionList::is_visible)
        role="listbox"
      >
        {move || match list.get() {
          SuggestionList::Hidden => ().into_any(),
          SuggestionList::NoResults { query } => {
            view! {
              <div class="sitesift-no-results">"No results found for \"" {query} "\""</div>
            }
              .into_any()
          }
          SuggestionList::Items { items } => {
            view! {
              <ul class="sitesift-suggestion-list">
                {items
                  .into_iter()
                  .enumerate()
                  .map(|(index, item)| {
                    view! { <SuggestionRow item=item index=index on_hover=on_hover /> }
                  })
                  .collect_view()}
              </ul>
            }
              .into_any()
          }
        }}
      </div>
    }
}

/// Individual suggestion component.
#[component]
fn SuggestionRow(
    /// The rendered suggestion.
    item: SuggestionItem,
    /// Position in the list.
    index: usize,
    /// Hover callback.
    on_hover: Option<Callback<usize>>,
) -> impl IntoView {
    let icon = match item.kind {
        DocumentKind::Post => "sitesift-icon-post",
        DocumentKind::Tag => "sitesift-icon-tag",
        DocumentKind::Category => "sitesift-icon-category",
    };
    let active = item.active;

    view! {
      <li>
        <a
          href=item.url
          class="sitesift-suggestion"
          class:active=active
          role="option"
          aria-selected=active.to_string()
          on:mouseenter=move |_| {
            if let Some(callback) = on_hover {
              callback.run(index);
            }
          }
        >
          <span class=format!("sitesift-suggestion-icon {icon}") aria-hidden="true"></span>
          <span class="sitesift-suggestion-content">
            <span class="sitesift-suggestion-title">{highlighted(item.title)}</span>
            {item
              .excerpt
              .map(|excerpt| {
                view! { <span class="sitesift-suggestion-meta">{highlighted(excerpt)}</span> }
              })}
          </span>
        </a>
      </li>
    }
}

fn highlighted(spans: Vec<Span>) -> impl IntoView {
    spans
        .into_iter()
        .map(|span| {
            if span.mark {
                view! { <mark class="sitesift-highlight">{span.text}</mark> }.into_any()
            } else {
                span.text.into_any()
            }
        })
        .collect_view()
}
