//! Search session state machine.
//!
//! ```text
//!            keystroke              window elapsed
//!   Idle ──────────────▶ Pending ──────────────────▶ Rendered
//!    ▲                     │  ▲                          │
//!    │  trivial query /    │  └──────── keystroke ───────┤
//!    │  Escape             │                             │
//!    └─────────────────────┴──── Escape / outside click ─┘
//!                              / trivial query / Enter
//! ```
//!
//! Enter opens the selected suggestion. Without a selection it submits the
//! raw input to the full results page, from any state.
//!
//! The session owns the document set, the raw input, the debouncer and the
//! keyboard cursor. It never touches the DOM; callers feed it events and
//! apply [`SearchSession::view`].

use std::time::Duration;

use sitesift_core::{Debouncer, Document, config::SearchConfig};
use sitesift_search::{Match, Query, Relevance, SearchOptions, search_query};
use tracing::debug;

use crate::view::{SuggestionList, render};

/// Phase of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No query, suggestions hidden.
    #[default]
    Idle,
    /// A query is waiting for the debounce window.
    Pending,
    /// Suggestions for the last evaluated query are shown.
    Rendered,
}

/// Keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Move the cursor down.
    ArrowDown,
    /// Move the cursor up.
    ArrowUp,
    /// Open the selected suggestion, or submit the query.
    Enter,
    /// Dismiss the suggestions.
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Whether a key press is the Cmd/Ctrl + K shortcut that opens search.
pub fn is_open_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key.eq_ignore_ascii_case("k")
}

/// What the caller should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// (Re)start the debounce timer; evaluation is due at the deadline.
    Scheduled(Duration),
    /// The query is trivial; any pending timer can be dropped.
    Cleared,
}

/// What the caller should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was not for us; let the browser handle it.
    Ignored,
    /// The key was consumed; prevent its default action and re-render.
    Handled,
    /// Navigate to the URL.
    Navigate(String),
}

/// One search widget's state.
#[derive(Debug, Clone)]
pub struct SearchSession {
    documents: Vec<Document>,
    options: SearchOptions,
    config: SearchConfig,
    input: String,
    debouncer: Debouncer<String, Duration>,
    state: SessionState,
    query: Option<Query>,
    results: Vec<(usize, Relevance)>,
    active: Option<usize>,
}

impl SearchSession {
    /// Create a session over a document set.
    pub fn new(documents: Vec<Document>, config: &SearchConfig) -> Self {
        Self {
            documents,
            options: SearchOptions::from(config),
            config: config.clone(),
            input: String::new(),
            debouncer: Debouncer::new(config.debounce()),
            state: SessionState::Idle,
            query: None,
            results: Vec::new(),
            active: None,
        }
    }

    /// Replace the document set after the page content changed.
    ///
    /// Shown suggestions refer to the old set, so they are dismissed.
    pub fn reindex(&mut self, documents: Vec<Document>) {
        self.documents = documents;
        self.dismiss();
    }

    /// Current phase.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Raw text of the input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Keyboard cursor position in the result list.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The searched documents.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The shown result list.
    pub fn results(&self) -> Vec<Match<'_>> {
        self.results
            .iter()
            .map(|&(position, relevance)| Match {
                document: &self.documents[position],
                relevance,
                position,
            })
            .collect()
    }

    /// Record new input text at time `now`.
    ///
    /// A usable query (re)starts the debounce window; the previous pending
    /// query, if any, is discarded. The shown suggestions stay but lose the
    /// keyboard cursor, since they no longer answer the input. A trivial
    /// query hides the suggestions right away.
    pub fn input_changed(&mut self, raw: &str, now: Duration) -> InputOutcome {
        self.input = raw.to_string();
        self.active = None;

        if Query::parse(raw, self.options.min_query_len).is_none() {
            self.debouncer.cancel();
            self.clear_results();
            self.state = SessionState::Idle;
            return InputOutcome::Cleared;
        }

        let deadline = self.debouncer.push(raw.to_string(), now);
        self.state = SessionState::Pending;
        InputOutcome::Scheduled(deadline)
    }

    /// Evaluate the pending query if its window has elapsed at `now`.
    ///
    /// Returns whether the suggestions changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.debouncer.poll(now) {
            Some(raw) => self.evaluate(&raw),
            None => false,
        }
    }

    /// Evaluate the pending query now; called when the debounce timer fires.
    ///
    /// Returns whether the suggestions changed.
    pub fn fire(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(raw) => self.evaluate(&raw),
            None => false,
        }
    }

    fn evaluate(&mut self, raw: &str) -> bool {
        let Some(query) = Query::parse(raw, self.options.min_query_len) else {
            return false;
        };

        self.results = search_query(&query, &self.documents, self.options.max_results)
            .iter()
            .map(|found| (found.position, found.relevance))
            .collect();
        self.active = None;
        self.state = SessionState::Rendered;

        debug!(
            query = query.as_str(),
            results = self.results.len(),
            "Rendered suggestions"
        );
        self.query = Some(query);
        true
    }

    /// Handle a key press in the input.
    pub fn key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::ArrowDown | Key::ArrowUp => {
                if self.state != SessionState::Rendered || self.results.is_empty() {
                    return KeyOutcome::Ignored;
                }
                let last = self.results.len() - 1;
                self.active = Some(match (key, self.active) {
                    (Key::ArrowDown, None) => 0,
                    (Key::ArrowDown, Some(i)) if i >= last => 0,
                    (Key::ArrowDown, Some(i)) => i + 1,
                    (_, None) | (_, Some(0)) => last,
                    (_, Some(i)) => (i - 1).min(last),
                });
                KeyOutcome::Handled
            }
            Key::Enter => match self.selected_url() {
                Some(url) => {
                    self.dismiss();
                    if url.is_empty() {
                        KeyOutcome::Handled
                    } else {
                        KeyOutcome::Navigate(url)
                    }
                }
                None => self.submit().map_or(KeyOutcome::Ignored, KeyOutcome::Navigate),
            },
            Key::Escape => {
                if self.state == SessionState::Idle {
                    return KeyOutcome::Ignored;
                }
                self.dismiss();
                KeyOutcome::Handled
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }

    fn selected_url(&self) -> Option<String> {
        if self.state != SessionState::Rendered {
            return None;
        }
        let &(position, _) = self.results.get(self.active?)?;
        Some(self.documents[position].url.clone())
    }

    /// Submit the raw input to the full results page.
    ///
    /// Returns the URL to open, or `None` when the input is blank or
    /// submitting is disabled. Suggestions are dismissed on submit.
    pub fn submit(&mut self) -> Option<String> {
        let url = self.config.explore_url(&self.input)?;
        self.dismiss();
        debug!(%url, "Submitted query");
        Some(url)
    }

    /// Move the cursor to a suggestion, e.g. on hover.
    pub fn set_active(&mut self, index: usize) {
        if self.state == SessionState::Rendered && index < self.results.len() {
            self.active = Some(index);
        }
    }

    /// Handle a click outside the widget.
    ///
    /// Returns whether the suggestions changed.
    pub fn click_outside(&mut self) -> bool {
        if self.state == SessionState::Idle {
            return false;
        }
        self.dismiss();
        true
    }

    /// Hide suggestions and drop any pending query, keeping the input text.
    pub fn dismiss(&mut self) {
        self.debouncer.cancel();
        self.clear_results();
        self.state = SessionState::Idle;
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.active = None;
        self.query = None;
    }

    /// Describe the suggestion list for the current state.
    ///
    /// While a new query is pending, the previous suggestions stay visible.
    pub fn view(&self) -> SuggestionList {
        if self.state == SessionState::Idle {
            return SuggestionList::Hidden;
        }
        render(
            &self.results(),
            self.query.as_ref(),
            self.active,
            self.config.excerpt_preview,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn docs() -> Vec<Document> {
        vec![
            Document::post("Rust Guide", "/rust"),
            Document::post("Go Basics", "/go").with_excerpt("Rust is mentioned here"),
            Document::post("Rust in Production", "/rust-prod"),
        ]
    }

    fn rendered(query: &str) -> SearchSession {
        let mut session = SearchSession::new(docs(), &SearchConfig::default());
        session.input_changed(query, ms(0));
        assert!(session.tick(WINDOW));
        session
    }

    #[test]
    fn test_starts_idle_and_hidden() {
        let session = SearchSession::new(docs(), &SearchConfig::default());
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.view(), SuggestionList::Hidden);
    }

    #[test]
    fn test_short_input_stays_idle() {
        let mut session = SearchSession::new(docs(), &SearchConfig::default());
        assert_eq!(session.input_changed("r", ms(0)), InputOutcome::Cleared);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.tick(ms(1_000)));
        assert!(!session.view().is_visible());
    }

    #[test]
    fn test_debounce_evaluates_last_input_once() {
        let mut session = SearchSession::new(docs(), &SearchConfig::default());
        let mut passes = 0;

        for (i, text) in ["ru", "rus", "rust", "go"].iter().enumerate() {
            let now = ms(i as u64 * 60);
            if session.tick(now) {
                passes += 1;
            }
            let outcome = session.input_changed(text, now);
            assert_eq!(outcome, InputOutcome::Scheduled(now + WINDOW));
            assert_eq!(session.state(), SessionState::Pending);
        }

        for t in (180..=600).step_by(20) {
            if session.tick(ms(t)) {
                passes += 1;
            }
        }

        assert_eq!(passes, 1);
        assert_eq!(session.state(), SessionState::Rendered);
        let urls: Vec<_> = session
            .results()
            .iter()
            .map(|m| m.document.url.clone())
            .collect();
        assert_eq!(urls, vec!["/go"]);
    }

    #[test]
    fn test_fire_evaluates_immediately() {
        let mut session = SearchSession::new(docs(), &SearchConfig::default());
        session.input_changed("rust", ms(0));
        assert!(session.fire());
        assert_eq!(session.results().len(), 3);
        assert!(!session.fire());
    }

    #[test]
    fn test_no_results_view() {
        let session = rendered("xyz123");
        assert_eq!(session.state(), SessionState::Rendered);
        assert_eq!(
            session.view(),
            SuggestionList::NoResults {
                query: "xyz123".to_string()
            }
        );
    }

    #[test]
    fn test_arrow_down_selects_first_then_wraps() {
        let mut session = rendered("rust");
        assert_eq!(session.active(), None);

        assert_eq!(session.key(Key::ArrowDown), KeyOutcome::Handled);
        assert_eq!(session.active(), Some(0));
        session.key(Key::ArrowDown);
        session.key(Key::ArrowDown);
        assert_eq!(session.active(), Some(2));
        session.key(Key::ArrowDown);
        assert_eq!(session.active(), Some(0));
    }

    #[test]
    fn test_arrow_up_wraps_to_last() {
        let mut session = rendered("rust");
        session.key(Key::ArrowUp);
        assert_eq!(session.active(), Some(2));
        session.key(Key::ArrowUp);
        assert_eq!(session.active(), Some(1));

        session.key(Key::ArrowDown);
        session.key(Key::ArrowDown);
        assert_eq!(session.active(), Some(0));
        session.key(Key::ArrowUp);
        assert_eq!(session.active(), Some(2));
    }

    #[test]
    fn test_arrows_ignored_without_results() {
        let mut session = rendered("xyz123");
        assert_eq!(session.key(Key::ArrowDown), KeyOutcome::Ignored);
        assert_eq!(session.active(), None);

        let mut idle = SearchSession::new(docs(), &SearchConfig::default());
        assert_eq!(idle.key(Key::ArrowUp), KeyOutcome::Ignored);
    }

    fn without_explore() -> SearchConfig {
        SearchConfig {
            explore_path: String::new(),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_enter_navigates_exactly_once() {
        let mut session = SearchSession::new(docs(), &without_explore());
        session.input_changed("rust", ms(0));
        session.tick(WINDOW);
        session.key(Key::ArrowDown);
        session.key(Key::ArrowDown);

        let mut navigations = Vec::new();
        for _ in 0..3 {
            if let KeyOutcome::Navigate(url) = session.key(Key::Enter) {
                navigations.push(url);
            }
        }

        assert_eq!(navigations, vec!["/rust-prod".to_string()]);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_enter_after_opening_selection_submits_query() {
        let mut session = rendered("rust");
        session.key(Key::ArrowDown);

        assert_eq!(
            session.key(Key::Enter),
            KeyOutcome::Navigate("/rust".to_string())
        );
        assert_eq!(
            session.key(Key::Enter),
            KeyOutcome::Navigate("/explore?q=rust".to_string())
        );
    }

    #[test]
    fn test_enter_without_selection_submits_query() {
        let mut session = rendered("rust guide");
        assert_eq!(
            session.key(Key::Enter),
            KeyOutcome::Navigate("/explore?q=rust%20guide".to_string())
        );
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.input(), "rust guide");
    }

    #[test]
    fn test_enter_while_pending_submits_query() {
        let mut session = SearchSession::new(docs(), &SearchConfig::default());
        session.input_changed("c++", ms(0));
        assert_eq!(
            session.key(Key::Enter),
            KeyOutcome::Navigate("/explore?q=c%2B%2B".to_string())
        );
        assert!(!session.tick(ms(1_000)));
    }

    #[test]
    fn test_enter_with_blank_input_is_ignored() {
        let mut session = SearchSession::new(docs(), &SearchConfig::default());
        assert_eq!(session.key(Key::Enter), KeyOutcome::Ignored);
        session.input_changed("   ", ms(0));
        assert_eq!(session.key(Key::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn test_enter_without_selection_ignored_when_submit_disabled() {
        let mut session = SearchSession::new(docs(), &without_explore());
        session.input_changed("rust", ms(0));
        session.tick(WINDOW);
        assert_eq!(session.key(Key::Enter), KeyOutcome::Ignored);
        assert_eq!(session.state(), SessionState::Rendered);
    }

    #[test]
    fn test_submit_short_query() {
        let mut session = SearchSession::new(docs(), &SearchConfig::default());
        session.input_changed("r", ms(0));
        assert_eq!(session.submit().as_deref(), Some("/explore?q=r"));
    }

    #[test]
    fn test_escape_keeps_query_text() {
        let mut session = rendered("rust");
        assert_eq!(session.key(Key::Escape), KeyOutcome::Handled);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.input(), "rust");
        assert_eq!(session.view(), SuggestionList::Hidden);
        assert_eq!(session.key(Key::Escape), KeyOutcome::Ignored);
    }

    #[test]
    fn test_escape_cancels_pending_query() {
        let mut session = SearchSession::new(docs(), &SearchConfig::default());
        session.input_changed("rust", ms(0));
        session.key(Key::Escape);
        assert!(!session.tick(ms(1_000)));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_click_outside_dismisses() {
        let mut session = rendered("rust");
        assert!(session.click_outside());
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.input(), "rust");
        assert!(!session.click_outside());
    }

    #[test]
    fn test_new_keystroke_returns_to_pending() {
        let mut session = rendered("rust");
        session.key(Key::ArrowDown);
        session.input_changed("rust i", ms(500));

        assert_eq!(session.state(), SessionState::Pending);
        assert!(session.view().is_visible());
        assert!(session.tick(ms(700)));
        assert_eq!(session.active(), None);
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn test_keystroke_drops_selection_of_stale_list() {
        let mut session = rendered("rust");
        session.key(Key::ArrowDown);
        session.input_changed("rust ", ms(500));

        let SuggestionList::Items { items } = session.view() else {
            panic!("expected the previous items");
        };
        assert!(items.iter().all(|item| !item.active));
        assert_eq!(session.active(), None);
        assert_eq!(
            session.key(Key::Enter),
            KeyOutcome::Navigate("/explore?q=rust".to_string())
        );
    }

    #[test]
    fn test_clearing_input_hides_list() {
        let mut session = rendered("rust");
        assert_eq!(session.input_changed("", ms(500)), InputOutcome::Cleared);
        assert_eq!(session.view(), SuggestionList::Hidden);
    }

    #[test]
    fn test_set_active_on_hover() {
        let mut session = rendered("rust");
        session.set_active(1);
        assert_eq!(session.active(), Some(1));
        session.set_active(9);
        assert_eq!(session.active(), Some(1));
    }

    #[test]
    fn test_reindex_dismisses() {
        let mut session = rendered("rust");
        session.reindex(vec![Document::post("Only Go", "/go")]);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.documents().len(), 1);
    }

    #[test]
    fn test_open_shortcut() {
        assert!(is_open_shortcut("k", true, false));
        assert!(is_open_shortcut("K", false, true));
        assert!(!is_open_shortcut("k", false, false));
        assert!(!is_open_shortcut("j", true, false));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_name("Up"), Key::ArrowUp);
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("a"), Key::Other);
    }
}
