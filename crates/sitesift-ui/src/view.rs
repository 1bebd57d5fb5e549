//! Render model of the suggestion list.
//!
//! [`render`] describes what the list should show without touching the DOM.
//! The Leptos components in [`crate::search`] only translate it into markup.

use serde::{Deserialize, Serialize};
use sitesift_core::DocumentKind;
use sitesift_search::{Match, Query, highlight, preview};

/// A run of text inside a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The text.
    pub text: String,

    /// Whether the run is a query match.
    #[serde(default)]
    pub mark: bool,
}

/// One rendered suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    /// Link target.
    pub url: String,

    /// Card kind, used to pick the icon.
    pub kind: DocumentKind,

    /// Highlighted title.
    pub title: Vec<Span>,

    /// Highlighted excerpt preview, absent when the document has none.
    #[serde(default)]
    pub excerpt: Option<Vec<Span>>,

    /// Whether the keyboard cursor is on this item.
    #[serde(default)]
    pub active: bool,
}

/// What the suggestion container shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SuggestionList {
    /// Nothing: no query, or the list was dismissed.
    #[default]
    Hidden,

    /// A query that matched nothing.
    NoResults {
        /// The normalized query.
        query: String,
    },

    /// Matching suggestions, best first.
    Items {
        /// The items.
        items: Vec<SuggestionItem>,
    },
}

impl SuggestionList {
    /// Whether the container is visible.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Number of suggestions shown.
    pub fn len(&self) -> usize {
        match self {
            Self::Items { items } => items.len(),
            _ => 0,
        }
    }

    /// Whether no suggestion is shown.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn spans(text: &str, query: &Query) -> Vec<Span> {
    highlight(text, query.as_str())
        .into_iter()
        .map(|segment| Span {
            text: segment.text.to_string(),
            mark: segment.highlighted,
        })
        .collect()
}

/// Describe the suggestion list for a result list.
///
/// `query` is `None` when the input holds no usable query, which hides the
/// list. `active` is the keyboard cursor position in `results`. An
/// `excerpt_preview` of 0 leaves every excerpt out.
pub fn render(
    results: &[Match<'_>],
    query: Option<&Query>,
    active: Option<usize>,
    excerpt_preview: usize,
) -> SuggestionList {
    let Some(query) = query else {
        return SuggestionList::Hidden;
    };

    if results.is_empty() {
        return SuggestionList::NoResults {
            query: query.to_string(),
        };
    }

    let items = results
        .iter()
        .enumerate()
        .map(|(i, found)| {
            let doc = found.document;
            let excerpt = (excerpt_preview > 0 && !doc.excerpt.is_empty())
                .then(|| spans(&preview(&doc.excerpt, excerpt_preview), query));

            SuggestionItem {
                url: doc.url.clone(),
                kind: doc.kind,
                title: spans(&doc.title, query),
                excerpt,
                active: active == Some(i),
            }
        })
        .collect();

    SuggestionList::Items { items }
}

#[cfg(test)]
mod tests {
    use sitesift_core::Document;
    use sitesift_search::search;

    use super::*;

    fn query(text: &str) -> Query {
        Query::parse(text, 2).expect("query")
    }

    #[test]
    fn test_hidden_without_query() {
        assert_eq!(render(&[], None, None, 60), SuggestionList::Hidden);
        assert!(!SuggestionList::Hidden.is_visible());
    }

    #[test]
    fn test_no_results_state() {
        let list = render(&[], Some(&query("xyz123")), None, 60);
        assert_eq!(
            list,
            SuggestionList::NoResults {
                query: "xyz123".to_string()
            }
        );
        assert!(list.is_visible());
        assert!(list.is_empty());
    }

    #[test]
    fn test_items_are_highlighted() {
        let docs = vec![Document::post("Go Basics", "/go").with_excerpt("Rust is mentioned here")];
        let results = search("rust", &docs);

        let SuggestionList::Items { items } = render(&results, Some(&query("rust")), None, 60)
        else {
            panic!("expected items");
        };

        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].title,
            vec![Span {
                text: "Go Basics".to_string(),
                mark: false
            }]
        );
        let excerpt = items[0].excerpt.as_ref().expect("excerpt");
        assert_eq!(excerpt[0].text, "Rust");
        assert!(excerpt[0].mark);
    }

    #[test]
    fn test_excerpt_preview_is_cut() {
        let long = format!("rust {}", "word ".repeat(30));
        let docs = vec![Document::post("Rust", "/r").with_excerpt(long)];
        let results = search("rust", &docs);

        let SuggestionList::Items { items } = render(&results, Some(&query("rust")), None, 20)
        else {
            panic!("expected items");
        };
        let text: String = items[0]
            .excerpt
            .as_ref()
            .expect("excerpt")
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert!(text.ends_with("..."));
        assert!(text.chars().count() <= 23);
    }

    #[test]
    fn test_zero_preview_omits_excerpt() {
        let docs = vec![Document::post("Go Basics", "/go").with_excerpt("Rust is mentioned here")];
        let results = search("rust", &docs);

        let SuggestionList::Items { items } = render(&results, Some(&query("rust")), None, 0)
        else {
            panic!("expected items");
        };
        assert!(items[0].excerpt.is_none());
    }

    #[test]
    fn test_active_flag_and_missing_excerpt() {
        let docs = vec![
            Document::post("Rust A", "/a"),
            Document::post("Rust B", "/b"),
        ];
        let results = search("rust", &docs);

        let list = render(&results, Some(&query("rust")), Some(1), 60);
        let SuggestionList::Items { items } = list else {
            panic!("expected items");
        };
        assert!(!items[0].active);
        assert!(items[1].active);
        assert!(items[0].excerpt.is_none());
    }

    #[test]
    fn test_serializes_with_state_tag() {
        let json = serde_json::to_string(&SuggestionList::NoResults {
            query: "go".to_string(),
        })
        .expect("serialize");
        assert_eq!(json, r#"{"state":"no_results","query":"go"}"#);
    }
}
