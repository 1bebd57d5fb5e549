//! Page scraping into a [`PageSnapshot`].
//!
//! Absent elements are not errors: a page without cards yields an empty
//! snapshot and the widget simply has nothing to search.
//!
//! Post cards may carry `data-year`, `data-category` and `data-tags`
//! attributes (comma-separated), as the explore page's article cards do.

use serde::{Deserialize, Serialize};
use sitesift_core::DocumentKind;
use sitesift_search::{CardSnapshot, PageSnapshot, TagLink};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, NodeList};

/// CSS selectors locating searchable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSelectors {
    /// Post cards.
    pub card: String,
    /// Title inside a card.
    pub title: String,
    /// Excerpt inside a card.
    pub excerpt: String,
    /// Tag badges inside a card.
    pub tag: String,
    /// Link inside a card.
    pub link: String,
    /// Date inside a card.
    pub date: String,
    /// Tag chips anywhere on the page.
    pub tag_link: String,
    /// Category and topic cards.
    pub category: String,
    /// Title inside a category card.
    pub category_title: String,
}

impl Default for CardSelectors {
    fn default() -> Self {
        Self {
            card: ".blog-card-databird, .featured-post-card, .article-card".to_string(),
            title: "h2, h3, .blog-card-title, .featured-post-title, .title".to_string(),
            excerpt: ".blog-card-excerpt, .featured-post-excerpt, .excerpt, p".to_string(),
            tag: ".blog-card-tag, .featured-post-tag".to_string(),
            link: "a[href]".to_string(),
            date: ".blog-card-date, .featured-post-meta, .date".to_string(),
            tag_link: ".tag-cloud-item, .filter-tag, .blog-card-tag".to_string(),
            category: ".category-card, .topic-card-enhanced".to_string(),
            category_title: ".category-title, .topic-title-enhanced".to_string(),
        }
    }
}

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn first(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn text_of(element: &Element) -> Option<String> {
    element.text_content()
}

/// Split a comma-separated `data-*` attribute value.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merge badge texts with a `data-tags` value, keeping the first spelling.
pub fn merge_tags(badges: Vec<String>, attribute: Option<&str>) -> Vec<String> {
    let mut tags = badges;
    for tag in attribute.map(split_list).unwrap_or_default() {
        if !tags.iter().any(|t| t.trim() == tag) {
            tags.push(tag);
        }
    }
    tags
}

fn data_list(element: &Element, name: &str) -> Vec<String> {
    element
        .get_attribute(name)
        .map(|value| split_list(&value))
        .unwrap_or_default()
}

fn card_snapshot(card: &Element, selectors: &CardSelectors) -> CardSnapshot {
    let badges = elements(card.query_selector_all(&selectors.tag))
        .iter()
        .filter_map(text_of)
        .collect();

    CardSnapshot {
        title: first(card, &selectors.title).and_then(|e| text_of(&e)),
        excerpt: first(card, &selectors.excerpt).and_then(|e| text_of(&e)),
        tags: merge_tags(badges, card.get_attribute("data-tags").as_deref()),
        href: first(card, &selectors.link).and_then(|e| e.get_attribute("href")),
        date: first(card, &selectors.date).and_then(|e| text_of(&e)),
        year: card.get_attribute("data-year"),
        categories: data_list(card, "data-category"),
        kind: DocumentKind::Post,
    }
}

/// `href` of the element itself or of its closest enclosing link.
fn own_or_enclosing_href(element: &Element) -> Option<String> {
    element.get_attribute("href").or_else(|| {
        element
            .closest("a")
            .ok()
            .flatten()
            .and_then(|a| a.get_attribute("href"))
    })
}

fn category_snapshot(card: &Element, selectors: &CardSelectors) -> CardSnapshot {
    CardSnapshot {
        title: first(card, &selectors.category_title).and_then(|e| text_of(&e)),
        href: own_or_enclosing_href(card)
            .or_else(|| first(card, &selectors.link).and_then(|e| e.get_attribute("href"))),
        kind: DocumentKind::Category,
        ..CardSnapshot::default()
    }
}

fn tag_link(element: &Element) -> Option<TagLink> {
    Some(TagLink {
        name: text_of(element)?,
        href: own_or_enclosing_href(element),
    })
}

/// Copy the searchable content of the current page.
pub fn snapshot_page(selectors: &CardSelectors) -> PageSnapshot {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return PageSnapshot::default();
    };

    let posts = elements(document.query_selector_all(&selectors.card));
    let categories = elements(document.query_selector_all(&selectors.category));
    let cards = posts
        .iter()
        .map(|card| card_snapshot(card, selectors))
        .chain(categories.iter().map(|card| category_snapshot(card, selectors)))
        .collect();
    let tag_links = elements(document.query_selector_all(&selectors.tag_link))
        .iter()
        .filter_map(tag_link)
        .collect();

    PageSnapshot { cards, tag_links }
}
