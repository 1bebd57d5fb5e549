//! Document extraction from a snapshot of the rendered page.
//!
//! The page is not queried directly. The browser side copies the relevant
//! text out of the card elements into a [`PageSnapshot`] and
//! [`build_index`] turns that plain data into documents, so extraction is a
//! pure function that runs (and is tested) anywhere.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sitesift_core::{Document, DocumentKind};
use tracing::debug;

/// Text scraped from one content card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    /// Text of the card title element.
    #[serde(default)]
    pub title: Option<String>,

    /// Text of the card excerpt element.
    #[serde(default)]
    pub excerpt: Option<String>,

    /// Text of each tag badge.
    #[serde(default)]
    pub tags: Vec<String>,

    /// `href` of the card link.
    #[serde(default)]
    pub href: Option<String>,

    /// Text of the card date element.
    #[serde(default)]
    pub date: Option<String>,

    /// Publication year given apart from the date, e.g. by `data-year`.
    #[serde(default)]
    pub year: Option<String>,

    /// Card categories.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Kind of card.
    #[serde(default)]
    pub kind: DocumentKind,
}

/// A tag cloud or filter chip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLink {
    /// Tag name as displayed.
    pub name: String,

    /// Link target, if the chip is a link.
    #[serde(default)]
    pub href: Option<String>,
}

/// Everything searchable on the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Content cards in page order.
    #[serde(default)]
    pub cards: Vec<CardSnapshot>,

    /// Tag chips in page order.
    #[serde(default)]
    pub tag_links: Vec<TagLink>,
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn trimmed_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn card_date(card: &CardSnapshot) -> Option<String> {
    let date = trimmed(card.date.as_deref());
    let year = trimmed(card.year.as_deref());
    if !year.is_empty() && !date.starts_with(&year) {
        return Some(year);
    }
    (!date.is_empty()).then_some(date)
}

/// Extract the document set from a page snapshot.
///
/// Cards come first, in page order, followed by tag chips. Values are only
/// trimmed; missing fields become empty strings. Cards without a title or a
/// link are skipped, and tag chips are de-duplicated by name (first wins).
/// A card year that the date text does not start with replaces the date, so
/// the year facet sees it.
pub fn build_index(snapshot: &PageSnapshot) -> Vec<Document> {
    let mut documents = Vec::with_capacity(snapshot.cards.len() + snapshot.tag_links.len());

    for card in &snapshot.cards {
        let title = trimmed(card.title.as_deref());
        let url = trimmed(card.href.as_deref());
        if title.is_empty() || url.is_empty() {
            continue;
        }

        let date = card_date(card);
        documents.push(Document {
            title,
            excerpt: trimmed(card.excerpt.as_deref()),
            tags: trimmed_list(&card.tags),
            url,
            kind: card.kind,
            date,
            categories: trimmed_list(&card.categories),
        });
    }

    let mut seen_tags = HashSet::new();
    for link in &snapshot.tag_links {
        let name = link.name.trim();
        if name.is_empty() || !seen_tags.insert(name.to_string()) {
            continue;
        }
        documents.push(Document::tag(name, trimmed(link.href.as_deref())));
    }

    debug!(
        cards = snapshot.cards.len(),
        tag_links = snapshot.tag_links.len(),
        documents = documents.len(),
        "Built document set from page snapshot"
    );

    documents
}
