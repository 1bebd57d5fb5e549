//! Year / category / tag filtering of the article list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sitesift_core::Document;

/// Distinct facet values, sorted, empty values dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValues {
    /// Publication years.
    pub years: Vec<String>,

    /// Categories.
    pub categories: Vec<String>,

    /// Tags.
    pub tags: Vec<String>,
}

impl FacetValues {
    /// Collect the facet values of a document set.
    pub fn collect(documents: &[Document]) -> Self {
        let mut years = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut tags = BTreeSet::new();

        for doc in documents {
            if let Some(year) = doc.year() {
                years.insert(year.to_string());
            }
            categories.extend(non_empty(&doc.categories));
            tags.extend(non_empty(&doc.tags));
        }

        Self {
            years: years.into_iter().collect(),
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
        }
    }
}

fn non_empty(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Selected facet values. Unset or empty fields accept everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFilter {
    /// Required publication year.
    #[serde(default)]
    pub year: Option<String>,

    /// Required category.
    #[serde(default)]
    pub category: Option<String>,

    /// Required tag.
    #[serde(default)]
    pub tag: Option<String>,
}

impl FacetFilter {
    /// Whether no facet is selected.
    pub fn is_empty(&self) -> bool {
        selected(&self.year).is_none()
            && selected(&self.category).is_none()
            && selected(&self.tag).is_none()
    }

    /// Whether a document passes every selected facet.
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(year) = selected(&self.year) {
            if document.year() != Some(year) {
                return false;
            }
        }
        if let Some(category) = selected(&self.category) {
            if !contains(&document.categories, category) {
                return false;
            }
        }
        if let Some(tag) = selected(&self.tag) {
            if !contains(&document.tags, tag) {
                return false;
            }
        }
        true
    }

    /// Documents passing the filter, in their original order.
    pub fn apply<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents.iter().filter(|doc| self.matches(doc)).collect()
    }
}

fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contains(values: &[String], wanted: &str) -> bool {
    values.iter().any(|v| v.trim() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Document> {
        vec![
            Document::post("Partitions", "/a")
                .with_date("2024-02-10")
                .with_categories(["data"])
                .with_tags(["bigquery", "sql"]),
            Document::post("Dashboards", "/b")
                .with_date("2023-06-01")
                .with_categories(["bi", " data "])
                .with_tags(["looker"]),
            Document::post("Undated", "/c").with_tags(["", "sql"]),
        ]
    }

    #[test]
    fn test_collect_sorted_distinct() {
        let facets = FacetValues::collect(&docs());
        assert_eq!(facets.years, vec!["2023", "2024"]);
        assert_eq!(facets.categories, vec!["bi", "data"]);
        assert_eq!(facets.tags, vec!["bigquery", "looker", "sql"]);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let docs = docs();
        let filter = FacetFilter {
            year: Some(String::new()),
            ..FacetFilter::default()
        };
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&docs).len(), 3);
    }

    #[test]
    fn test_filter_by_year() {
        let docs = docs();
        let filter = FacetFilter {
            year: Some("2024".to_string()),
            ..FacetFilter::default()
        };
        let urls: Vec<_> = filter.apply(&docs).iter().map(|d| d.url.as_str()).collect();
        assert_eq!(urls, vec!["/a"]);
    }

    #[test]
    fn test_filters_combine() {
        let docs = docs();
        let filter = FacetFilter {
            year: None,
            category: Some("data".to_string()),
            tag: Some("sql".to_string()),
        };
        let urls: Vec<_> = filter.apply(&docs).iter().map(|d| d.url.as_str()).collect();
        assert_eq!(urls, vec!["/a"]);

        let filter = FacetFilter {
            tag: Some("sql".to_string()),
            ..FacetFilter::default()
        };
        assert_eq!(filter.apply(&docs).len(), 2);
    }

    #[test]
    fn test_tag_requires_exact_value() {
        let docs = docs();
        let filter = FacetFilter {
            tag: Some("big".to_string()),
            ..FacetFilter::default()
        };
        assert!(filter.apply(&docs).is_empty());
    }
}
