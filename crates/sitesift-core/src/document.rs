//! Searchable documents.

use serde::{Deserialize, Serialize};

/// What a document stands for on the page.
///
/// Only used for display; relevance never depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A blog post card.
    #[default]
    Post,
    /// A tag cloud entry.
    Tag,
    /// A category / topic card.
    Category,
}

impl DocumentKind {
    /// Lowercase name used in CSS classes and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Tag => "tag",
            Self::Category => "category",
        }
    }
}

/// One searchable content unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document title.
    pub title: String,

    /// Short summary, empty when the card has none.
    #[serde(default)]
    pub excerpt: String,

    /// Tags in page order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Link target.
    pub url: String,

    /// Kind of card the document was extracted from.
    #[serde(default)]
    pub kind: DocumentKind,

    /// Publication date, `YYYY-MM-DD` when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Categories in page order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Document {
    /// Create a post document.
    pub fn post(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Create a tag document; the tag name doubles as the title.
    pub fn tag(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: name.into(),
            url: url.into(),
            kind: DocumentKind::Tag,
            ..Self::default()
        }
    }

    /// Set the excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the publication date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Publication year, the first four characters of the date.
    pub fn year(&self) -> Option<&str> {
        let date = self.date.as_deref()?;
        let year = date.get(..4)?;
        year.chars().all(|c| c.is_ascii_digit()).then_some(year)
    }
}
