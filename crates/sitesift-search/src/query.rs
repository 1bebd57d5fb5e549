//! Query normalization.

/// Queries shorter than this many characters are not evaluated.
pub const MIN_QUERY_LEN: usize = 2;

/// A trimmed, lower-cased query long enough to be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    text: String,
}

impl Query {
    /// Normalize raw input.
    ///
    /// Returns `None` for "no query": input that is empty after trimming or
    /// shorter than `min_len` characters.
    pub fn parse(raw: &str, min_len: usize) -> Option<Self> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() || text.chars().count() < min_len {
            return None;
        }
        Some(Self { text })
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Case-insensitive substring test.
    pub fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.text)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
