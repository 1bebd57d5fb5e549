//! Match highlighting.

use std::borrow::Cow;

use serde::Serialize;

/// A run of text, highlighted when it is an occurrence of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    /// The text, with its original casing.
    pub text: &'a str,

    /// Whether the run matches the query.
    pub highlighted: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            highlighted: false,
        }
    }

    fn marked(text: &'a str) -> Self {
        Self {
            text,
            highlighted: true,
        }
    }
}

/// Split `text` around every case-insensitive occurrence of `query`.
///
/// Occurrences do not overlap; scanning resumes after each match. An empty
/// query yields the whole text as one plain segment, empty text yields no
/// segments.
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let needle = query.trim().to_lowercase();
    let mut segments = Vec::new();

    if text.is_empty() {
        return segments;
    }
    if needle.is_empty() {
        segments.push(Segment::plain(text));
        return segments;
    }

    let mut plain_start = 0;
    let mut cursor = 0;

    while cursor < text.len() {
        if let Some(len) = match_len(&text[cursor..], &needle) {
            if plain_start < cursor {
                segments.push(Segment::plain(&text[plain_start..cursor]));
            }
            segments.push(Segment::marked(&text[cursor..cursor + len]));
            cursor += len;
            plain_start = cursor;
        } else {
            cursor += text[cursor..].chars().next().map_or(1, char::len_utf8);
        }
    }

    if plain_start < text.len() {
        segments.push(Segment::plain(&text[plain_start..]));
    }

    segments
}

/// Byte length of the prefix of `text` that lower-cases to `needle`.
fn match_len(text: &str, needle: &str) -> Option<usize> {
    let mut expected = needle.chars().peekable();

    for (offset, c) in text.char_indices() {
        if expected.peek().is_none() {
            return Some(offset);
        }
        for lower in c.to_lowercase() {
            if expected.next() != Some(lower) {
                return None;
            }
        }
    }

    expected.peek().is_none().then_some(text.len())
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}...", text[..cut].trim_end())),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked<'a>(segments: &[Segment<'a>]) -> Vec<&'a str> {
        segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_highlight_preserves_case() {
        let segments = highlight("Rust Guide", "rust");
        assert_eq!(
            segments,
            vec![Segment::marked("Rust"), Segment::plain(" Guide")]
        );
    }

    #[test]
    fn test_highlight_every_occurrence() {
        let segments = highlight("rust and RUST and Rust", "Rust");
        assert_eq!(marked(&segments), vec!["rust", "RUST", "Rust"]);
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, "rust and RUST and Rust");
    }

    #[test]
    fn test_highlight_no_overlap() {
        let segments = highlight("aaaa", "aa");
        assert_eq!(segments, vec![Segment::marked("aa"), Segment::marked("aa")]);
    }

    #[test]
    fn test_highlight_without_match() {
        assert_eq!(highlight("Go Basics", "rust"), vec![Segment::plain("Go Basics")]);
    }

    #[test]
    fn test_highlight_empty_inputs() {
        assert!(highlight("", "rust").is_empty());
        assert_eq!(highlight("Rust", "  "), vec![Segment::plain("Rust")]);
    }

    #[test]
    fn test_highlight_treats_regex_characters_literally() {
        let segments = highlight("C++ (and C#)", "c++");
        assert_eq!(marked(&segments), vec!["C++"]);
    }

    #[test]
    fn test_highlight_non_ascii() {
        let segments = highlight("Données ÉTÉ", "été");
        assert_eq!(marked(&segments), vec!["ÉTÉ"]);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 60), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ab cdef", 3), "ab...");
        assert_eq!(preview("ééééé", 2), "éé...");
    }
}
