//! HTML rendering of highlighted text.

use sitesift_search::highlight;

/// Escape text for use inside HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped HTML with every occurrence of `query` wrapped in `<mark>`.
///
/// Matching is case-insensitive and keeps the original casing of the text.
pub fn highlight_html(text: &str, query: &str) -> String {
    highlight(text, query.trim())
        .into_iter()
        .map(|segment| {
            let escaped = escape_html(segment.text);
            if segment.highlighted {
                format!("<mark>{escaped}</mark>")
            } else {
                escaped
            }
        })
        .collect()
}
