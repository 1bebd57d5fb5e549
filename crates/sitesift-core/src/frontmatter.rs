//! YAML frontmatter of Markdown posts.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

const DELIMITER: &str = "---";

/// Frontmatter fields read from a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Post title; posts without one are not indexed.
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,

    /// Publication date as written in the file.
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: Option<String>,

    /// Tags, either a single string or a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub tags: Vec<String>,

    /// Categories, either a single string or a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub categories: Vec<String>,

    /// Explicit excerpt.
    #[serde(default, deserialize_with = "scalar_string")]
    pub excerpt: Option<String>,

    /// Explicit URL of the rendered post.
    #[serde(default, deserialize_with = "scalar_string")]
    pub permalink: Option<String>,
}

// Numbers and booleans are kept in their printed form: `title: 2024`,
// `tags: [python, 3.12]`.
fn scalar_text(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        Some(serde_yaml::Value::Sequence(values)) => {
            values.into_iter().filter_map(scalar_text).collect()
        }
        Some(value) => scalar_text(value).into_iter().collect(),
        None => Vec::new(),
    })
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}

/// Split content into frontmatter text and body.
///
/// Returns `None` when the content does not open with `---` or the block is
/// never closed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let rest = content.trim_start().strip_prefix(DELIMITER)?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let rest = rest.strip_prefix('\n')?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let frontmatter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse the frontmatter of a post.
///
/// Returns `Ok(None)` when the post carries no frontmatter block.
pub fn parse_frontmatter<'a>(
    content: &'a str,
    path: &Path,
) -> Result<Option<(Frontmatter, &'a str)>> {
    let Some((fm_str, body)) = split_frontmatter(content) else {
        return Ok(None);
    };

    if fm_str.trim().is_empty() {
        return Ok(Some((Frontmatter::default(), body)));
    }

    let frontmatter: Frontmatter =
        serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    Ok(Some((frontmatter, body)))
}

/// Parse the date formats found in post frontmatter.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z") {
        return Some(datetime.date_naive());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|datetime| datetime.date_naive())
}

impl Frontmatter {
    /// Title with surrounding whitespace removed, if non-empty.
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    /// Date normalized to `YYYY-MM-DD`, or the raw text when unparseable.
    pub fn normalized_date(&self) -> Option<String> {
        let raw = self.date.as_deref()?;
        Some(
            parse_date(raw)
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| raw.trim().to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_frontmatter() {
        let content = "---\ntitle: Hello\n---\nFirst line\n";
        let (fm, body) = split_frontmatter(content).expect("frontmatter");
        assert_eq!(fm, "title: Hello\n");
        assert_eq!(body, "First line\n");
    }

    #[test]
    fn test_split_requires_closing_delimiter() {
        assert!(split_frontmatter("---\ntitle: Hello\n").is_none());
        assert!(split_frontmatter("no frontmatter here").is_none());
    }

    #[test]
    fn test_split_ignores_dashes_inside_values() {
        let content = "---\ntitle: a---b\n---\nbody";
        let (fm, body) = split_frontmatter(content).expect("frontmatter");
        assert_eq!(fm, "title: a---b\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_full_frontmatter() {
        let content = r#"---
title: "BigQuery partitions"
date: 2024-02-10 09:30:00 +0100
tags: [bigquery, sql]
categories: data
excerpt: Partition pruning in practice
permalink: /bigquery-partitions/
---
Body text
"#;
        let (fm, body) = parse_frontmatter(content, Path::new("post.md"))
            .expect("parse")
            .expect("frontmatter");

        assert_eq!(fm.title(), Some("BigQuery partitions"));
        assert_eq!(fm.normalized_date().as_deref(), Some("2024-02-10"));
        assert_eq!(fm.tags, vec!["bigquery", "sql"]);
        assert_eq!(fm.categories, vec!["data"]);
        assert_eq!(fm.excerpt.as_deref(), Some("Partition pruning in practice"));
        assert_eq!(fm.permalink.as_deref(), Some("/bigquery-partitions/"));
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn test_single_tag_string() {
        let content = "---\ntitle: T\ntags: rust\n---\n";
        let (fm, _) = parse_frontmatter(content, Path::new("t.md"))
            .expect("parse")
            .expect("frontmatter");
        assert_eq!(fm.tags, vec!["rust"]);
        assert!(fm.categories.is_empty());
    }

    #[test]
    fn test_numeric_scalars_become_text() {
        let content = "---\ntitle: 2024\ntags: [python, 3.12, true]\ncategories: 7\n---\n";
        let (fm, _) = parse_frontmatter(content, Path::new("t.md"))
            .expect("parse")
            .expect("frontmatter");
        assert_eq!(fm.title(), Some("2024"));
        assert_eq!(fm.tags, vec!["python", "3.12", "true"]);
        assert_eq!(fm.categories, vec!["7"]);
    }

    #[test]
    fn test_missing_frontmatter_is_none() {
        let parsed = parse_frontmatter("# Just markdown", Path::new("t.md")).expect("parse");
        assert!(parsed.is_none());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\n";
        let err = parse_frontmatter(content, Path::new("broken.md")).unwrap_err();
        assert!(err.to_string().contains("broken.md"));
    }

    #[test]
    fn test_blank_title_is_missing() {
        let fm = Frontmatter {
            title: Some("   ".to_string()),
            ..Frontmatter::default()
        };
        assert_eq!(fm.title(), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 11, 5);
        assert_eq!(parse_date("2023-11-05"), expected);
        assert_eq!(parse_date("2023-11-05 08:00:00"), expected);
        assert_eq!(parse_date("2023-11-05 08:00:00 +0200"), expected);
        assert_eq!(parse_date("2023-11-05T08:00:00Z"), expected);
        assert_eq!(parse_date("November"), None);
    }

    #[test]
    fn test_unparseable_date_kept_verbatim() {
        let fm = Frontmatter {
            date: Some(" spring 2022 ".to_string()),
            ..Frontmatter::default()
        };
        assert_eq!(fm.normalized_date().as_deref(), Some("spring 2022"));
    }
}
