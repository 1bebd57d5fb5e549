//! Query command - run a search against a written index

use std::{fmt::Write, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use sitesift_search::{Match, Query, SearchIndex, SearchOptions, highlight, preview, search_query};

use super::{index_path, load_config};

/// Run the query command.
pub fn run(
    config_path: &Path,
    text: &str,
    index: Option<&Path>,
    limit: Option<usize>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let path = index_path(index, &config);
    let index = SearchIndex::read_from_file(&path)
        .wrap_err_with(|| format!("Failed to read index from {}", path.display()))?;

    let mut options = SearchOptions::from(&config.search);
    if let Some(limit) = limit {
        options.max_results = limit;
    }

    let Some(query) = Query::parse(text, options.min_query_len) else {
        println!("Query must be at least {} characters", options.min_query_len);
        return Ok(());
    };

    let results = search_query(&query, &index.documents, options.max_results);
    print!(
        "{}",
        format_results(&query, &results, config.search.excerpt_preview)
    );

    Ok(())
}

/// Text with every query occurrence wrapped in `[` `]`.
pub fn mark(text: &str, query: &Query) -> String {
    highlight(text, query.as_str())
        .into_iter()
        .map(|segment| {
            if segment.highlighted {
                format!("[{}]", segment.text)
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}

/// Render a result list for the terminal.
pub fn format_results(query: &Query, results: &[Match<'_>], excerpt_preview: usize) -> String {
    if results.is_empty() {
        return format!("No results found for \"{query}\"\n");
    }

    let mut out = String::new();
    for (i, found) in results.iter().enumerate() {
        let doc = found.document;
        let _ = writeln!(
            out,
            "{:>2}. {} ({}, relevance {})",
            i + 1,
            mark(&doc.title, query),
            doc.kind.as_str(),
            found.relevance.score()
        );
        let _ = writeln!(out, "    {}", doc.url);
        if excerpt_preview > 0 && !doc.excerpt.is_empty() {
            let _ = writeln!(
                out,
                "    {}",
                mark(&preview(&doc.excerpt, excerpt_preview), query)
            );
        }
    }
    out
}
