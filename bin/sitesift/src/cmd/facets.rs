//! Facets command - list year, category and tag values, or filter by them

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use sitesift_search::{FacetFilter, FacetValues, SearchIndex};

use super::{index_path, load_config};

/// Run the facets command.
///
/// Without a selection, prints the available values. With one, prints the
/// posts matching every selected facet.
pub fn run(config_path: &Path, index: Option<&Path>, filter: &FacetFilter) -> Result<()> {
    let config = load_config(config_path)?;
    let path = index_path(index, &config);
    let index = SearchIndex::read_from_file(&path)
        .wrap_err_with(|| format!("Failed to read index from {}", path.display()))?;

    if filter.is_empty() {
        print!("{}", format_values(&index.facets()));
        return Ok(());
    }

    let matching = index.filter(filter);
    if matching.is_empty() {
        println!("No posts match the selected filters");
    }
    for doc in matching {
        println!(
            "  {}  {}  {}",
            doc.date.as_deref().unwrap_or("----------"),
            doc.title,
            doc.url
        );
    }

    Ok(())
}

/// Render facet values, one facet per line.
pub fn format_values(values: &FacetValues) -> String {
    let line = |name: &str, items: &[String]| {
        if items.is_empty() {
            format!("{name}: (none)\n")
        } else {
            format!("{name}: {}\n", items.join(", "))
        }
    };

    [
        line("Years", &values.years),
        line("Categories", &values.categories),
        line("Tags", &values.tags),
    ]
    .concat()
}
