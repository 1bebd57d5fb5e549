//! Check command - validate configuration and posts

use std::{collections::HashMap, path::Path};

use color_eyre::eyre::{Result, bail};
use sitesift_core::Config;
use sitesift_search::{ArticleCollector, Collection, MAX_INDEX_SIZE};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and every post in the posts directory.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and posts");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            Config::with_title("sitesift")
        }
    };

    println!("\nChecking configuration values...");
    check_config_values(&config, &mut result);

    println!("\nChecking posts...");
    let posts_dir = Path::new(&config.content.posts_dir);
    if posts_dir.is_dir() {
        let collector = ArticleCollector::from_config(&config.content);
        match collector.collect() {
            Ok(collection) => validate_posts(&collection, &mut result),
            Err(e) => result.add_error(format!("Failed to collect posts: {e}")),
        }
    } else {
        result.add_error(format!(
            "Posts directory missing: {}",
            posts_dir.display()
        ));
        println!("  ✗ {}/ missing", posts_dir.display());
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if config.site.base_url.is_empty() {
        result.add_warning("site.base_url is empty");
    } else if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if !config.search.enabled {
        result.add_warning("search.enabled is false, the widget will not be mounted");
    }

    if config.search.debounce_ms == 0 {
        result.add_warning("search.debounce_ms is 0, every keystroke runs a search");
    }

    if config.search.excerpt_preview == 0 {
        result.add_warning("search.excerpt_preview is 0, suggestions show no excerpt");
    }

    println!("  ✓ Configuration values checked");
}

/// Check collected posts for problems that hurt search quality.
fn validate_posts(collection: &Collection, result: &mut ValidationResult) {
    for skipped in &collection.skipped {
        result.add_warning(format!(
            "{}: skipped ({})",
            skipped.path.display(),
            skipped.reason
        ));
    }

    let mut by_url: HashMap<&str, Vec<&str>> = HashMap::new();
    for doc in &collection.documents {
        by_url.entry(&doc.url).or_default().push(&doc.title);
        if doc.excerpt.is_empty() {
            result.add_warning(format!("{}: empty excerpt", doc.title));
        }
        if doc.date.is_none() {
            result.add_warning(format!("{}: no date", doc.title));
        }
    }

    let mut duplicates: Vec<_> = by_url.into_iter().filter(|(_, t)| t.len() > 1).collect();
    duplicates.sort();
    for (url, titles) in duplicates {
        result.add_error(format!("Duplicate URL {url}: {}", titles.join(", ")));
    }

    let index = sitesift_search::SearchIndex::new(collection.documents.clone());
    match index.to_json() {
        Ok(json) if json.len() > MAX_INDEX_SIZE => result.add_warning(format!(
            "Search index is {} bytes, above the recommended {MAX_INDEX_SIZE}",
            json.len()
        )),
        Ok(_) => {}
        Err(e) => result.add_error(format!("Search index does not serialize: {e}")),
    }

    println!(
        "  ✓ {} posts collected, {} skipped",
        collection.documents.len(),
        collection.skipped.len()
    );
}
