//! Index command - collect posts and write the JSON search index

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use sitesift_search::{ArticleCollector, SkippedPost};

use super::{index_path, load_config};

/// Outcome of one index build.
#[derive(Debug, Clone)]
pub struct IndexStats {
    /// Documents written.
    pub documents: usize,

    /// Posts left out.
    pub skipped: Vec<SkippedPost>,

    /// Index file.
    pub output: PathBuf,
}

/// Run the index command.
pub fn run(config_path: &Path, posts: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let posts_dir = posts
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.content.posts_dir));
    let output = index_path(output, &config);

    let collector =
        ArticleCollector::new(posts_dir).with_excerpt_length(config.content.excerpt_length);
    let stats = build(&collector, &output)?;
    print_stats(&stats);

    Ok(())
}

/// Collect posts and write the index file.
pub fn build(collector: &ArticleCollector, output: &Path) -> Result<IndexStats> {
    let collection = collector.collect().wrap_err_with(|| {
        format!(
            "Failed to collect posts from {}",
            collector.posts_dir().display()
        )
    })?;

    let skipped = collection.skipped.clone();
    let index = collection.into_index();
    index
        .write_to_file(output)
        .wrap_err_with(|| format!("Failed to write index to {}", output.display()))?;

    Ok(IndexStats {
        documents: index.document_count(),
        skipped,
        output: output.to_path_buf(),
    })
}

/// Print index statistics.
pub fn print_stats(stats: &IndexStats) {
    println!(
        "  ✓ Indexed {} posts into {}",
        stats.documents,
        stats.output.display()
    );
    for skipped in &stats.skipped {
        println!("  ⚠ Skipped {}: {}", skipped.path.display(), skipped.reason);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use sitesift_search::SearchIndex;

    use super::*;

    #[test]
    fn test_build_writes_index() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let posts = dir.path().join("_posts");
        fs::create_dir_all(&posts).expect("create posts dir");
        fs::write(
            posts.join("2024-03-01-sql.md"),
            "---\ntitle: SQL Tips\ndate: 2024-03-01\ntags: [sql]\n---\nQuery faster.\n",
        )
        .expect("write post");
        fs::write(posts.join("draft.md"), "no frontmatter").expect("write draft");

        let output = dir.path().join("site/search.json");
        let stats = build(&ArticleCollector::new(&posts), &output).expect("build");

        assert_eq!(stats.documents, 1);
        assert_eq!(stats.skipped.len(), 1);

        let index = SearchIndex::read_from_file(&output).expect("read index");
        assert_eq!(index.documents[0].title, "SQL Tips");
        assert_eq!(index.documents[0].excerpt, "Query faster.");
    }

    #[test]
    fn test_build_fails_without_posts_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = build(
            &ArticleCollector::new(dir.path().join("missing")),
            &dir.path().join("search.json"),
        );
        assert!(result.is_err());
    }
}
