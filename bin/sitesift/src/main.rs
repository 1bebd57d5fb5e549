//! Sitesift CLI
//!
//! Builds the search index of a blog and exercises it from the terminal.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use sitesift_search::FacetFilter;

/// Command-line interface for sitesift.
#[derive(Parser)]
#[command(name = "sitesift", version, about = "Search index tooling for blogs")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sitesift.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Collect posts and write the JSON search index
    Index {
        /// Posts directory (defaults to content.posts_dir)
        #[arg(short, long)]
        posts: Option<PathBuf>,
        /// Index file (defaults to content.index_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search the index and print ranked results
    Query {
        /// Text to search for
        text: String,
        /// Index file (defaults to content.index_file)
        #[arg(short, long)]
        index: Option<PathBuf>,
        /// Maximum number of results (defaults to search.max_results)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List year, category and tag values, or the posts matching a selection
    Facets {
        /// Index file (defaults to content.index_file)
        #[arg(short, long)]
        index: Option<PathBuf>,
        /// Only posts from this year
        #[arg(long)]
        year: Option<String>,
        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,
        /// Only posts with this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Validate configuration and posts
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Rebuild the index whenever posts change
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    sitesift::init_tracing(cli.verbose);

    match cli.command {
        Commands::Index { posts, output } => {
            sitesift::cmd::index::run(&cli.config, posts.as_deref(), output.as_deref())?;
        }
        Commands::Query { text, index, limit } => {
            sitesift::cmd::query::run(&cli.config, &text, index.as_deref(), limit)?;
        }
        Commands::Facets {
            index,
            year,
            category,
            tag,
        } => {
            let filter = FacetFilter {
                year,
                category,
                tag,
            };
            sitesift::cmd::facets::run(&cli.config, index.as_deref(), &filter)?;
        }
        Commands::Check { strict } => {
            sitesift::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Watch => {
            sitesift::cmd::watch::run(&cli.config).await?;
        }
    }

    Ok(())
}
