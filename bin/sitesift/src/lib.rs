//! Sitesift CLI Library
//!
//! Command implementations behind the `sitesift` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (index, query, facets, check, watch)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sitesift::cmd;
//!
//! // Write search.json from the posts directory
//! cmd::index::run(Path::new("sitesift.toml"), None, None).unwrap();
//! ```

pub mod cmd;

pub use sitesift_core::Config;
pub use sitesift_search::{ArticleCollector, SearchIndex};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
