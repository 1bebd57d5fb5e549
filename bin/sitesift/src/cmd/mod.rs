//! CLI command implementations.

pub mod check;
pub mod facets;
pub mod index;
pub mod query;
pub mod watch;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use sitesift_core::Config;

/// Title used when no configuration file exists.
const DEFAULT_TITLE: &str = "sitesift";

/// Load the configuration, falling back to defaults when the file is absent.
///
/// `SITESIFT__SECTION__KEY` environment variables override file values.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Configuration file not found, using defaults");
        return Ok(Config::with_title(DEFAULT_TITLE));
    }

    Config::load_with_env(path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", path.display()))
}

/// The index file to use: the explicit one, else the configured one.
pub fn index_path(explicit: Option<&Path>, config: &Config) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.content.index_file))
}
