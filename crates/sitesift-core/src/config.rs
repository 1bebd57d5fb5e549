//! Site and search configuration.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for sitesift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Search widget settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Content collection settings.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    #[serde(default)]
    pub base_url: String,
}

/// Search widget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether the search widget is mounted at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Queries shorter than this (in characters) are not evaluated.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Maximum number of suggestions shown.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Quiet period before a typed query is evaluated.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Number of excerpt characters shown under a suggestion title.
    #[serde(default = "default_excerpt_preview")]
    pub excerpt_preview: usize,

    /// Full results page that Enter without a selection submits to, as
    /// `<explore_path>?q=<query>`. Empty disables submitting.
    #[serde(default = "default_explore_path")]
    pub explore_path: String,
}

/// Content collection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding Markdown posts with YAML frontmatter.
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,

    /// Output path of the JSON document index.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Length of the excerpt derived from the post body.
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
}

fn default_true() -> bool {
    true
}

fn default_min_query_len() -> usize {
    2
}

fn default_max_results() -> usize {
    5
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_excerpt_preview() -> usize {
    60
}

fn default_explore_path() -> String {
    "/explore".to_string()
}

fn default_posts_dir() -> String {
    "_posts".to_string()
}

fn default_index_file() -> String {
    "search.json".to_string()
}

fn default_excerpt_length() -> usize {
    160
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_query_len: default_min_query_len(),
            max_results: default_max_results(),
            debounce_ms: default_debounce_ms(),
            excerpt_preview: default_excerpt_preview(),
            explore_path: default_explore_path(),
        }
    }
}

impl SearchConfig {
    /// Debounce window as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// URL of the full results page for `query`, if submitting is enabled.
    pub fn explore_url(&self, query: &str) -> Option<String> {
        let query = query.trim();
        if self.explore_path.is_empty() || query.is_empty() {
            return None;
        }
        Some(format!("{}?q={}", self.explore_path, urlencoding::encode(query)))
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
            index_file: default_index_file(),
            excerpt_length: default_excerpt_length(),
        }
    }
}

impl Config {
    /// Create a configuration with defaults for everything but the title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                title: title.into(),
                base_url: String::new(),
            },
            search: SearchConfig::default(),
            content: ContentConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `SITESIFT__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("SITESIFT").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.search.min_query_len == 0 {
            return Err(CoreError::config("search.min_query_len must be at least 1"));
        }

        if self.search.max_results == 0 {
            return Err(CoreError::config("search.max_results must be at least 1"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }
}
