//! sitesift Core Library
//!
//! Core types, configuration, error handling and debouncing shared by the
//! sitesift search index, UI components and CLI.

pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod frontmatter;

pub use config::Config;
pub use debounce::Debouncer;
pub use document::{Document, DocumentKind};
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
