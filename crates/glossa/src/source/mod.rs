//! Fetch primitives for language resources.
//!
//! A [`CatalogSource`] serves resources by relative path: the manifest at
//! [`MANIFEST_PATH`] and one catalog per language at [`catalog_path`].

mod dir;
#[cfg(feature = "http")]
mod http;
mod memory;

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::LanguageCode;

pub use dir::DirSource;
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use memory::{MemorySource, SourceRequest};

/// Relative path of the language manifest.
pub const MANIFEST_PATH: &str = "languages.json";

/// Relative path of the catalog for `code`.
pub fn catalog_path(code: &LanguageCode) -> String {
    format!("{code}.json")
}

/// Errors produced by a [`CatalogSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("resource not found: '{path}'")]
    NotFound { path: String },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("request for '{url}' returned status {status}")]
    Http { url: String, status: u16 },

    #[error("request for '{url}' failed: {message}")]
    Transport { url: String, message: String },
}

/// Where language resources come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full body of the resource at `path`.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, SourceError>;

    /// Cheap existence probe. Any failure means "absent".
    async fn exists(&self, path: &str) -> bool;
}
