//! Catalog fetching with a single fallback to the default language.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::engine::CatalogRegistry;
use crate::error::LoadError;
use crate::parser::parse_catalog;
use crate::source::{CatalogSource, catalog_path};
use crate::types::{Catalog, LanguageCode};

/// A catalog handed out by the loader, tagged with the language it came from.
///
/// `served` differs from the requested code when the loader fell back to the
/// default language.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub served: LanguageCode,
    pub catalog: Arc<Catalog>,
}

/// Loads catalogs into a [`CatalogRegistry`].
pub struct CatalogLoader<'a> {
    source: &'a dyn CatalogSource,
    default_language: &'a LanguageCode,
}

impl<'a> CatalogLoader<'a> {
    /// Create a loader that falls back to `default_language`.
    pub fn new(source: &'a dyn CatalogSource, default_language: &'a LanguageCode) -> Self {
        Self {
            source,
            default_language,
        }
    }

    /// Load the catalog for `code`, serving from the registry when cached.
    ///
    /// If `code` cannot be fetched or decoded and is not the default
    /// language, the default language is loaded instead. That redirection
    /// happens at most once.
    ///
    /// # Errors
    ///
    /// Fails only when the default language's own catalog cannot be served.
    pub async fn load(
        &self,
        registry: &mut CatalogRegistry,
        code: &LanguageCode,
    ) -> Result<LoadedCatalog, LoadError> {
        match self.load_exact(registry, code).await {
            Ok(loaded) => Ok(loaded),
            Err(e) if code != self.default_language => {
                warn!(
                    error = %e,
                    fallback = %self.default_language,
                    "Loading default language instead"
                );
                self.load_exact(registry, self.default_language)
                    .await
                    .inspect_err(|e| error!(error = %e, "Default language catalog unavailable"))
            }
            Err(e) => {
                error!(error = %e, "Default language catalog unavailable");
                Err(e)
            }
        }
    }

    /// Load exactly `code`, with no fallback.
    async fn load_exact(
        &self,
        registry: &mut CatalogRegistry,
        code: &LanguageCode,
    ) -> Result<LoadedCatalog, LoadError> {
        if let Some(catalog) = registry.get(code) {
            debug!(language = %code, "Catalog cache hit");
            return Ok(LoadedCatalog {
                served: code.clone(),
                catalog,
            });
        }

        let bytes = self
            .source
            .fetch(&catalog_path(code))
            .await
            .map_err(|source| LoadError::CatalogFetchFailed {
                code: code.clone(),
                source,
            })?;
        let catalog = parse_catalog(&bytes).map_err(|source| LoadError::CatalogMalformed {
            code: code.clone(),
            source,
        })?;

        let catalog = registry.insert(code.clone(), catalog);
        info!(language = %code, keys = catalog.leaf_count(), "Language loaded");
        Ok(LoadedCatalog {
            served: code.clone(),
            catalog,
        })
    }
}
