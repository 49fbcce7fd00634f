//! Per-language catalog cache.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::types::{Catalog, LanguageCode};

/// Successfully loaded catalogs, keyed by language.
///
/// Entries are append-only: a language is present if and only if its own
/// catalog was loaded at least once, and an entry is never replaced or
/// evicted.
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<LanguageCode, Arc<Catalog>>,
}

impl CatalogRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the catalog registered for a language.
    pub fn get(&self, code: &LanguageCode) -> Option<Arc<Catalog>> {
        self.catalogs.get(code).cloned()
    }

    /// Check whether a language's own catalog has been loaded.
    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.catalogs.contains_key(code)
    }

    /// Insert a catalog unless one is already registered for `code`.
    ///
    /// Returns the registered entry, which is the existing one on conflict.
    pub fn insert(&mut self, code: LanguageCode, catalog: Catalog) -> Arc<Catalog> {
        Arc::clone(
            self.catalogs
                .entry(code)
                .or_insert_with(|| Arc::new(catalog)),
        )
    }

    /// Loaded languages in code order.
    pub fn languages(&self) -> Vec<LanguageCode> {
        self.catalogs.keys().cloned().collect()
    }
}
