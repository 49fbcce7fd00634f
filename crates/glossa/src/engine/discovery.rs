//! Discovery of languages that have a fetchable catalog.
//!
//! Strategies run in order and the first one that verifies at least one code
//! wins:
//! 1. the manifest's declared candidates, each probed for existence;
//! 2. a built-in candidate list, each probed for existence;
//! 3. a hardcoded fallback list, each verified with a full fetch (sources
//!    that reject existence probes still serve bodies);
//! 4. that same list, taken on trust.
//!
//! All probes within a strategy run concurrently and are joined with
//! wait-for-all semantics. A failed probe only means "absent".

use std::fmt::{self, Display, Formatter};

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::parser::{Manifest, parse_manifest};
use crate::source::{CatalogSource, MANIFEST_PATH, catalog_path};
use crate::types::LanguageCode;

/// Which strategy produced a [`DiscoveryOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    Manifest,
    Probe,
    Fetch,
    Fallback,
}

impl Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscoveryStrategy::Manifest => "manifest",
            DiscoveryStrategy::Probe => "probe",
            DiscoveryStrategy::Fetch => "fetch",
            DiscoveryStrategy::Fallback => "fallback",
        })
    }
}

/// The result of a discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOutcome {
    /// Verified codes, in manifest or candidate order, without duplicates.
    pub languages: Vec<LanguageCode>,
    /// The manifest's `defaultLanguage`, when a manifest was read.
    pub manifest_default: Option<LanguageCode>,
    pub strategy: DiscoveryStrategy,
}

/// Determines which languages actually ship a catalog.
pub struct Discovery<'a> {
    source: &'a dyn CatalogSource,
    probe_candidates: &'a [LanguageCode],
    fallback_languages: &'a [LanguageCode],
}

impl<'a> Discovery<'a> {
    /// Create a discovery over `source`.
    ///
    /// `probe_candidates` is the built-in list tried when the manifest yields
    /// nothing; `fallback_languages` is verified by full fetch, then trusted
    /// as a last resort.
    pub fn new(
        source: &'a dyn CatalogSource,
        probe_candidates: &'a [LanguageCode],
        fallback_languages: &'a [LanguageCode],
    ) -> Self {
        Self {
            source,
            probe_candidates,
            fallback_languages,
        }
    }

    /// Run the strategies in order. Never fails.
    ///
    /// The result is empty only if the configured fallback list is empty.
    pub async fn discover(&self) -> DiscoveryOutcome {
        let mut manifest_default = None;

        match self.fetch_manifest().await {
            Ok(manifest) => {
                manifest_default = manifest.default_language.clone();
                let verified = self.probe_all(&manifest.available_languages).await;
                if verified.is_empty() {
                    warn!("No language declared in the manifest has a catalog");
                } else {
                    return self.finish(verified, manifest_default, DiscoveryStrategy::Manifest);
                }
            }
            Err(e) => warn!(error = %e, "Falling back to probing common languages"),
        }

        let verified = self.probe_all(self.probe_candidates).await;
        if !verified.is_empty() {
            return self.finish(verified, manifest_default, DiscoveryStrategy::Probe);
        }

        let fetched = self.fetch_all(self.fallback_languages).await;
        if !fetched.is_empty() {
            warn!("Existence probes found nothing, catalogs verified by full fetch");
            return self.finish(fetched, manifest_default, DiscoveryStrategy::Fetch);
        }

        warn!("No catalog found, using the built-in language list");
        self.finish(
            dedup(self.fallback_languages),
            manifest_default,
            DiscoveryStrategy::Fallback,
        )
    }

    /// Fetch and decode the manifest.
    pub async fn fetch_manifest(&self) -> Result<Manifest, LoadError> {
        let bytes = self.source.fetch(MANIFEST_PATH).await.map_err(|e| {
            LoadError::ManifestUnavailable {
                reason: e.to_string(),
            }
        })?;
        parse_manifest(&bytes).map_err(|e| LoadError::ManifestUnavailable {
            reason: e.to_string(),
        })
    }

    /// Probe every code concurrently and keep the ones whose catalog exists.
    ///
    /// Input order is preserved and duplicates are dropped.
    pub async fn probe_all(&self, codes: &[LanguageCode]) -> Vec<LanguageCode> {
        let candidates = dedup(codes);
        let probes = candidates.iter().map(|code| async move {
            let found = self.source.exists(&catalog_path(code)).await;
            debug!(language = %code, found, "Probed catalog");
            found
        });
        let results = join_all(probes).await;
        keep_found(candidates, results)
    }

    /// Fetch every code's catalog concurrently and keep the ones that load.
    ///
    /// Slower than [`Discovery::probe_all`] but works against sources whose
    /// existence probes always fail.
    pub async fn fetch_all(&self, codes: &[LanguageCode]) -> Vec<LanguageCode> {
        let candidates = dedup(codes);
        let fetches = candidates.iter().map(|code| async move {
            match self.source.fetch(&catalog_path(code)).await {
                Ok(_) => true,
                Err(e) => {
                    debug!(language = %code, error = %e, "Catalog fetch failed");
                    false
                }
            }
        });
        let results = join_all(fetches).await;
        keep_found(candidates, results)
    }

    /// Re-probe every code the manifest declares.
    ///
    /// Returns `false` if the manifest is unavailable or any declared
    /// catalog is missing.
    pub async fn verify_manifest(&self) -> bool {
        let manifest = match self.fetch_manifest().await {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(error = %e, "Cannot verify catalogs");
                return false;
            }
        };
        let declared = dedup(&manifest.available_languages);
        let verified = self.probe_all(&declared).await;
        for code in declared.iter().filter(|code| !verified.contains(code)) {
            warn!(language = %code, "Declared language has no catalog");
        }
        verified.len() == declared.len()
    }

    fn finish(
        &self,
        languages: Vec<LanguageCode>,
        manifest_default: Option<LanguageCode>,
        strategy: DiscoveryStrategy,
    ) -> DiscoveryOutcome {
        let codes: Vec<&str> = languages.iter().map(LanguageCode::as_str).collect();
        info!(
            languages = ?codes,
            %strategy,
            "Available languages discovered"
        );
        DiscoveryOutcome {
            languages,
            manifest_default,
            strategy,
        }
    }
}

fn keep_found(candidates: Vec<LanguageCode>, found: Vec<bool>) -> Vec<LanguageCode> {
    candidates
        .into_iter()
        .zip(found)
        .filter_map(|(code, found)| found.then_some(code))
        .collect()
}

/// Copy `codes` keeping only the first occurrence of each.
fn dedup(codes: &[LanguageCode]) -> Vec<LanguageCode> {
    let mut unique: Vec<LanguageCode> = Vec::with_capacity(codes.len());
    for code in codes {
        if !unique.contains(code) {
            unique.push(code.clone());
        }
    }
    unique
}
