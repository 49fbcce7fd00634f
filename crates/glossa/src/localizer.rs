//! The public facade: session state plus the operations a UI layer calls.
//!
//! A [`Localizer`] owns everything that changes during a session: the
//! availability set, the catalog cache, and the current language. Mutating
//! operations take `&mut self`, so concurrent callers must share it behind a
//! lock (e.g. `tokio::sync::Mutex`), which serializes every state change.

use std::sync::Arc;

use bon::Builder;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::engine::resolver::{KEY_SEPARATOR, resolve};
use crate::engine::{CatalogLoader, CatalogRegistry, Discovery, DiscoveryOutcome, LoadedCatalog};
use crate::error::LoadError;
use crate::preference::{MemoryPreferenceStore, PreferenceStore};
use crate::source::CatalogSource;
use crate::types::{LanguageCode, LanguageInfo, Params};

/// Language used when no manifest names a default.
pub const DEFAULT_LANGUAGE: &str = "hu";

/// Codes probed when the manifest is missing or verifies nothing.
pub const PROBE_CANDIDATES: &[&str] = &[
    "hu", "en", "de", "fr", "es", "it", "pl", "ro", "cs", "sk", "ru", "ja", "zh", "ko",
];

/// Codes assumed available when no catalog can be verified at all.
pub const FALLBACK_LANGUAGES: &[&str] = &["hu", "en", "de"];

/// Buffered notifications per subscriber before older ones are dropped.
const EVENT_CAPACITY: usize = 16;

/// Lifecycle of a [`Localizer`] session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unset,
    Discovering,
    Ready,
    Switching,
}

/// Sent to subscribers whenever the active language is (re)established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    /// The language that was asked for; what a language picker should show.
    pub requested: LanguageCode,
    /// The language whose catalog actually serves lookups.
    pub served: LanguageCode,
}

/// Resolves user-facing text by language.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use glossa::Localizer;
/// use glossa::source::MemorySource;
///
/// # tokio_test_block(async {
/// let source = MemorySource::new()
///     .with_resource("languages.json", r#"{"availableLanguages": ["en", "hu"], "defaultLanguage": "hu"}"#)
///     .with_resource("en.json", r#"{"tabs": {"write": "Write"}}"#)
///     .with_resource("hu.json", r#"{"tabs": {"write": "Írás"}}"#);
///
/// let mut localizer = Localizer::builder().source(Arc::new(source)).build();
/// localizer.init().await.unwrap();
/// assert_eq!(localizer.t("tabs.write"), "Írás");
///
/// localizer.set_language(&"en".into()).await.unwrap();
/// assert_eq!(localizer.t("tabs.write"), "Write");
/// # });
/// # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Builder)]
#[builder(on(LanguageCode, into))]
pub struct Localizer {
    /// Where the manifest and catalogs are fetched from.
    source: Arc<dyn CatalogSource>,

    /// Where the chosen language is persisted.
    #[builder(default = Arc::new(MemoryPreferenceStore::new()) as Arc<dyn PreferenceStore>)]
    preferences: Arc<dyn PreferenceStore>,

    /// Fallback language for catalogs that fail to load. A verified
    /// `defaultLanguage` in the manifest takes precedence.
    #[builder(default = LanguageCode::from(DEFAULT_LANGUAGE))]
    default_language: LanguageCode,

    #[builder(default = codes(PROBE_CANDIDATES))]
    probe_candidates: Vec<LanguageCode>,

    #[builder(default = codes(FALLBACK_LANGUAGES))]
    fallback_languages: Vec<LanguageCode>,

    #[builder(default = KEY_SEPARATOR)]
    key_separator: char,

    #[builder(skip)]
    state: SessionState,

    #[builder(skip)]
    available: Vec<LanguageCode>,

    /// The manifest's default, kept only when it verified.
    #[builder(skip)]
    manifest_default: Option<LanguageCode>,

    #[builder(skip)]
    registry: CatalogRegistry,

    #[builder(skip)]
    current: Option<LanguageCode>,

    #[builder(skip)]
    active: Option<LoadedCatalog>,

    #[builder(skip = broadcast::channel(EVENT_CAPACITY).0)]
    events: broadcast::Sender<LanguageChanged>,
}

impl Localizer {
    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Discover languages, pick the one to activate, and load it.
    ///
    /// The language is chosen by precedence: the persisted preference if it
    /// is available, then the manifest's default if it is available, then
    /// the first available language. Calling `init` again re-runs discovery
    /// and keeps already loaded catalogs.
    ///
    /// # Errors
    ///
    /// Fails when no language is available or when the default language's
    /// catalog cannot be loaded.
    pub async fn init(&mut self) -> Result<Vec<LanguageCode>, LoadError> {
        self.state = SessionState::Discovering;
        let outcome = self.discover().await;
        self.apply_discovery(outcome);

        if self.available.is_empty() {
            self.state = SessionState::Unset;
            return Err(LoadError::NoLanguagesAvailable);
        }

        let preferred = self.preferences.load().await;
        let target = self.initial_language(preferred);

        let default = self.manifest_default.as_ref().unwrap_or(&self.default_language);
        let loaded = match CatalogLoader::new(&*self.source, default)
            .load(&mut self.registry, &target)
            .await
        {
            Ok(loaded) => loaded,
            Err(e) => {
                self.state = SessionState::Unset;
                return Err(e);
            }
        };

        self.activate(target, loaded);
        Ok(self.available.clone())
    }

    /// Switch to `code`, loading its catalog if it is not cached yet.
    ///
    /// Returns `Ok(false)` without changing anything when `code` is not an
    /// available language. When the catalog for `code` cannot be loaded, the
    /// default language's catalog serves lookups while `code` is still
    /// reported as the current language.
    ///
    /// Also returns `Ok(false)` when the session is not [`SessionState::Ready`],
    /// for instance after a failed `init`.
    ///
    /// # Errors
    ///
    /// Fails only when `code`'s catalog and the default language's catalog
    /// both cannot be loaded.
    pub async fn set_language(&mut self, code: &LanguageCode) -> Result<bool, LoadError> {
        if self.state != SessionState::Ready {
            warn!(language = %code, state = ?self.state, "Ignoring language switch outside a ready session");
            return Ok(false);
        }
        if !self.is_available(code) {
            let e = LoadError::LanguageUnavailable { code: code.clone() };
            warn!("{e}");
            return Ok(false);
        }

        let previous = self.state;
        self.state = SessionState::Switching;

        let default = self.manifest_default.as_ref().unwrap_or(&self.default_language);
        let loaded = match CatalogLoader::new(&*self.source, default)
            .load(&mut self.registry, code)
            .await
        {
            Ok(loaded) => loaded,
            Err(e) => {
                self.state = previous;
                return Err(e);
            }
        };

        self.activate(code.clone(), loaded);
        if let Err(e) = self.preferences.save(code).await {
            warn!(error = %e, "Failed to persist language preference");
        }
        Ok(true)
    }

    /// Re-run discovery, keeping the catalog cache.
    ///
    /// The current language is kept while it is still available. Otherwise a
    /// replacement is chosen with the same precedence as `init` and
    /// subscribers are notified of the switch.
    ///
    /// # Errors
    ///
    /// Fails when discovery finds nothing, or when the replacement language
    /// and the default language both cannot be loaded. The previous language
    /// stays active in that case.
    pub async fn rediscover(&mut self) -> Result<Vec<LanguageCode>, LoadError> {
        let outcome = self.discover().await;
        self.apply_discovery(outcome);
        if self.available.is_empty() {
            return Err(LoadError::NoLanguagesAvailable);
        }

        let Some(current) = self.current.clone() else {
            return Ok(self.available.clone());
        };
        if self.available.contains(&current) {
            return Ok(self.available.clone());
        }

        let preferred = self.preferences.load().await;
        let target = self.initial_language(preferred);
        warn!(dropped = %current, replacement = %target, "Current language is no longer discoverable");

        let previous = self.state;
        self.state = SessionState::Switching;
        let default = self.manifest_default.as_ref().unwrap_or(&self.default_language);
        let loaded = match CatalogLoader::new(&*self.source, default)
            .load(&mut self.registry, &target)
            .await
        {
            Ok(loaded) => loaded,
            Err(e) => {
                self.state = previous;
                return Err(e);
            }
        };

        self.activate(target, loaded);
        Ok(self.available.clone())
    }

    /// Re-probe every language the manifest declares.
    ///
    /// Returns `true` only if the manifest is readable and every declared
    /// catalog exists.
    pub async fn verify_catalogs(&self) -> bool {
        self.discovery().verify_manifest().await
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Translate `key` in the current language.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &Params::new())
    }

    /// Translate `key` in the current language, substituting `{name}`
    /// placeholders from `params`.
    ///
    /// Never fails; unresolvable keys come back unchanged.
    pub fn t_with(&self, key: &str, params: &Params) -> String {
        let catalog = self.active.as_ref().map(|loaded| &*loaded.catalog);
        resolve(catalog, key, params, self.key_separator)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The requested language. Before `init`, the configured default.
    pub fn current_language(&self) -> &LanguageCode {
        self.current.as_ref().unwrap_or(&self.default_language)
    }

    /// The language whose catalog answers lookups, once one is loaded.
    pub fn served_language(&self) -> Option<&LanguageCode> {
        self.active.as_ref().map(|loaded| &loaded.served)
    }

    /// Available languages with display names, in discovery order.
    pub fn available_languages(&self) -> Vec<LanguageInfo> {
        self.available
            .iter()
            .cloned()
            .map(LanguageInfo::new)
            .collect()
    }

    /// Check whether discovery found a catalog for `code`.
    pub fn is_available(&self, code: &LanguageCode) -> bool {
        self.available.contains(code)
    }

    /// Languages whose own catalog has been loaded.
    pub fn loaded_languages(&self) -> Vec<LanguageCode> {
        self.registry.languages()
    }

    /// The fallback language in effect for this session.
    pub fn default_language(&self) -> &LanguageCode {
        self.manifest_default.as_ref().unwrap_or(&self.default_language)
    }

    /// Get the current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Receive a [`LanguageChanged`] for every successful `init` and
    /// `set_language`.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn discovery(&self) -> Discovery<'_> {
        Discovery::new(
            &*self.source,
            &self.probe_candidates,
            &self.fallback_languages,
        )
    }

    /// Run discovery with the default language guaranteed in the fallback list.
    async fn discover(&self) -> DiscoveryOutcome {
        let mut fallback = self.fallback_languages.clone();
        if !fallback.contains(&self.default_language) {
            fallback.insert(0, self.default_language.clone());
        }
        Discovery::new(&*self.source, &self.probe_candidates, &fallback)
            .discover()
            .await
    }

    fn apply_discovery(&mut self, outcome: DiscoveryOutcome) {
        self.manifest_default = outcome
            .manifest_default
            .filter(|code| outcome.languages.contains(code));
        self.available = outcome.languages;
    }

    fn initial_language(&self, preferred: Option<LanguageCode>) -> LanguageCode {
        preferred
            .filter(|code| self.is_available(code))
            .or_else(|| self.manifest_default.clone())
            .or_else(|| self.available.first().cloned())
            .unwrap_or_else(|| self.default_language.clone())
    }

    fn activate(&mut self, requested: LanguageCode, loaded: LoadedCatalog) {
        let event = LanguageChanged {
            requested: requested.clone(),
            served: loaded.served.clone(),
        };
        if requested == loaded.served {
            info!(language = %requested, "Language changed");
        } else {
            warn!(
                language = %requested,
                served = %loaded.served,
                "Language changed, serving fallback catalog"
            );
        }
        self.current = Some(requested);
        self.active = Some(loaded);
        self.state = SessionState::Ready;
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}

fn codes(raw: &[&str]) -> Vec<LanguageCode> {
    raw.iter().copied().map(LanguageCode::from).collect()
}
