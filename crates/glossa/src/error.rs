//! Error types for catalog loading and key resolution.

use thiserror::Error;

use crate::parser::ParseError;
use crate::source::SourceError;
use crate::types::LanguageCode;

/// Errors that occur while discovering or loading catalogs.
///
/// Most of these are recovered by a fallback and only logged. A
/// [`LoadError`] reaches the caller only when the default language's own
/// catalog cannot be served, or when no language is available at all.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The manifest could not be fetched or decoded.
    #[error("language manifest unavailable: {reason}")]
    ManifestUnavailable { reason: String },

    /// The catalog resource for a language could not be fetched.
    #[error("failed to fetch catalog for '{code}': {source}")]
    CatalogFetchFailed {
        code: LanguageCode,
        #[source]
        source: SourceError,
    },

    /// The catalog resource was fetched but could not be decoded.
    #[error("malformed catalog for '{code}': {source}")]
    CatalogMalformed {
        code: LanguageCode,
        #[source]
        source: ParseError,
    },

    /// A language was requested that discovery did not find.
    #[error("language '{code}' is not available")]
    LanguageUnavailable { code: LanguageCode },

    /// Discovery produced no languages, even after fallback.
    #[error("no languages available")]
    NoLanguagesAvailable,
}

/// Why a key path could not be resolved to text.
///
/// Resolution never surfaces these to callers of `t`; they are logged and
/// the key path itself is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("translation key not found: '{key}'{}", format_suggestions(suggestions))]
    KeyNotFound {
        key: String,
        suggestions: Vec<String>,
    },

    #[error("translation value is not a string for key: '{key}'")]
    ValueNotString { key: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}
