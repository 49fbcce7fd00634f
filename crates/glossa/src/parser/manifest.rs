//! The language manifest: which codes ship a catalog, and the preferred default.

use serde::{Deserialize, Serialize};

use crate::parser::error::ParseError;
use crate::types::LanguageCode;

/// Decoded `languages.json`.
///
/// ```
/// let manifest = glossa::parser::parse_manifest(
///     br#"{"availableLanguages": ["en", "hu"], "defaultLanguage": "hu"}"#,
/// ).unwrap();
/// assert_eq!(manifest.available_languages.len(), 2);
/// assert_eq!(manifest.default_language.unwrap().as_str(), "hu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Candidate codes, in presentation order.
    pub available_languages: Vec<LanguageCode>,
    #[serde(default)]
    pub default_language: Option<LanguageCode>,
}

pub fn parse_manifest(bytes: &[u8]) -> Result<Manifest, ParseError> {
    Ok(serde_json::from_slice(bytes)?)
}
