use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// An opaque language identifier such as `"en"` or `"hu"`.
///
/// Codes compare by exact string equality; no case folding or BCP 47
/// canonicalization is performed.
///
/// # Example
///
/// ```
/// use glossa::LanguageCode;
///
/// let hu = LanguageCode::from("hu");
/// assert_eq!(hu.as_str(), "hu");
/// assert_ne!(hu, LanguageCode::from("HU"));
/// ```
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Create a code from any string, verbatim.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name for this code.
    pub fn display_name(&self) -> String {
        display_name(self.as_str())
    }
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A language entry as presented to a language picker.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LanguageInfo {
    pub code: LanguageCode,
    pub display_name: String,
}

impl LanguageInfo {
    pub fn new(code: LanguageCode) -> Self {
        let display_name = code.display_name();
        Self { code, display_name }
    }
}

/// Endonyms for the languages the probe set covers.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("hu", "Magyar"),
    ("en", "English"),
    ("de", "Deutsch"),
    ("fr", "Français"),
    ("es", "Español"),
    ("it", "Italiano"),
    ("pl", "Polski"),
    ("ro", "Română"),
    ("cs", "Čeština"),
    ("sk", "Slovenčina"),
];

/// Returns the display name for a language code.
///
/// Codes missing from the built-in table fall back to the uppercased code.
///
/// ```
/// assert_eq!(glossa::display_name("de"), "Deutsch");
/// assert_eq!(glossa::display_name("ja"), "JA");
/// ```
pub fn display_name(code: &str) -> String {
    DISPLAY_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| (*name).to_owned())
        .unwrap_or_else(|| code.to_uppercase())
}
