//! Translation catalog discovery, loading, and key resolution.
//!
//! The entry point is [`Localizer`]: it discovers which language catalogs a
//! [`source::CatalogSource`] actually serves, loads them on demand, resolves
//! dotted key paths, substitutes `{name}` placeholders, and falls back to a
//! default language when a catalog or key is missing.

pub mod engine;
mod error;
pub mod localizer;
pub mod parser;
pub mod preference;
pub mod source;
pub mod types;

pub use error::{LoadError, ResolveError};
pub use localizer::{LanguageChanged, Localizer, SessionState};
pub use types::{Catalog, LanguageCode, LanguageInfo, Node, Params, display_name};

/// Creates a [`Params`] map from `name => value` pairs.
///
/// Values are converted with `to_string()`, so anything implementing
/// `Display` can be passed directly.
///
/// # Example
///
/// ```
/// use glossa::params;
///
/// let p = params! { "uid" => "04:A2:19", "count" => 3 };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"], "3");
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        $crate::Params::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Params::new();
            $(
                map.insert($key.to_string(), $value.to_string());
            )+
            map
        }
    };
}
