//! Core types for glossa catalogs.

mod catalog;
mod language;

pub use catalog::{Catalog, Node};
pub use language::{LanguageCode, LanguageInfo, display_name};

use std::collections::HashMap;

/// Named substitution values for `{name}` placeholders.
pub type Params = HashMap<String, String>;
