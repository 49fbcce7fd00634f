//! Key path lookup and placeholder substitution.

use std::collections::BTreeMap;

use strsim::levenshtein;
use tracing::warn;

use crate::error::ResolveError;
use crate::parser::parse_template;
use crate::types::{Catalog, Node, Params};

/// Default separator between key path segments.
pub const KEY_SEPARATOR: char = '.';

/// Maximum edit distance for a sibling key to be suggested.
const MAX_SUGGESTION_DISTANCE: usize = 2;
const MAX_SUGGESTIONS: usize = 3;

/// Walk `catalog` along `key` and return the leaf text.
///
/// # Errors
///
/// - [`ResolveError::KeyNotFound`] if a segment is absent, or the walk hits a
///   leaf before the path is exhausted.
/// - [`ResolveError::ValueNotString`] if the path ends on a subtree.
pub fn lookup<'c>(
    catalog: &'c Catalog,
    key: &str,
    separator: char,
) -> Result<&'c str, ResolveError> {
    let mut children = catalog.root();
    let mut segments = key.split(separator).peekable();

    while let Some(segment) = segments.next() {
        let Some(node) = children.get(segment) else {
            return Err(ResolveError::KeyNotFound {
                key: key.to_owned(),
                suggestions: compute_suggestions(segment, children),
            });
        };

        if segments.peek().is_none() {
            return node.as_text().ok_or_else(|| ResolveError::ValueNotString {
                key: key.to_owned(),
            });
        }

        match node {
            Node::SubTree(nested) => children = nested,
            Node::StringLeaf(_) => {
                return Err(ResolveError::KeyNotFound {
                    key: key.to_owned(),
                    suggestions: Vec::new(),
                });
            }
        }
    }

    Err(ResolveError::KeyNotFound {
        key: key.to_owned(),
        suggestions: Vec::new(),
    })
}

/// Resolve `key` against `catalog` and substitute `params`.
///
/// Never fails: an unresolvable key is logged and returned unchanged, so
/// missing translations show up as their raw key path. When `params` is
/// empty the leaf text is returned as-is without scanning.
///
/// ```
/// use glossa::{Catalog, params};
/// use glossa::engine::resolver::resolve;
///
/// let catalog = Catalog::from_json_str(r#"{"specs": {"value": "v={x}"}}"#).unwrap();
/// assert_eq!(resolve(Some(&catalog), "specs.value", &params! { "x" => "5" }, '.'), "v=5");
/// assert_eq!(resolve(Some(&catalog), "specs.value", &params! {}, '.'), "v={x}");
/// assert_eq!(resolve(Some(&catalog), "specs.nope", &params! {}, '.'), "specs.nope");
/// ```
pub fn resolve(catalog: Option<&Catalog>, key: &str, params: &Params, separator: char) -> String {
    let Some(catalog) = catalog else {
        warn!(key, "Translation key not found: no catalog loaded");
        return key.to_owned();
    };

    match lookup(catalog, key, separator) {
        Ok(text) if params.is_empty() => text.to_owned(),
        Ok(text) => parse_template(text).render(params),
        Err(e) => {
            warn!("{e}");
            key.to_owned()
        }
    }
}

/// Sibling keys within a small edit distance of `segment`, closest first.
fn compute_suggestions(segment: &str, siblings: &BTreeMap<String, Node>) -> Vec<String> {
    let mut scored: Vec<(usize, &String)> = siblings
        .keys()
        .map(|candidate| (levenshtein(segment, candidate), candidate))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
