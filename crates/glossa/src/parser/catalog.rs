//! Decoding of catalog resource bodies into [`Catalog`] trees.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::parser::error::ParseError;
use crate::types::{Catalog, Node};

/// Decode a catalog body: a nested JSON object whose leaves are strings.
///
/// Non-string scalars and arrays are not translatable text. They are
/// dropped with a warning, so a later lookup reports the key as missing.
pub fn parse_catalog(bytes: &[u8]) -> Result<Catalog, ParseError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Object(root) = value else {
        return Err(ParseError::InvalidShape {
            message: format!("catalog root must be an object, found {}", kind(&value)),
        });
    };
    Ok(Catalog::new(convert_object(root, "")))
}

fn convert_object(object: Map<String, Value>, path: &str) -> BTreeMap<String, Node> {
    let mut children = BTreeMap::new();
    for (segment, value) in object {
        let child_path = if path.is_empty() {
            segment.clone()
        } else {
            format!("{path}.{segment}")
        };
        match value {
            Value::String(text) => {
                children.insert(segment, Node::StringLeaf(text));
            }
            Value::Object(nested) => {
                let subtree = convert_object(nested, &child_path);
                children.insert(segment, Node::SubTree(subtree));
            }
            other => {
                warn!(key = %child_path, kind = kind(&other), "Dropping non-string catalog value");
            }
        }
    }
    children
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Catalog {
    /// Decode a catalog from a JSON string.
    pub fn from_json_str(source: &str) -> Result<Self, ParseError> {
        parse_catalog(source.as_bytes())
    }
}
