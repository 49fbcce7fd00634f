//! Integration tests for catalog decoding and key listing.

use glossa::parser::{ParseError, parse_catalog};
use glossa::{Catalog, Node};

#[test]
fn key_paths_are_sorted_and_complete() {
    let catalog = Catalog::from_json_str(
        r#"{
            "write": {"title": "Write tag", "read": {"button": "Read", "reading": "Reading..."}},
            "tabs": {"write": "Write", "read": "Read"},
            "errors": {"readError": "Error"}
        }"#,
    )
    .unwrap();

    insta::assert_snapshot!(
        catalog.key_paths('.').join(", "),
        @"errors.readError, tabs.read, tabs.write, write.read.button, write.read.reading, write.title"
    );
    assert_eq!(catalog.leaf_count(), 6);
}

#[test]
fn empty_object_is_an_empty_catalog() {
    let catalog = parse_catalog(b"{}").unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.leaf_count(), 0);
}

#[test]
fn leaf_text_is_kept_verbatim() {
    let catalog = Catalog::from_json_str(r#"{"msg": "UID: {uid} é"}"#).unwrap();
    assert_eq!(
        catalog.root().get("msg"),
        Some(&Node::StringLeaf("UID: {uid} é".into()))
    );
}

#[test]
fn string_root_is_rejected() {
    let err = parse_catalog(br#""just text""#).unwrap_err();
    assert!(matches!(err, ParseError::InvalidShape { .. }));
}

#[test]
fn truncated_input_is_syntax_error() {
    let err = parse_catalog(br#"{"a": "#).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}
