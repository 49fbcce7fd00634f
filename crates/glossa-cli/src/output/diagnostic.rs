//! Miette diagnostic wrapper for catalog parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![expect(unused_assignments)]

use std::path::Path;

use glossa::parser::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for catalog and manifest parse errors.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(glossa::parse))]
pub struct CatalogDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl CatalogDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let (offset, message, help) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (
                byte_offset(content, *line, *column),
                format!("syntax error: {message}"),
                None,
            ),
            ParseError::InvalidShape { message } => (
                0,
                format!("invalid structure: {message}"),
                Some(
                    "catalogs are nested objects with string leaves; the manifest needs \
                     `availableLanguages`"
                        .to_string(),
                ),
            ),
        };

        CatalogDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help,
        }
    }
}

/// Convert a 1-based line:column to a byte offset, clamped to the content.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_counts_previous_lines() {
        let content = "{\n  \"a\": 1,\n  oops\n}";
        assert_eq!(byte_offset(content, 3, 3), 14);
    }

    #[test]
    fn offset_is_clamped() {
        assert_eq!(byte_offset("{}", 9, 9), 2);
    }
}
