//! Placeholder scanning using winnow.
//!
//! A template is literal text interleaved with `{name}` placeholders, where
//! `name` is one or more ASCII alphanumerics or underscores. Any other brace
//! usage is literal text, so scanning never fails.

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::types::Params;

/// A scanned leaf text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Literal(String),
    /// A `{name}` placeholder, stored without braces.
    Placeholder(String),
}

impl Template {
    /// Substitute placeholders in a single pass.
    ///
    /// Placeholders without a matching entry in `params` are emitted verbatim,
    /// braces included. Substituted values are not scanned again.
    pub fn render(&self, params: &Params) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

/// Scan leaf text for `{name}` placeholders.
pub fn parse_template(input: &str) -> Template {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => t,
        _ => Template {
            segments: vec![Segment::Literal(input.to_owned())],
        },
    }
}

fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }
    result
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((placeholder, literal_char)).parse_next(input)
}

fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited('{', name, '}')
        .map(|name: &str| Segment::Placeholder(name.to_owned()))
        .parse_next(input)
}

fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_only() {
        let t = parse_template("Hello, world!");
        assert_eq!(t.segments, vec![Segment::Literal("Hello, world!".into())]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_template("").segments, vec![]);
    }

    #[test]
    fn placeholders_between_literals() {
        let t = parse_template("UID {uid} written to {tag}.");
        assert_eq!(
            t.segments,
            vec![
                Segment::Literal("UID ".into()),
                Segment::Placeholder("uid".into()),
                Segment::Literal(" written to ".into()),
                Segment::Placeholder("tag".into()),
                Segment::Literal(".".into()),
            ]
        );
    }

    #[test]
    fn malformed_braces_stay_literal() {
        let t = parse_template("{} {a-b} {open");
        assert_eq!(t.segments, vec![Segment::Literal("{} {a-b} {open".into())]);
    }
}
