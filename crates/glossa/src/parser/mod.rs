//! Decoders for catalog resources, the language manifest, and
//! `{name}` placeholder templates.

mod catalog;
pub mod error;
mod manifest;
mod template;

pub use catalog::parse_catalog;
pub use error::ParseError;
pub use manifest::{Manifest, parse_manifest};
pub use template::{Segment, Template, parse_template};
