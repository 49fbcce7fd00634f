//! Parse error types for catalog resources.

use thiserror::Error;

/// An error that occurred while decoding a resource.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The resource is not well-formed JSON.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed JSON that does not have the expected structure.
    #[error("invalid structure: {message}")]
    InvalidShape { message: String },
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            ParseError::InvalidShape {
                message: err.to_string(),
            }
        } else {
            ParseError::Syntax {
                line: err.line(),
                column: err.column(),
                message: err.to_string(),
            }
        }
    }
}
