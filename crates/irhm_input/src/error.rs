//! Errors produced while reading sample input.

use std::path::PathBuf;

/// Errors that abort loading of one input.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Path (or pseudo-name such as `<stdin>`) of the input.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line did not have exactly five fields.
    #[error("{source_name}:{line}: expected 5 fields, found {found}: '{content}'")]
    TokenCount {
        /// Name of the input.
        source_name: String,
        /// 1-based line number.
        line: usize,
        /// Number of fields found.
        found: usize,
        /// The line as read.
        content: String,
    },

    /// The value or a coordinate is not a number.
    #[error("{source_name}:{line}: invalid {field} '{token}': '{content}'")]
    InvalidNumber {
        /// Name of the input.
        source_name: String,
        /// 1-based line number.
        line: usize,
        /// Which field failed (`value`, `x` or `y`).
        field: &'static str,
        /// The offending token.
        token: String,
        /// The line as read.
        content: String,
    },
}

impl ParseError {
    /// Returns the 1-based line number for syntax errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Io { .. } => None,
            ParseError::TokenCount { line, .. } | ParseError::InvalidNumber { line, .. } => {
                Some(*line)
            }
        }
    }
}
