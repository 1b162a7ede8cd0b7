//! Error types for OBJ operations.

use meshwork_geom::GeometryError;
use thiserror::Error;

/// Errors that can occur while reading OBJ text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjError {
    /// A `v` or `f` line could not be interpreted.
    #[error("malformed line {line}: {reason}: `{content}`")]
    MalformedLine {
        /// Line number (1-indexed).
        line: usize,
        /// The raw line, without its terminator.
        content: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Input bytes are not UTF-8.
    #[error("OBJ data is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Parsed data failed mesh validation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ObjError {
    /// Create a malformed line error.
    pub fn malformed(line: usize, content: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for OBJ operations.
pub type Result<T> = std::result::Result<T, ObjError>;
