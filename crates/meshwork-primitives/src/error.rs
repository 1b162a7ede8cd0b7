//! Error types for primitive generation.

use meshwork_geom::GeometryError;
use thiserror::Error;

/// Errors that can occur while generating a primitive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    /// The primitive type name is not one of `cube`, `sphere`, `cylinder`, `plane`.
    #[error("unsupported primitive type: {0}")]
    UnsupportedPrimitiveType(String),

    /// A parameter is out of range or has the wrong type.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    /// A generator produced geometry that failed validation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl PrimitiveError {
    /// Create an invalid parameter error.
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type for primitive generation.
pub type Result<T> = std::result::Result<T, PrimitiveError>;
