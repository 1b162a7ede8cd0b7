//! Unified error type for the meshwork facade.

use meshwork_geom::GeometryError;
use meshwork_obj::ObjError;
use meshwork_primitives::PrimitiveError;
use thiserror::Error;

use crate::operation::MeshOperation;

/// Errors returned by meshwork operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Primitive generation failed.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// OBJ text could not be read.
    #[error(transparent)]
    Obj(#[from] ObjError),

    /// A mesh failed structural validation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The file type is unknown or has no importer (STL, PLY).
    #[error("unsupported file format: {0}")]
    UnsupportedFileFormat(String),

    /// The operation name is not recognized.
    #[error("unknown mesh operation: {0}")]
    UnknownOperation(String),

    /// The operation is recognized but has no implementation.
    #[error("mesh operation `{0}` is not available")]
    OperationUnavailable(MeshOperation),

    /// Stored mesh data is not valid base64.
    #[error("invalid base64 mesh data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A record could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration file could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`MeshError`], for mapping to client responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown primitive type name.
    UnsupportedPrimitiveType,
    /// A generation parameter is out of range or mistyped.
    InvalidParameter,
    /// An OBJ line could not be interpreted.
    MalformedLine,
    /// The file format has no importer.
    UnsupportedFileFormat,
    /// The mesh operation is unknown or unavailable.
    UnsupportedOperation,
    /// Input data is not decodable (encoding, JSON, structure).
    InvalidData,
    /// Anything else; not caused by request content.
    Other,
}

impl MeshError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Primitive(PrimitiveError::UnsupportedPrimitiveType(_)) => {
                ErrorKind::UnsupportedPrimitiveType
            }
            Self::Primitive(PrimitiveError::InvalidParameter { .. }) => ErrorKind::InvalidParameter,
            Self::Primitive(PrimitiveError::Geometry(_)) => ErrorKind::Other,
            Self::Obj(ObjError::MalformedLine { .. }) => ErrorKind::MalformedLine,
            Self::Obj(_) | Self::Geometry(_) | Self::Base64(_) | Self::Json(_) => {
                ErrorKind::InvalidData
            }
            Self::UnsupportedFileFormat(_) => ErrorKind::UnsupportedFileFormat,
            Self::UnknownOperation(_) | Self::OperationUnavailable(_) => {
                ErrorKind::UnsupportedOperation
            }
            Self::Config(_) | Self::Io(_) => ErrorKind::Other,
        }
    }

    /// True if the error was caused by the caller's input rather than the environment.
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Other
    }
}

/// Result type for meshwork operations.
pub type Result<T> = std::result::Result<T, MeshError>;
