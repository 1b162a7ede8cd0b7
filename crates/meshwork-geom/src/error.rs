//! Error types for mesh construction.

use thiserror::Error;

/// Errors raised when a face or mesh violates its structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A face has fewer than three distinct vertex indices.
    #[error("degenerate face: {distinct} distinct indices in {indices:?}")]
    DegenerateFace {
        /// The offending indices.
        indices: Vec<u32>,
        /// Number of distinct indices found.
        distinct: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Position of the face in the face list.
        face: usize,
        /// The out-of-range index (0-based).
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Position of the vertex in the vertex list.
        index: usize,
    },
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
