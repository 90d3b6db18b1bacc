//! # Mesh Errors
//!
//! Error types for mesh construction and queries.

use thiserror::Error;

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building or querying a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references vertex {vertex} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// Offending triangle index.
        triangle: usize,
        /// Offending vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Degenerate geometry (zero size, zero area).
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Description of the degenerate input.
        message: String,
    },

    /// A flat vertex or index buffer has the wrong length.
    #[error("Malformed buffer: {message}")]
    MalformedBuffer {
        /// Description of the malformed buffer.
        message: String,
    },
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a malformed buffer error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBuffer {
            message: message.into(),
        }
    }
}
