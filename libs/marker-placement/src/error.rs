//! # Error Types
//!
//! Error types for placement operations.
//!
//! ## Error Policy
//!
//! - Degenerate inputs are rejected at the boundary with an explicit error
//! - Out-of-range squares are not errors; the planner filters them
//! - All computations are deterministic, so no error is retryable

use config::embed::ConfigError;
use marker_mesh::MeshError;
use thiserror::Error;

/// Result type alias for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;

/// Errors that can occur during placement.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// Zero-area cluster, zero-size patch or empty face selection.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A face index outside the mesh.
    #[error("Face {face} does not exist (mesh has {face_count} faces)")]
    InvalidFace {
        /// Requested face index.
        face: usize,
        /// Number of faces in the mesh.
        face_count: usize,
    },

    /// The request record failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The input mesh was rejected.
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

impl PlacementError {
    /// Creates a degenerate input error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput(message.into())
    }
}
