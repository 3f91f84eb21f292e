//! Error types for mesh subdivision operations.

use mesh_types::MeshError;
use thiserror::Error;

/// Errors that can occur during subdivision.
///
/// Reaching the depth ceiling is not an error; see
/// [`SubdivisionOutcome::AtMaxDepth`](crate::SubdivisionOutcome::AtMaxDepth).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubdivideError {
    /// The input mesh failed validation.
    #[error(transparent)]
    InvalidMesh(#[from] MeshError),

    /// The split would create more vertices than `u32` indices can address.
    #[error("subdivision would need {vertices} vertices, beyond the u32 index range")]
    IndexOverflow {
        /// Vertex count the split would have produced.
        vertices: usize,
    },
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
