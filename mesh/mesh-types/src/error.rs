//! Error types for mesh construction and access.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised by [`MeshBuffer`](crate::MeshBuffer) construction and accessors.
///
/// The variants fall into two classes:
/// - invalid mesh: a structural invariant is violated, the buffer is rejected
/// - out of range: an accessor was called with an index past the element count
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Position buffer length is not a multiple of 3.
    #[error("invalid mesh: position buffer length {len} is not a multiple of 3")]
    PositionLength {
        /// Length of the rejected position buffer.
        len: usize,
    },

    /// Index buffer length is not a multiple of 3.
    #[error("invalid mesh: index buffer length {len} is not a multiple of 3")]
    IndexLength {
        /// Length of the rejected index buffer.
        len: usize,
    },

    /// An index references a vertex that does not exist.
    #[error("invalid mesh: index slot {slot} references vertex {index} (mesh has {vertex_count} vertices)")]
    DanglingIndex {
        /// Position of the offending value in the index buffer.
        slot: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Vertex count cannot be addressed with `u32` indices.
    #[error("invalid mesh: {count} vertices exceed the u32 index range")]
    TooManyVertices {
        /// Number of vertices requested.
        count: usize,
    },

    /// Vertex accessor called past the end of the mesh.
    #[error("vertex index {index} out of range (mesh has {count} vertices)")]
    VertexOutOfRange {
        /// Requested vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        count: usize,
    },

    /// Triangle accessor called past the end of the mesh.
    #[error("triangle index {index} out of range (mesh has {count} triangles)")]
    TriangleOutOfRange {
        /// Requested triangle index.
        index: u32,
        /// Number of triangles in the mesh.
        count: usize,
    },
}

impl MeshError {
    /// Whether this error reports a structural invariant violation.
    #[must_use]
    pub const fn is_invalid_mesh(&self) -> bool {
        matches!(
            self,
            Self::PositionLength { .. }
                | Self::IndexLength { .. }
                | Self::DanglingIndex { .. }
                | Self::TooManyVertices { .. }
        )
    }

    /// Whether this error reports accessor misuse.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::VertexOutOfRange { .. } | Self::TriangleOutOfRange { .. }
        )
    }
}
