//! Result types for subdivision operations.

// Triangle counts don't overflow f64 precision in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::MeshBuffer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a subdivide request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubdivisionOutcome {
    /// A new, larger mesh was produced; depth advanced by one.
    Applied,
    /// The depth ceiling was already reached; the mesh is unchanged.
    AtMaxDepth,
}

impl SubdivisionOutcome {
    /// Whether bounds and normals must be recomputed for the returned mesh.
    #[must_use]
    pub const fn requires_rederive(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of one subdivide request.
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The mesh to display next. Shares buffers with the input on `AtMaxDepth`.
    pub mesh: MeshBuffer,

    /// Whether a split happened.
    pub outcome: SubdivisionOutcome,

    /// Depth of `mesh`.
    pub depth: u32,

    /// Number of vertices in the input mesh.
    pub original_vertices: usize,

    /// Number of vertices in `mesh`.
    pub final_vertices: usize,

    /// Number of triangles in the input mesh.
    pub original_triangles: usize,

    /// Number of triangles in `mesh`.
    pub final_triangles: usize,
}

impl SubdivisionResult {
    /// Get the triangle multiplication factor.
    #[must_use]
    pub fn triangle_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Check if a split occurred.
    #[must_use]
    pub const fn was_subdivided(&self) -> bool {
        matches!(self.outcome, SubdivisionOutcome::Applied)
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            SubdivisionOutcome::Applied => write!(
                f,
                "Subdivision to depth {}: {} → {} triangles ({:.1}x), {} → {} vertices",
                self.depth,
                self.original_triangles,
                self.final_triangles,
                self.triangle_ratio(),
                self.original_vertices,
                self.final_vertices
            ),
            SubdivisionOutcome::AtMaxDepth => write!(
                f,
                "Subdivision skipped at max depth {}: {} triangles, {} vertices",
                self.depth, self.final_triangles, self.final_vertices
            ),
        }
    }
}
