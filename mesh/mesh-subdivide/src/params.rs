//! Subdivision parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default depth ceiling.
///
/// From a 4-triangle tetrahedron this allows `4 * 3^6 = 2916` triangles.
pub const DEFAULT_MAX_DEPTH: u32 = 6;

/// Parameters for centroid-split subdivision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubdivideParams {
    /// Depth at which further subdivide requests become no-ops.
    pub max_depth: u32,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth ceiling.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether a mesh at `depth` may still be subdivided.
    #[must_use]
    pub const fn allows(&self, depth: u32) -> bool {
        depth < self.max_depth
    }

    /// Levels left before the ceiling, starting from `depth`.
    #[must_use]
    pub const fn remaining_levels(&self, depth: u32) -> u32 {
        self.max_depth.saturating_sub(depth)
    }

    /// Triangle count after `levels` splits. Each split triples it.
    ///
    /// Saturates at `usize::MAX`.
    #[must_use]
    pub const fn expected_triangles(current_triangles: usize, levels: u32) -> usize {
        let mut triangles = current_triangles;
        let mut i = 0;
        while i < levels {
            triangles = triangles.saturating_mul(3);
            i += 1;
        }
        triangles
    }

    /// Vertex count after `levels` splits. Each split adds one vertex per
    /// triangle present before it.
    ///
    /// Saturates at `usize::MAX`.
    #[must_use]
    pub const fn expected_vertices(vertices: usize, triangles: usize, levels: u32) -> usize {
        let mut vertices = vertices;
        let mut triangles = triangles;
        let mut i = 0;
        while i < levels {
            vertices = vertices.saturating_add(triangles);
            triangles = triangles.saturating_mul(3);
            i += 1;
        }
        vertices
    }
}
