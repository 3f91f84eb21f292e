//! Edge topology report.
//!
//! Detects open boundaries, non-manifold edges and winding flips. Nothing
//! here repairs a mesh.

use hashbrown::HashMap;

use crate::MeshBuffer;

/// Edge statistics for a triangle mesh.
///
/// # Example
///
/// ```
/// use mesh_types::{generate_polyhedron, Polyhedron, TopologyReport};
///
/// let cube = generate_polyhedron(Polyhedron::Cube, 1.0);
/// let report = TopologyReport::analyze(&cube);
///
/// assert_eq!(report.edge_count, 18);
/// assert!(report.is_closed());
/// assert!(report.is_consistently_wound());
/// assert_eq!(report.euler_characteristic(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopologyReport {
    /// Number of vertices, including unreferenced ones.
    pub vertex_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
    /// Number of distinct undirected edges.
    pub edge_count: usize,
    /// Edges used by exactly one triangle.
    pub boundary_edge_count: usize,
    /// Edges used by more than two triangles.
    pub non_manifold_edge_count: usize,
    /// Interior edges whose two triangles traverse them in the same direction.
    pub inconsistent_edge_count: usize,
}

impl TopologyReport {
    /// Walk every triangle edge of `mesh` and tally how edges are shared.
    #[must_use]
    pub fn analyze(mesh: &MeshBuffer) -> Self {
        // (low, high) -> (uses as low->high, uses as high->low)
        let mut edges: HashMap<(u32, u32), (u32, u32)> =
            HashMap::with_capacity(mesh.triangle_count() * 3 / 2);

        for tri in mesh.indices().chunks_exact(3) {
            for (from, to) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let entry = edges.entry((from.min(to), from.max(to))).or_default();
                if from < to {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
        }

        let mut report = Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            edge_count: edges.len(),
            ..Self::default()
        };

        for &(forward, backward) in edges.values() {
            match forward + backward {
                1 => report.boundary_edge_count += 1,
                2 if forward != 1 => report.inconsistent_edge_count += 1,
                2 => {}
                _ => report.non_manifold_edge_count += 1,
            }
        }

        report
    }

    /// No boundary edges.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.boundary_edge_count == 0
    }

    /// No edge shared by more than two triangles.
    #[must_use]
    pub const fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    /// Every interior edge is walked once in each direction.
    #[must_use]
    pub const fn is_consistently_wound(&self) -> bool {
        self.inconsistent_edge_count == 0
    }

    /// `V - E + F`, 2 for a closed genus-0 surface.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn euler_characteristic(&self) -> i64 {
        self.vertex_count as i64 - self.edge_count as i64 + self.triangle_count as i64
    }
}

impl std::fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles, {} edges ({} boundary, {} non-manifold, {} flipped)",
            self.vertex_count,
            self.triangle_count,
            self.edge_count,
            self.boundary_edge_count,
            self.non_manifold_edge_count,
            self.inconsistent_edge_count
        )
    }
}
