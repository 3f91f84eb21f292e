//! Display-side data derived from a mesh: bounds and per-vertex normals.
//!
//! None of this is cached on [`MeshBuffer`]. Anything that replaces a mesh
//! (subdivision, switching the base shape) must recompute it against the
//! new buffers, because appended vertices and re-fanned triangles change
//! every vertex's neighborhood.

use nalgebra::Vector3;

use crate::{Aabb, BoundingSphere, MeshBuffer};

/// Compute per-vertex normals from the incident triangles.
///
/// Each triangle contributes its unnormalized normal (length = twice its
/// area) to its three corners, and the sums are normalized. Vertices with
/// no incident area get the zero vector.
///
/// # Example
///
/// ```
/// use mesh_types::{vertex_normals, MeshBuffer};
///
/// let mesh = MeshBuffer::new(
///     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0],
///     vec![0, 1, 2],
/// )?;
///
/// let normals = vertex_normals(&mesh);
/// assert!((normals[0].z - 1.0).abs() < 1e-12);
/// assert_eq!(normals[3].norm(), 0.0); // unreferenced vertex
/// # Ok::<(), mesh_types::MeshError>(())
/// ```
#[must_use]
pub fn vertex_normals(mesh: &MeshBuffer) -> Vec<Vector3<f64>> {
    let mut normals = vec![Vector3::zeros(); mesh.vertex_count()];

    for (tri, face) in mesh.triangles().zip(mesh.faces()) {
        let weighted = tri.normal_unnormalized();
        for vi in face {
            normals[vi.as_usize()] += weighted;
        }
    }

    for normal in &mut normals {
        let len = normal.norm();
        if len > f64::EPSILON {
            *normal /= len;
        } else {
            *normal = Vector3::zeros();
        }
    }

    normals
}

/// Bounds and normals a renderer needs for one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedGeometry {
    /// Axis-aligned bounding box.
    pub bounds: Aabb,
    /// Bounding sphere used for culling and camera framing.
    pub bounding_sphere: BoundingSphere,
    /// One unit normal per vertex, zero for isolated vertices.
    pub normals: Vec<Vector3<f64>>,
}

impl DerivedGeometry {
    /// Recompute everything for `mesh`.
    #[must_use]
    pub fn compute(mesh: &MeshBuffer) -> Self {
        Self {
            bounds: mesh.bounds(),
            bounding_sphere: mesh.bounding_sphere(),
            normals: vertex_normals(mesh),
        }
    }

    /// Check whether this data was computed for a mesh of `mesh`'s size.
    #[must_use]
    pub fn matches(&self, mesh: &MeshBuffer) -> bool {
        self.normals.len() == mesh.vertex_count()
    }
}
