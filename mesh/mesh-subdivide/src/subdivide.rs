//! Centroid-split subdivision.

// Index arithmetic stays within u32 once the vertex count has been checked
#![allow(clippy::cast_possible_truncation)]

use mesh_types::{MAX_VERTICES, MeshBuffer};
use tracing::{debug, info};

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::result::{SubdivisionOutcome, SubdivisionResult};

/// Apply one subdivide request to a mesh at depth `depth_so_far`.
///
/// Below the ceiling this performs one centroid split (see
/// [`subdivide_once`]) and reports [`SubdivisionOutcome::Applied`] with
/// depth `depth_so_far + 1`. At or past `params.max_depth` the input mesh
/// comes back untouched (sharing its buffers, nothing is allocated) with
/// [`SubdivisionOutcome::AtMaxDepth`] and the depth unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - the input mesh fails validation ([`SubdivideError::InvalidMesh`])
/// - the split would exceed the `u32` index range ([`SubdivideError::IndexOverflow`])
///
/// # Examples
///
/// ```
/// use mesh_types::{generate_polyhedron, Polyhedron};
/// use mesh_subdivide::{subdivide, SubdivideParams, SubdivisionOutcome};
///
/// let tet = generate_polyhedron(Polyhedron::Tetrahedron, 1.0);
/// let params = SubdivideParams::default();
///
/// let result = subdivide(&tet, 0, &params)?;
/// assert_eq!(result.outcome, SubdivisionOutcome::Applied);
/// assert_eq!(result.depth, 1);
/// assert_eq!(result.final_vertices, 8);
/// assert_eq!(result.final_triangles, 12);
///
/// // At the ceiling nothing happens
/// let result = subdivide(&result.mesh, 6, &params)?;
/// assert_eq!(result.outcome, SubdivisionOutcome::AtMaxDepth);
/// assert_eq!(result.final_triangles, 12);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide(
    mesh: &MeshBuffer,
    depth_so_far: u32,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    let original_vertices = mesh.vertex_count();
    let original_triangles = mesh.triangle_count();

    if !params.allows(depth_so_far) {
        info!(
            depth = depth_so_far,
            max_depth = params.max_depth,
            "Max subdivision depth reached, ignoring request"
        );
        return Ok(SubdivisionResult {
            mesh: mesh.clone(),
            outcome: SubdivisionOutcome::AtMaxDepth,
            depth: depth_so_far,
            original_vertices,
            final_vertices: original_vertices,
            original_triangles,
            final_triangles: original_triangles,
        });
    }

    let subdivided = subdivide_once(mesh)?;
    let result = SubdivisionResult {
        final_vertices: subdivided.vertex_count(),
        final_triangles: subdivided.triangle_count(),
        mesh: subdivided,
        outcome: SubdivisionOutcome::Applied,
        depth: depth_so_far + 1,
        original_vertices,
        original_triangles,
    };

    debug!(
        depth = result.depth,
        ratio = result.triangle_ratio(),
        "{result}"
    );

    Ok(result)
}

/// Split every triangle of `mesh` at its centroid.
///
/// With `V` vertices and `F` triangles the result has:
/// - `V + F` vertices: the originals copied verbatim, then the centroid of
///   triangle `t` at index `V + t`
/// - `3F` triangles: triangle `t = (a, b, c)` becomes `(a, b, m)`,
///   `(b, c, m)`, `(c, a, m)` with `m = V + t`, stored at `3t..3t+3`
///
/// Each child walks one parent edge in the parent's direction and closes
/// through the centroid, so winding is preserved. Exactly one position
/// buffer and one index buffer are allocated.
///
/// # Errors
///
/// Same as [`subdivide`].
pub fn subdivide_once(mesh: &MeshBuffer) -> SubdivideResult<MeshBuffer> {
    mesh.validate()?;

    let vertex_count = mesh.vertex_count();
    let triangle_count = mesh.triangle_count();
    let new_vertex_count = vertex_count
        .checked_add(triangle_count)
        .filter(|&n| n <= MAX_VERTICES)
        .ok_or(SubdivideError::IndexOverflow {
            vertices: vertex_count.saturating_add(triangle_count),
        })?;

    let mut positions = Vec::with_capacity(new_vertex_count * 3);
    positions.extend_from_slice(mesh.positions());

    let mut indices = Vec::with_capacity(triangle_count * 9);
    let first_centroid = vertex_count as u32;

    for (t, (tri, corners)) in mesh
        .triangles()
        .zip(mesh.indices().chunks_exact(3))
        .enumerate()
    {
        let centroid = tri.centroid();
        positions.extend_from_slice(&[centroid.x, centroid.y, centroid.z]);

        let (a, b, c) = (corners[0], corners[1], corners[2]);
        let m = first_centroid + t as u32;
        indices.extend_from_slice(&[a, b, m, b, c, m, c, a, m]);
    }

    Ok(MeshBuffer::new(positions, indices)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{
        Point3, Polyhedron, TopologyReport, TriangleIndex, VertexIndex, generate_polyhedron,
    };

    fn make_triangle() -> MeshBuffer {
        MeshBuffer::new(
            vec![0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 3.0, 0.0],
            vec![0, 1, 2],
        )
        .expect("valid triangle")
    }

    fn make_tetrahedron() -> MeshBuffer {
        generate_polyhedron(Polyhedron::Tetrahedron, 4.0)
    }

    #[test]
    fn test_subdivide_single_triangle() {
        let mesh = subdivide_once(&make_triangle()).expect("subdivision failed");

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 3, 1, 2, 3, 2, 0, 3]);
        assert_eq!(
            mesh.vertex(VertexIndex::new(3)).unwrap(),
            Point3::new(1.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_children_follow_parent_order() {
        let mesh = MeshBuffer::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 1.0, 0.0, 1.5, 1.0, 0.0],
            vec![0, 1, 2, 1, 3, 2],
        )
        .unwrap();
        let out = subdivide_once(&mesh).unwrap();

        // Centroid of the second triangle lands at V + 1
        let second: Vec<_> = (3..6)
            .map(|k| out.triangle(TriangleIndex::new(k)).unwrap())
            .collect();
        let m = VertexIndex::new(5);
        assert_eq!(second[0], [VertexIndex::new(1), VertexIndex::new(3), m]);
        assert_eq!(second[1], [VertexIndex::new(3), VertexIndex::new(2), m]);
        assert_eq!(second[2], [VertexIndex::new(2), VertexIndex::new(1), m]);
    }

    #[test]
    fn test_original_vertices_preserved_bitwise() {
        let mesh = generate_polyhedron(Polyhedron::Sphere, 4.0);
        let out = subdivide_once(&mesh).unwrap();
        let n = mesh.positions().len();
        for (a, b) in mesh.positions().iter().zip(&out.positions()[..n]) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_centroids_appended_in_triangle_order() {
        let mesh = generate_polyhedron(Polyhedron::Icosahedron, 2.5);
        let out = subdivide_once(&mesh).unwrap();
        let v = mesh.vertex_count() as u32;

        for (t, tri) in mesh.triangles().enumerate() {
            let expected = Point3::new(
                (tri.v0.x + tri.v1.x + tri.v2.x) / 3.0,
                (tri.v0.y + tri.v1.y + tri.v2.y) / 3.0,
                (tri.v0.z + tri.v1.z + tri.v2.z) / 3.0,
            );
            let got = out.vertex(VertexIndex::new(v + t as u32)).unwrap();
            assert!((got - expected).norm() < 1e-12);
        }
    }

    #[test]
    fn test_children_keep_parent_orientation() {
        let mesh = generate_polyhedron(Polyhedron::Dodecahedron, 1.0);
        let out = subdivide_once(&mesh).unwrap();
        let children: Vec<_> = out.triangles().collect();

        for (t, parent) in mesh.triangles().enumerate() {
            let parent_normal = parent.normal_unnormalized();
            for child in &children[t * 3..t * 3 + 3] {
                assert!(child.faces_along(&parent_normal));
            }
        }
    }

    #[test]
    fn test_closed_mesh_stays_closed() {
        let mut mesh = generate_polyhedron(Polyhedron::Cube, 4.0);
        for _ in 0..3 {
            mesh = subdivide_once(&mesh).unwrap();
        }
        let report = TopologyReport::analyze(&mesh);
        assert!(report.is_closed());
        assert!(report.is_manifold());
        assert!(report.is_consistently_wound());
        assert_eq!(report.euler_characteristic(), 2);
        assert!((mesh.signed_volume() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_subdivide_empty_mesh() {
        let out = subdivide_once(&MeshBuffer::empty()).unwrap();
        assert_eq!(out.vertex_count(), 0);
        assert_eq!(out.triangle_count(), 0);
    }

    #[test]
    fn test_subdivide_vertices_without_faces() {
        let mesh = MeshBuffer::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![]).unwrap();
        let result = subdivide(&mesh, 0, &SubdivideParams::default()).unwrap();
        assert_eq!(result.outcome, SubdivisionOutcome::Applied);
        assert_eq!(result.final_vertices, 2);
        assert_eq!(result.final_triangles, 0);
        assert_eq!(result.mesh.positions(), mesh.positions());
    }

    #[test]
    fn test_tetrahedron_growth() {
        let params = SubdivideParams::default();
        let first = subdivide(&make_tetrahedron(), 0, &params).unwrap();
        assert_eq!((first.final_vertices, first.final_triangles), (8, 12));
        assert_eq!(first.triangle_ratio(), 3.0);

        let second = subdivide(&first.mesh, first.depth, &params).unwrap();
        assert_eq!((second.final_vertices, second.final_triangles), (20, 36));
        assert_eq!(second.depth, 2);
    }

    #[test]
    fn test_tetrahedron_to_ceiling() {
        let params = SubdivideParams::default();
        let mut mesh = make_tetrahedron();
        let mut depth = 0;
        loop {
            let result = subdivide(&mesh, depth, &params).unwrap();
            if result.outcome == SubdivisionOutcome::AtMaxDepth {
                break;
            }
            mesh = result.mesh;
            depth = result.depth;
        }
        assert_eq!(depth, 6);
        assert_eq!(mesh.triangle_count(), 2916);
        assert_eq!(
            mesh.vertex_count(),
            SubdivideParams::expected_vertices(4, 4, 6)
        );
    }

    #[test]
    fn test_at_max_depth_is_noop() {
        let mesh = make_tetrahedron();
        let params = SubdivideParams::new().with_max_depth(3);
        let result = subdivide(&mesh, 3, &params).unwrap();

        assert_eq!(result.outcome, SubdivisionOutcome::AtMaxDepth);
        assert_eq!(result.depth, 3);
        assert_eq!(result.final_vertices, mesh.vertex_count());
        assert_eq!(result.final_triangles, mesh.triangle_count());
        assert!(result.mesh.shares_buffers_with(&mesh));
        assert!(!result.was_subdivided());
    }

    #[test]
    fn test_zero_ceiling_never_subdivides() {
        let params = SubdivideParams::new().with_max_depth(0);
        let result = subdivide(&make_triangle(), 0, &params).unwrap();
        assert_eq!(result.outcome, SubdivisionOutcome::AtMaxDepth);
    }

    #[test]
    fn test_input_is_not_modified() {
        let mesh = make_triangle();
        let before = mesh.clone().into_parts();
        let _ = subdivide_once(&mesh).unwrap();
        assert_eq!(mesh.positions(), before.positions.as_slice());
        assert_eq!(mesh.indices(), before.indices.as_slice());
    }
}
