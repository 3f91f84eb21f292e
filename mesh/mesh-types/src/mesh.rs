//! Immutable flat-buffer triangle mesh.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};

use crate::{Aabb, BoundingSphere, MeshError, MeshResult, Triangle, TriangleIndex, VertexIndex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest vertex count addressable by the `u32` index buffer.
pub const MAX_VERTICES: usize = u32::MAX as usize;

/// An immutable indexed triangle mesh stored as two flat buffers.
///
/// # Memory Layout
///
/// - `positions`: `[x0, y0, z0, x1, y1, z1, ...]`, vertex `i` at `3i..3i+3`
/// - `indices`: `[a0, b0, c0, a1, b1, c1, ...]`, triangle `t` at `3t..3t+3`
///
/// Both buffers live behind one shared allocation, so `clone()` is a
/// reference-count bump. A renderer can keep drawing an old mesh while a
/// replacement is built; the old buffers are freed once the last clone is
/// dropped.
///
/// # Invariants
///
/// Checked once by [`MeshBuffer::new`] and never broken afterwards, since
/// there are no mutating methods:
/// - both buffer lengths are multiples of 3
/// - every index is smaller than the vertex count
/// - the vertex count fits the `u32` index range
///
/// # Winding Order
///
/// Triangles use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{MeshBuffer, TriangleIndex, VertexIndex};
///
/// let mesh = MeshBuffer::new(
///     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     vec![0, 1, 2],
/// )?;
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// assert_eq!(mesh.triangle(TriangleIndex::new(0))?[2], VertexIndex::new(2));
/// assert!(mesh.vertex(VertexIndex::new(3)).is_err());
/// # Ok::<(), mesh_types::MeshError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "MeshParts", try_from = "MeshParts"))]
pub struct MeshBuffer {
    data: Arc<MeshParts>,
}

/// Unchecked position and index buffers.
///
/// This is the serialized form of [`MeshBuffer`]; converting back with
/// `MeshBuffer::try_from` runs the full validation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshParts {
    /// Flat vertex positions.
    pub positions: Vec<f64>,
    /// Flat triangle indices.
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// Build a mesh from owned position and index buffers.
    ///
    /// The buffers are moved in, not copied.
    ///
    /// # Errors
    ///
    /// Returns an invalid-mesh error if:
    /// - `positions.len()` is not a multiple of 3 ([`MeshError::PositionLength`])
    /// - `indices.len()` is not a multiple of 3 ([`MeshError::IndexLength`])
    /// - any index is `>= vertex_count` ([`MeshError::DanglingIndex`])
    /// - there are more than [`MAX_VERTICES`] vertices ([`MeshError::TooManyVertices`])
    pub fn new(positions: Vec<f64>, indices: Vec<u32>) -> MeshResult<Self> {
        check_invariants(&positions, &indices)?;
        Ok(Self::from_raw(MeshParts { positions, indices }))
    }

    /// Build a mesh by copying position and index slices.
    ///
    /// # Errors
    ///
    /// Same as [`MeshBuffer::new`].
    pub fn from_slices(positions: &[f64], indices: &[u32]) -> MeshResult<Self> {
        Self::new(positions.to_vec(), indices.to_vec())
    }

    /// A mesh with no vertices and no triangles.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_raw(MeshParts::default())
    }

    /// Wrap buffers produced by code that upholds the invariants itself.
    pub(crate) fn from_parts_unchecked(positions: Vec<f64>, indices: Vec<u32>) -> Self {
        debug_assert!(check_invariants(&positions, &indices).is_ok());
        Self::from_raw(MeshParts { positions, indices })
    }

    fn from_raw(raw: MeshParts) -> Self {
        Self {
            data: Arc::new(raw),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.data.positions.len() / 3
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.data.indices.len() / 3
    }

    /// Check if the mesh has nothing to draw (no vertices or no triangles).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.triangle_count() == 0
    }

    /// The flat position buffer.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.data.positions
    }

    /// The flat index buffer.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.data.indices
    }

    /// Position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexOutOfRange`] if `index >= vertex_count()`.
    pub fn vertex(&self, index: VertexIndex) -> MeshResult<Point3<f64>> {
        if index.as_usize() >= self.vertex_count() {
            return Err(MeshError::VertexOutOfRange {
                index: index.get(),
                count: self.vertex_count(),
            });
        }
        Ok(self.point(index.as_usize()))
    }

    /// Corner indices of a triangle, in winding order.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TriangleOutOfRange`] if `index >= triangle_count()`.
    pub fn triangle(&self, index: TriangleIndex) -> MeshResult<[VertexIndex; 3]> {
        self.corners(index)
            .map(|[a, b, c]| [VertexIndex::new(a), VertexIndex::new(b), VertexIndex::new(c)])
    }

    /// Corner positions of a triangle.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TriangleOutOfRange`] if `index >= triangle_count()`.
    pub fn triangle_positions(&self, index: TriangleIndex) -> MeshResult<Triangle> {
        self.corners(index).map(|corners| self.resolve(corners))
    }

    fn corners(&self, index: TriangleIndex) -> MeshResult<[u32; 3]> {
        let start = index.as_usize() * 3;
        match self.data.indices.get(start..start + 3) {
            Some(&[a, b, c]) => Ok([a, b, c]),
            _ => Err(MeshError::TriangleOutOfRange {
                index: index.get(),
                count: self.triangle_count(),
            }),
        }
    }

    /// Iterate over all vertex positions.
    #[must_use]
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = Point3<f64>> + Clone + '_ {
        self.data
            .positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
    }

    /// Iterate over all triangles as corner index triples.
    #[must_use]
    pub fn faces(&self) -> impl ExactSizeIterator<Item = [VertexIndex; 3]> + '_ {
        self.data
            .indices
            .chunks_exact(3)
            .map(|c| [VertexIndex::new(c[0]), VertexIndex::new(c[1]), VertexIndex::new(c[2])])
    }

    /// Iterate over all triangles with resolved corner positions.
    #[must_use]
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.data
            .indices
            .chunks_exact(3)
            .map(|c| self.resolve([c[0], c[1], c[2]]))
    }

    // Indices were validated at construction, so slicing cannot go out of bounds.
    fn point(&self, vertex: usize) -> Point3<f64> {
        let p = &self.data.positions[vertex * 3..vertex * 3 + 3];
        Point3::new(p[0], p[1], p[2])
    }

    fn resolve(&self, [a, b, c]: [u32; 3]) -> Triangle {
        Triangle::new(
            self.point(a as usize),
            self.point(b as usize),
            self.point(c as usize),
        )
    }

    /// Re-check every structural invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, with the same variants as
    /// [`MeshBuffer::new`].
    pub fn validate(&self) -> MeshResult<()> {
        check_invariants(&self.data.positions, &self.data.indices)
    }

    /// Check whether two handles share the same buffers.
    #[must_use]
    pub fn shares_buffers_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Take the buffers back out, copying only if other handles still share them.
    #[must_use]
    pub fn into_parts(self) -> MeshParts {
        Arc::unwrap_or_clone(self.data)
    }

    /// Compute the axis-aligned bounding box.
    ///
    /// Returns an empty AABB if the mesh has no vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices())
    }

    /// Compute the bounding sphere (box center, farthest-vertex radius).
    #[must_use]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::from_points(self.vertices())
    }

    /// Compute the signed volume of the mesh.
    ///
    /// Uses the divergence theorem: the signed volume is the sum of signed
    /// tetrahedra volumes formed by each triangle and the origin. Positive
    /// for a closed mesh with outward (CCW) winding, negative when inside-out,
    /// not meaningful for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;

        for tri in self.triangles() {
            let (v0, v1, v2) = (tri.v0, tri.v1, tri.v2);
            let cross = Vector3::new(
                v1.y.mul_add(v2.z, -(v1.z * v2.y)),
                v1.z.mul_add(v2.x, -(v1.x * v2.z)),
                v1.x.mul_add(v2.y, -(v1.y * v2.x)),
            );
            volume += v0.z.mul_add(cross.z, v0.x.mul_add(cross.x, v0.y * cross.y));
        }

        volume / 6.0
    }

    /// Compute the total surface area of the mesh.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }
}

impl Default for MeshBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for MeshBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.shares_buffers_with(other) || self.data == other.data
    }
}

impl From<MeshBuffer> for MeshParts {
    fn from(mesh: MeshBuffer) -> Self {
        Arc::unwrap_or_clone(mesh.data)
    }
}

impl TryFrom<MeshParts> for MeshBuffer {
    type Error = MeshError;

    fn try_from(raw: MeshParts) -> MeshResult<Self> {
        Self::new(raw.positions, raw.indices)
    }
}

fn check_invariants(positions: &[f64], indices: &[u32]) -> MeshResult<()> {
    if positions.len() % 3 != 0 {
        return Err(MeshError::PositionLength {
            len: positions.len(),
        });
    }
    if indices.len() % 3 != 0 {
        return Err(MeshError::IndexLength { len: indices.len() });
    }

    let vertex_count = positions.len() / 3;
    if vertex_count > MAX_VERTICES {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
        });
    }

    if let Some((slot, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| index as usize >= vertex_count)
    {
        return Err(MeshError::DanglingIndex {
            slot,
            index,
            vertex_count,
        });
    }

    Ok(())
}
