//! Core mesh types for centroid-split subdivision.
//!
//! This crate provides the mesh model every other crate works on:
//!
//! - [`MeshBuffer`] - An immutable triangle mesh over flat position/index buffers
//! - [`VertexIndex`] / [`TriangleIndex`] - Typed element indices
//! - [`Triangle`] - A concrete triangle with corner positions
//! - [`Aabb`] / [`BoundingSphere`] - Bounding volumes
//! - [`DerivedGeometry`] - Bounds and vertex normals a renderer needs
//! - [`TopologyReport`] - Edge sharing and winding diagnostics
//! - [`generate_polyhedron`] - Base shapes (tetrahedron, cube, sphere, ...)
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{MeshBuffer, MeshError};
//!
//! let mesh = MeshBuffer::new(
//!     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 1.0, 0.0],
//!     vec![0, 1, 2],
//! )?;
//! assert_eq!(mesh.triangle_count(), 1);
//!
//! // Index 3 does not exist
//! let err = MeshBuffer::new(vec![0.0; 9], vec![0, 1, 3]).unwrap_err();
//! assert!(err.is_invalid_mesh());
//! # Ok::<(), MeshError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod derived;
mod error;
mod index;
mod mesh;
mod primitives;
mod topology;
mod triangle;

pub use bounds::{Aabb, BoundingSphere};
pub use derived::{DerivedGeometry, vertex_normals};
pub use error::{MeshError, MeshResult};
pub use index::{TriangleIndex, VertexIndex};
pub use mesh::{MAX_VERTICES, MeshBuffer, MeshParts};
pub use primitives::{
    DEFAULT_RADIUS, Polyhedron, SPHERE_HEIGHT_SEGMENTS, SPHERE_WIDTH_SEGMENTS, UnknownPolyhedron,
    generate_polyhedron,
};
pub use topology::TopologyReport;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
