//! Centroid-split triangle subdivision.
//!
//! Each split replaces every triangle with three triangles that meet at its
//! centroid:
//!
//! - Vertex count goes from `V` to `V + F`; original vertices keep their
//!   indices and positions
//! - Triangle count goes from `F` to `3F`; the children of triangle `t` sit
//!   at `3t`, `3t + 1`, `3t + 2`
//! - Winding is preserved, so a closed, consistently oriented mesh stays so
//!
//! Requests at or past [`SubdivideParams::max_depth`] (default
//! [`DEFAULT_MAX_DEPTH`]) are no-ops reported as
//! [`SubdivisionOutcome::AtMaxDepth`], not errors.
//!
//! # Examples
//!
//! ```
//! use mesh_types::MeshBuffer;
//! use mesh_subdivide::subdivide_once;
//!
//! let mesh = MeshBuffer::new(
//!     vec![0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 3.0, 0.0],
//!     vec![0, 1, 2],
//! )?;
//!
//! let split = subdivide_once(&mesh)?;
//! assert_eq!(split.vertex_count(), 4);
//! assert_eq!(split.indices(), &[0, 1, 3, 1, 2, 3, 2, 0, 3]);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```
//!
//! Tracking depth across requests:
//!
//! ```
//! use mesh_types::{generate_polyhedron, Polyhedron};
//! use mesh_subdivide::{SubdivideParams, SubdivisionOutcome, SubdivisionState};
//!
//! let params = SubdivideParams::default();
//! let mut state = SubdivisionState::new(generate_polyhedron(Polyhedron::Tetrahedron, 4.0));
//!
//! for _ in 0..6 {
//!     assert_eq!(state.subdivide(&params)?, SubdivisionOutcome::Applied);
//! }
//! assert_eq!(state.mesh().triangle_count(), 2916);
//! assert_eq!(state.subdivide(&params)?, SubdivisionOutcome::AtMaxDepth);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod result;
mod state;
mod subdivide;

pub use error::{SubdivideError, SubdivideResult};
pub use params::{DEFAULT_MAX_DEPTH, SubdivideParams};
pub use result::{SubdivisionOutcome, SubdivisionResult};
pub use state::SubdivisionState;
pub use subdivide::{subdivide, subdivide_once};
