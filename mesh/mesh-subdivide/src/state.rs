//! A mesh paired with the number of splits that produced it.

use mesh_types::MeshBuffer;

use crate::error::SubdivideResult;
use crate::params::SubdivideParams;
use crate::result::SubdivisionOutcome;
use crate::subdivide::subdivide;

/// The current mesh of a subdivision session and its depth.
///
/// Depth starts at 0 for a freshly generated base shape and goes up by one
/// on every applied split. A failed request leaves both untouched.
#[derive(Debug, Clone, Default)]
pub struct SubdivisionState {
    mesh: MeshBuffer,
    depth: u32,
}

impl SubdivisionState {
    /// Start a session at depth 0.
    #[must_use]
    pub const fn new(mesh: MeshBuffer) -> Self {
        Self { mesh, depth: 0 }
    }

    /// The current mesh.
    #[must_use]
    pub const fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    /// Number of splits applied since the last reset.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Handle one subdivide request.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`subdivide`]; the state is unchanged on error.
    pub fn subdivide(&mut self, params: &SubdivideParams) -> SubdivideResult<SubdivisionOutcome> {
        let result = subdivide(&self.mesh, self.depth, params)?;
        if result.outcome == SubdivisionOutcome::Applied {
            self.mesh = result.mesh;
            self.depth = result.depth;
        }
        Ok(result.outcome)
    }

    /// Replace the mesh and start again at depth 0.
    pub fn reset(&mut self, mesh: MeshBuffer) {
        self.mesh = mesh;
        self.depth = 0;
    }

    /// Take the current mesh.
    #[must_use]
    pub fn into_mesh(self) -> MeshBuffer {
        self.mesh
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_types::{Polyhedron, generate_polyhedron};

    #[test]
    fn test_depth_advances_until_ceiling() {
        let params = SubdivideParams::new().with_max_depth(2);
        let mut state = SubdivisionState::new(generate_polyhedron(Polyhedron::Tetrahedron, 1.0));

        assert_eq!(state.subdivide(&params).unwrap(), SubdivisionOutcome::Applied);
        assert_eq!(state.subdivide(&params).unwrap(), SubdivisionOutcome::Applied);
        assert_eq!(state.depth(), 2);
        assert_eq!(state.mesh().triangle_count(), 36);

        let before = state.mesh().clone();
        assert_eq!(
            state.subdivide(&params).unwrap(),
            SubdivisionOutcome::AtMaxDepth
        );
        assert_eq!(state.depth(), 2);
        assert!(state.mesh().shares_buffers_with(&before));
    }

    #[test]
    fn test_reset_returns_to_depth_zero() {
        let params = SubdivideParams::default();
        let mut state = SubdivisionState::new(generate_polyhedron(Polyhedron::Cube, 1.0));
        state.subdivide(&params).unwrap();
        assert_eq!(state.depth(), 1);

        state.reset(generate_polyhedron(Polyhedron::Icosahedron, 1.0));
        assert_eq!(state.depth(), 0);
        assert_eq!(state.mesh().triangle_count(), 20);
    }

    #[test]
    fn test_into_mesh() {
        let mesh = generate_polyhedron(Polyhedron::Tetrahedron, 1.0);
        let state = SubdivisionState::new(mesh.clone());
        assert!(state.into_mesh().shares_buffers_with(&mesh));
    }

    #[test]
    fn test_default_is_empty() {
        let mut state = SubdivisionState::default();
        assert!(state.mesh().is_empty());
        assert_eq!(
            state.subdivide(&SubdivideParams::default()).unwrap(),
            SubdivisionOutcome::Applied
        );
        assert_eq!(state.depth(), 1);
        assert_eq!(state.mesh().triangle_count(), 0);
    }
}
