//! Everything the viewer shows, owned in one place.

use std::fmt;

use mesh_subdivide::{SubdivideParams, SubdivideResult, SubdivisionOutcome, SubdivisionState};
use mesh_types::{
    DerivedGeometry, MeshBuffer, Polyhedron, TopologyReport, TriangleIndex, VertexIndex,
    generate_polyhedron,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::color::Color;
use crate::config::{ConfigError, ViewerConfig};
use crate::material::{Material, Shading};

/// The current mesh, its subdivision depth, and how it is drawn.
///
/// Derived geometry (bounds, normals) always belongs to the current mesh:
/// it is recomputed whenever the mesh is replaced and left alone when a
/// request changes nothing.
#[derive(Debug, Clone)]
pub struct SceneState {
    geometry: Polyhedron,
    radius: f64,
    material: Material,
    mesh_color: Color,
    wire_color: Color,
    surface_visible: bool,
    wireframe_visible: bool,
    subdivision: SubdivisionState,
    params: SubdivideParams,
    derived: DerivedGeometry,
}

impl SceneState {
    /// Build the initial scene: the configured base shape at depth 0.
    ///
    /// # Errors
    ///
    /// Returns the [`ViewerConfig::validate`] error if `config` is invalid.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mesh = generate_polyhedron(config.geometry, config.radius);
        let derived = DerivedGeometry::compute(&mesh);

        info!(
            geometry = %config.geometry,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Scene created"
        );

        Ok(Self {
            geometry: config.geometry,
            radius: config.radius,
            material: config.material,
            mesh_color: config.mesh_color,
            wire_color: config.wire_color,
            surface_visible: config.surface,
            wireframe_visible: config.wireframe,
            subdivision: SubdivisionState::new(mesh),
            params: config.subdivide_params(),
            derived,
        })
    }

    /// Handle the subdivide action.
    ///
    /// # Errors
    ///
    /// Propagates subdivision errors; the scene is unchanged on error.
    pub fn subdivide(&mut self) -> SubdivideResult<SubdivisionOutcome> {
        let outcome = self.subdivision.subdivide(&self.params)?;
        if outcome.requires_rederive() {
            self.derived = DerivedGeometry::compute(self.subdivision.mesh());
        }
        Ok(outcome)
    }

    /// Switch the base shape. Depth goes back to 0.
    pub fn set_geometry(&mut self, geometry: Polyhedron) {
        self.geometry = geometry;
        self.regenerate();
        info!(%geometry, "Geometry changed");
    }

    /// Regenerate the current base shape, discarding all subdivision.
    pub fn reset(&mut self) {
        self.regenerate();
        info!(geometry = %self.geometry, "Scene reset");
    }

    fn regenerate(&mut self) {
        let mesh = generate_polyhedron(self.geometry, self.radius);
        self.derived = DerivedGeometry::compute(&mesh);
        self.subdivision.reset(mesh);
    }

    /// Change the surface material.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Change the surface color.
    pub fn set_mesh_color(&mut self, color: Color) {
        self.mesh_color = color;
    }

    /// Change the wireframe color.
    pub fn set_wire_color(&mut self, color: Color) {
        self.wire_color = color;
    }

    /// Show or hide the shaded surface.
    pub fn set_surface_visible(&mut self, visible: bool) {
        self.surface_visible = visible;
    }

    /// Show or hide the wireframe.
    pub fn set_wireframe_visible(&mut self, visible: bool) {
        self.wireframe_visible = visible;
    }

    /// Current base shape.
    #[must_use]
    pub const fn geometry(&self) -> Polyhedron {
        self.geometry
    }

    /// Base shape size.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Current material.
    #[must_use]
    pub const fn material(&self) -> Material {
        self.material
    }

    /// Current surface color.
    #[must_use]
    pub const fn mesh_color(&self) -> Color {
        self.mesh_color
    }

    /// Current wireframe color.
    #[must_use]
    pub const fn wire_color(&self) -> Color {
        self.wire_color
    }

    /// Whether the shaded surface is shown.
    #[must_use]
    pub const fn surface_visible(&self) -> bool {
        self.surface_visible
    }

    /// Whether the wireframe is shown.
    #[must_use]
    pub const fn wireframe_visible(&self) -> bool {
        self.wireframe_visible
    }

    /// The displayed mesh.
    #[must_use]
    pub const fn mesh(&self) -> &MeshBuffer {
        self.subdivision.mesh()
    }

    /// Splits applied since the base shape was generated.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.subdivision.depth()
    }

    /// Subdivision parameters in effect.
    #[must_use]
    pub const fn params(&self) -> &SubdivideParams {
        &self.params
    }

    /// Bounds and normals of the displayed mesh.
    #[must_use]
    pub const fn derived(&self) -> &DerivedGeometry {
        &self.derived
    }

    /// Edge and winding diagnostics for the displayed mesh.
    #[must_use]
    pub fn topology(&self) -> TopologyReport {
        TopologyReport::analyze(self.mesh())
    }

    /// Snapshot for display or JSON output.
    #[must_use]
    pub fn summary(&self) -> SceneSummary {
        let bounds = &self.derived.bounds;
        SceneSummary {
            geometry: self.geometry,
            radius: self.radius,
            material: self.material,
            shading: self.material.shading(),
            mesh_color: self.mesh_color,
            wire_color: self.wire_color,
            surface_visible: self.surface_visible,
            wireframe_visible: self.wireframe_visible,
            depth: self.depth(),
            max_depth: self.params.max_depth,
            remaining_levels: self.params.remaining_levels(self.depth()),
            vertex_count: self.mesh().vertex_count(),
            triangle_count: self.mesh().triangle_count(),
            bounds_min: [bounds.min.x, bounds.min.y, bounds.min.z],
            bounds_max: [bounds.max.x, bounds.max.y, bounds.max.z],
            bounding_radius: self.derived.bounding_sphere.radius,
        }
    }

    /// Log every vertex and triangle of the displayed mesh at debug level.
    ///
    /// Returns the number of vertex and triangle lines emitted.
    pub fn dump(&self) -> usize {
        let mesh = self.mesh();
        debug!(
            "Mesh dump: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        for (i, p) in (0u32..).zip(mesh.vertices()) {
            debug!("{} {:.6} {:.6} {:.6}", VertexIndex::new(i), p.x, p.y, p.z);
        }
        for (t, [a, b, c]) in (0u32..).zip(mesh.faces()) {
            debug!("{} {} {} {}", TriangleIndex::new(t), a, b, c);
        }
        mesh.vertex_count() + mesh.triangle_count()
    }
}

/// What the viewer is showing, in a form that serializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    /// Base shape.
    pub geometry: Polyhedron,
    /// Base shape size.
    pub radius: f64,
    /// Surface material.
    pub material: Material,
    /// Normal interpolation of `material`.
    pub shading: Shading,
    /// Surface color.
    pub mesh_color: Color,
    /// Wireframe color.
    pub wire_color: Color,
    /// Whether the shaded surface is shown.
    pub surface_visible: bool,
    /// Whether the wireframe is shown.
    pub wireframe_visible: bool,
    /// Current subdivision depth.
    pub depth: u32,
    /// Depth ceiling.
    pub max_depth: u32,
    /// Subdivide requests left before the ceiling.
    pub remaining_levels: u32,
    /// Vertices in the displayed mesh.
    pub vertex_count: usize,
    /// Triangles in the displayed mesh.
    pub triangle_count: usize,
    /// Minimum corner of the bounding box.
    pub bounds_min: [f64; 3],
    /// Maximum corner of the bounding box.
    pub bounds_max: [f64; 3],
    /// Radius of the bounding sphere.
    pub bounding_radius: f64,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} (radius {}) at depth {}/{}: {} vertices, {} triangles",
            self.geometry,
            self.radius,
            self.depth,
            self.max_depth,
            self.vertex_count,
            self.triangle_count
        )?;
        writeln!(
            f,
            "  material {} ({:?}), color {}, wire {}",
            self.material, self.shading, self.mesh_color, self.wire_color
        )?;
        let on_off = |v: bool| if v { "on" } else { "off" };
        write!(
            f,
            "  surface {}, wireframe {}, bounding radius {:.3}",
            on_off(self.surface_visible),
            on_off(self.wireframe_visible),
            self.bounding_radius
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn scene() -> SceneState {
        SceneState::from_config(&ViewerConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_scene() {
        let scene = scene();
        assert_eq!(scene.geometry(), Polyhedron::Tetrahedron);
        assert_eq!(scene.depth(), 0);
        assert_eq!(scene.mesh().vertex_count(), 4);
        assert_eq!(scene.mesh().triangle_count(), 4);
        assert!(scene.derived().matches(scene.mesh()));
        assert!(scene.surface_visible());
        assert!(scene.wireframe_visible());
    }

    #[test]
    fn test_from_config_rejects_bad_radius() {
        let config = ViewerConfig {
            radius: 0.0,
            ..ViewerConfig::default()
        };
        assert!(SceneState::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_rejects_deep_ceiling() {
        let config = ViewerConfig {
            max_depth: 25,
            ..ViewerConfig::default()
        };
        assert!(matches!(
            SceneState::from_config(&config),
            Err(ConfigError::InvalidMaxDepth { max_depth: 25, .. })
        ));
    }

    #[test]
    fn test_subdivide_rederives() {
        let mut scene = scene();
        assert_eq!(scene.subdivide().unwrap(), SubdivisionOutcome::Applied);
        assert_eq!(scene.depth(), 1);
        assert_eq!(scene.mesh().vertex_count(), 8);
        assert_eq!(scene.derived().normals.len(), 8);
    }

    #[test]
    fn test_subdivide_stops_at_ceiling() {
        let config = ViewerConfig {
            max_depth: 2,
            ..ViewerConfig::default()
        };
        let mut scene = SceneState::from_config(&config).unwrap();
        scene.subdivide().unwrap();
        scene.subdivide().unwrap();

        let derived = scene.derived().clone();
        let mesh = scene.mesh().clone();
        assert_eq!(scene.subdivide().unwrap(), SubdivisionOutcome::AtMaxDepth);
        assert_eq!(scene.depth(), 2);
        assert!(scene.mesh().shares_buffers_with(&mesh));
        assert_eq!(scene.derived(), &derived);
        assert_eq!(scene.summary().remaining_levels, 0);
    }

    #[test]
    fn test_set_geometry_resets_depth() {
        let mut scene = scene();
        scene.subdivide().unwrap();
        scene.subdivide().unwrap();

        scene.set_geometry(Polyhedron::Cube);
        assert_eq!(scene.depth(), 0);
        assert_eq!(scene.mesh().triangle_count(), 12);
        assert_eq!(scene.derived().normals.len(), 8);
    }

    #[test]
    fn test_reset_keeps_geometry() {
        let mut scene = scene();
        scene.set_geometry(Polyhedron::Icosahedron);
        scene.subdivide().unwrap();
        scene.reset();
        assert_eq!(scene.geometry(), Polyhedron::Icosahedron);
        assert_eq!(scene.depth(), 0);
        assert_eq!(scene.mesh().triangle_count(), 20);
    }

    #[test]
    fn test_setters() {
        let mut scene = scene();
        scene.set_material(Material::Lambert);
        scene.set_mesh_color(Color::new(1, 2, 3));
        scene.set_wire_color(Color::new(4, 5, 6));
        scene.set_surface_visible(false);
        scene.set_wireframe_visible(false);

        let summary = scene.summary();
        assert_eq!(summary.material, Material::Lambert);
        assert_eq!(summary.shading, Shading::Smooth);
        assert_eq!(summary.mesh_color, Color::new(1, 2, 3));
        assert_eq!(summary.wire_color, Color::new(4, 5, 6));
        assert!(!summary.surface_visible);
        assert!(!summary.wireframe_visible);
    }

    #[test]
    fn test_summary_json() {
        let mut scene = scene();
        scene.subdivide().unwrap();
        let json = serde_json::to_value(scene.summary()).unwrap();
        assert_eq!(json["geometry"], "tetrahedron");
        assert_eq!(json["material"], "phongFlat");
        assert_eq!(json["mesh_color"], "#ff8000");
        assert_eq!(json["depth"], 1);
        assert_eq!(json["max_depth"], 6);
        assert_eq!(json["remaining_levels"], 5);
        assert_eq!(json["triangle_count"], 12);
    }

    #[test]
    fn test_summary_display() {
        let text = scene().summary().to_string();
        assert!(text.contains("tetrahedron"));
        assert!(text.contains("depth 0/6"));
        assert!(text.contains("wireframe on"));
    }

    #[test]
    fn test_topology_and_dump() {
        let mut scene = scene();
        scene.subdivide().unwrap();
        let report = scene.topology();
        assert!(report.is_closed());
        assert!(report.is_consistently_wound());
        assert_eq!(scene.dump(), 8 + 12);
    }
}
