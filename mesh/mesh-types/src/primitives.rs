//! Base shapes to start subdividing from.
//!
//! Every generator returns a closed, manifold mesh centered at the origin
//! with counter-clockwise winding seen from outside.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};

use crate::MeshBuffer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default characteristic size of generated shapes.
pub const DEFAULT_RADIUS: f64 = 4.0;

/// Longitude segments of the generated sphere.
pub const SPHERE_WIDTH_SEGMENTS: usize = 16;

/// Latitude segments of the generated sphere.
pub const SPHERE_HEIGHT_SEGMENTS: usize = 9;

/// The closed set of base shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Polyhedron {
    /// 4 vertices, 4 triangles.
    #[default]
    Tetrahedron,
    /// 8 vertices, 12 triangles.
    Cube,
    /// UV sphere, 130 vertices, 256 triangles.
    Sphere,
    /// 12 vertices, 20 triangles.
    Icosahedron,
    /// 20 vertices, 36 triangles (each pentagon fanned into 3).
    Dodecahedron,
}

impl Polyhedron {
    /// Every shape, in selector order.
    pub const ALL: [Self; 5] = [
        Self::Tetrahedron,
        Self::Cube,
        Self::Sphere,
        Self::Icosahedron,
        Self::Dodecahedron,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tetrahedron => "tetrahedron",
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Icosahedron => "icosahedron",
            Self::Dodecahedron => "dodecahedron",
        }
    }

    /// Generate this shape. See [`generate_polyhedron`].
    #[must_use]
    pub fn generate(self, size: f64) -> MeshBuffer {
        generate_polyhedron(self, size)
    }
}

impl fmt::Display for Polyhedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown shape name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown polyhedron '{0}' (expected one of: tetrahedron, cube, sphere, icosahedron, dodecahedron)")]
pub struct UnknownPolyhedron(pub String);

impl FromStr for Polyhedron {
    type Err = UnknownPolyhedron;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownPolyhedron(name.to_string()))
    }
}

/// Generate a base shape.
///
/// `size` is the circumradius for the tetrahedron, sphere, icosahedron and
/// dodecahedron, and the edge length for the cube. Non-positive sizes give a
/// structurally valid but degenerate mesh.
///
/// # Example
///
/// ```
/// use mesh_types::{generate_polyhedron, Polyhedron, DEFAULT_RADIUS};
///
/// let tet = generate_polyhedron(Polyhedron::Tetrahedron, DEFAULT_RADIUS);
/// assert_eq!(tet.vertex_count(), 4);
/// assert_eq!(tet.triangle_count(), 4);
/// assert!(tet.signed_volume() > 0.0);
/// ```
#[must_use]
pub fn generate_polyhedron(kind: Polyhedron, size: f64) -> MeshBuffer {
    let (points, mut faces) = match kind {
        Polyhedron::Tetrahedron => tetrahedron(size),
        Polyhedron::Cube => cube(size),
        Polyhedron::Sphere => uv_sphere(size, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS),
        Polyhedron::Icosahedron => icosahedron(size),
        Polyhedron::Dodecahedron => dodecahedron(size),
    };

    orient_outward(&points, &mut faces);

    let positions = points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
    let indices = faces.into_iter().flatten().collect();
    MeshBuffer::from_parts_unchecked(positions, indices)
}

type Shape = (Vec<Point3<f64>>, Vec<[u32; 3]>);

/// Flip any triangle whose normal points toward the origin.
///
/// Valid for convex shapes centered at the origin, which is all of ours.
fn orient_outward(points: &[Point3<f64>], faces: &mut [[u32; 3]]) {
    for face in faces {
        let [a, b, c] = face.map(|i| points[i as usize]);
        let normal = (b - a).cross(&(c - a));
        let centroid = (a.coords + b.coords + c.coords) / 3.0;
        if normal.dot(&centroid) < 0.0 {
            face.swap(1, 2);
        }
    }
}

fn scaled(points: impl IntoIterator<Item = [f64; 3]>, radius: f64) -> Vec<Point3<f64>> {
    points
        .into_iter()
        .map(|[x, y, z]| {
            let v = Vector3::new(x, y, z).normalize() * radius;
            Point3::from(v)
        })
        .collect()
}

fn tetrahedron(radius: f64) -> Shape {
    let points = scaled(
        [
            [1.0, 1.0, 1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
        ],
        radius,
    );
    let faces = vec![[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
    (points, faces)
}

fn cube(edge: f64) -> Shape {
    let h = edge * 0.5;
    let points = vec![
        Point3::new(-h, -h, -h), // 0
        Point3::new(h, -h, -h),  // 1
        Point3::new(h, h, -h),   // 2
        Point3::new(-h, h, -h),  // 3
        Point3::new(-h, -h, h),  // 4
        Point3::new(h, -h, h),   // 5
        Point3::new(h, h, h),    // 6
        Point3::new(-h, h, h),   // 7
    ];

    // Two triangles per side, CCW from outside.
    let faces = vec![
        [0, 2, 1],
        [0, 3, 2], // -Z
        [4, 5, 6],
        [4, 6, 7], // +Z
        [0, 1, 5],
        [0, 5, 4], // -Y
        [3, 7, 6],
        [3, 6, 2], // +Y
        [0, 4, 7],
        [0, 7, 3], // -X
        [1, 2, 6],
        [1, 6, 5], // +X
    ];
    (points, faces)
}

fn icosahedron(radius: f64) -> Shape {
    let t = f64::midpoint(1.0, 5.0_f64.sqrt());
    let points = scaled(
        [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ],
        radius,
    );
    let faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    (points, faces)
}

/// Dual of the icosahedron: one vertex per icosahedron face (its centroid
/// pushed out to the sphere), one pentagon per icosahedron vertex.
#[allow(clippy::cast_possible_truncation)]
fn dodecahedron(radius: f64) -> Shape {
    let (ico_points, ico_faces) = icosahedron(1.0);

    let points = scaled(
        ico_faces.iter().map(|face| {
            let [a, b, c] = face.map(|i| ico_points[i as usize].coords);
            let centroid = (a + b + c) / 3.0;
            [centroid.x, centroid.y, centroid.z]
        }),
        radius,
    );

    let mut faces = Vec::with_capacity(36);
    for (vi, axis) in ico_points.iter().enumerate() {
        let n = axis.coords.normalize();

        let mut ring: Vec<(f64, u32)> = Vec::with_capacity(5);
        let mut basis: Option<(Vector3<f64>, Vector3<f64>)> = None;
        for (fi, face) in ico_faces.iter().enumerate() {
            if !face.contains(&(vi as u32)) {
                continue;
            }
            let p = points[fi].coords;
            let (u, w) = *basis.get_or_insert_with(|| {
                let u = (p - n * p.dot(&n)).normalize();
                (u, n.cross(&u))
            });
            ring.push((p.dot(&w).atan2(p.dot(&u)), fi as u32));
        }
        ring.sort_by(|a, b| a.0.total_cmp(&b.0));

        for k in 1..ring.len().saturating_sub(1) {
            faces.push([ring[0].1, ring[k].1, ring[k + 1].1]);
        }
    }

    (points, faces)
}

/// Latitude/longitude sphere with shared poles and seam.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn uv_sphere(radius: f64, width_segments: usize, height_segments: usize) -> Shape {
    let rings = height_segments - 1;
    let mut points = Vec::with_capacity(2 + width_segments * rings);

    points.push(Point3::new(0.0, radius, 0.0));
    for iy in 1..height_segments {
        let theta = std::f64::consts::PI * iy as f64 / height_segments as f64;
        for ix in 0..width_segments {
            let phi = std::f64::consts::TAU * ix as f64 / width_segments as f64;
            points.push(Point3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }
    points.push(Point3::new(0.0, -radius, 0.0));

    let top = 0u32;
    let bottom = (points.len() - 1) as u32;
    let ring_vertex = |ring: usize, ix: usize| (1 + ring * width_segments + ix % width_segments) as u32;

    let mut faces = Vec::with_capacity(2 * width_segments * rings);
    for ix in 0..width_segments {
        faces.push([top, ring_vertex(0, ix), ring_vertex(0, ix + 1)]);
    }
    for ring in 0..rings - 1 {
        for ix in 0..width_segments {
            let a = ring_vertex(ring, ix);
            let b = ring_vertex(ring + 1, ix);
            let c = ring_vertex(ring + 1, ix + 1);
            let d = ring_vertex(ring, ix + 1);
            faces.push([a, b, d]);
            faces.push([b, c, d]);
        }
    }
    for ix in 0..width_segments {
        faces.push([ring_vertex(rings - 1, ix), bottom, ring_vertex(rings - 1, ix + 1)]);
    }

    (points, faces)
}
