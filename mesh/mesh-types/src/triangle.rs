//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete corner positions.
///
/// This is a utility type for geometric calculations. It stores the actual
/// positions rather than indices, and is produced by
/// [`MeshBuffer::triangles`](crate::MeshBuffer::triangles).
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!(tri.normal().is_some_and(|n| (n.z - 1.0).abs() < 1e-10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First corner.
    pub v0: Point3<f64>,
    /// Second corner.
    pub v1: Point3<f64>,
    /// Third corner.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The direction follows the right-hand rule with CCW winding.
    /// The magnitude equals twice the triangle's area.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle, Point3};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    ///     Point3::new(0.0, 2.0, 0.0),
    /// );
    ///
    /// let n = tri.normal_unnormalized();
    /// assert!((n.norm() - 4.0).abs() < 1e-10);
    /// ```
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles (zero area).
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Compute the area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Compute the centroid, the componentwise mean of the three corners.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle, Point3};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(3.0, 0.0, 0.0),
    ///     Point3::new(0.0, 3.0, 0.0),
    /// );
    /// let c = tri.centroid();
    /// assert!((c.x - 1.0).abs() < 1e-10);
    /// assert!((c.y - 1.0).abs() < 1e-10);
    /// ```
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::new(
            (self.v0.x + self.v1.x + self.v2.x) / 3.0,
            (self.v0.y + self.v1.y + self.v2.y) / 3.0,
            (self.v0.z + self.v1.z + self.v2.z) / 3.0,
        )
    }

    /// Check whether this triangle faces the same side as `direction`.
    ///
    /// True when the unnormalized normal has a positive dot product with
    /// `direction`. Degenerate triangles never agree.
    #[inline]
    #[must_use]
    pub fn faces_along(&self, direction: &Vector3<f64>) -> bool {
        self.normal_unnormalized().dot(direction) > 0.0
    }

    /// Get a copy with reversed winding (v0, v2, v1).
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            v0: self.v0,
            v1: self.v2,
            v2: self.v1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_right() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn triangle_normal() {
        let n = unit_right().normal().map_or(Vector3::zeros(), |n| n);
        assert!(n.x.abs() < 1e-10);
        assert!(n.y.abs() < 1e-10);
        assert!((n.z - 1.0).abs() < 1e-10);
    }

    #[test]
    fn degenerate_triangle_normal() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(tri.normal().is_none());
        assert!(!tri.faces_along(&Vector3::z()));
    }

    #[test]
    fn triangle_area() {
        assert!((unit_right().area() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn centroid_is_mean_of_corners() {
        let tri = Triangle::new(
            Point3::new(1.0, -2.0, 4.0),
            Point3::new(2.0, 5.0, -1.0),
            Point3::new(-6.0, 0.5, 3.0),
        );
        let c = tri.centroid();
        assert!((c.x - (-1.0)).abs() < 1e-12);
        assert!((c.y - 3.5 / 3.0).abs() < 1e-12);
        assert!((c.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_faces_opposite_side() {
        let tri = unit_right();
        assert!(tri.faces_along(&Vector3::z()));
        assert!(!tri.reversed().faces_along(&Vector3::z()));
        assert!(tri.reversed().faces_along(&-Vector3::z()));
    }
}
