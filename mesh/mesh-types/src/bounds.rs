//! Bounding volumes: axis-aligned box and bounding sphere.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Represents a 3D box aligned with the coordinate axes, defined by
/// minimum and maximum corner points.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert_eq!(aabb.size(), Point3::new(10.0, 10.0, 10.0).coords);
/// assert_eq!(aabb.center(), Point3::new(5.0, 5.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from minimum and maximum corners.
    ///
    /// The corners are automatically corrected if min > max for any axis.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an empty (invalid) AABB.
    ///
    /// An empty AABB has min > max, which is useful as a starting point
    /// for expanding to include points.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB enclosing every point of an iterator.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(&point);
        }
        aabb
    }

    /// Check if the AABB is empty (has no valid volume).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the size (dimensions) of the AABB.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Get the center of the AABB.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Expand the AABB to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// A sphere enclosing every vertex of a mesh.
///
/// Built the way display layers usually do it: the center is the center of
/// the bounding box and the radius is the largest distance from that center
/// to any point. Not the minimal enclosing sphere.
///
/// # Example
///
/// ```
/// use mesh_types::{BoundingSphere, Point3};
///
/// let points = [
///     Point3::new(-1.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 0.5, 0.0),
///     Point3::new(0.0, -0.5, 0.0),
/// ];
/// let sphere = BoundingSphere::from_points(points);
/// assert_eq!(sphere.center, Point3::origin());
/// assert!((sphere.radius - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: Point3<f64>,
    /// Sphere radius.
    pub radius: f64,
}

impl BoundingSphere {
    /// Sphere at the origin with zero radius, used for empty meshes.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            center: Point3::origin(),
            radius: 0.0,
        }
    }

    /// Compute the bounding sphere of a set of points.
    ///
    /// The points are walked twice (box, then radius), so the iterator must
    /// be cloneable.
    #[must_use]
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3<f64>>,
        I::IntoIter: Clone,
    {
        let iter = points.into_iter();
        let aabb = Aabb::from_points(iter.clone());
        if aabb.is_empty() {
            return Self::empty();
        }

        let center = aabb.center();
        let max_sq = iter
            .map(|p| (p - center).norm_squared())
            .fold(0.0_f64, f64::max);

        Self {
            center,
            radius: max_sq.sqrt(),
        }
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::empty()
    }
}
