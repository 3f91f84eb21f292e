//! Typed element indices.
//!
//! Both types wrap a `u32`, the width used by the index buffer.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a vertex in a [`MeshBuffer`](crate::MeshBuffer).
///
/// # Example
///
/// ```
/// use mesh_types::VertexIndex;
///
/// let v = VertexIndex::new(3);
/// assert_eq!(v.get(), 3);
/// assert_eq!(v.as_usize(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VertexIndex(u32);

/// Index of a triangle in a [`MeshBuffer`](crate::MeshBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TriangleIndex(u32);

macro_rules! impl_index {
    ($name:ident, $label:literal) => {
        impl $name {
            /// Wrap a raw index.
            #[inline]
            #[must_use]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// The raw index value.
            #[inline]
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// The index as a `usize`, for slicing.
            #[inline]
            #[must_use]
            pub const fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(index: u32) -> Self {
                Self(index)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(index: $name) -> Self {
                index.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "{}"), self.0)
            }
        }
    };
}

impl_index!(VertexIndex, "v");
impl_index!(TriangleIndex, "t");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_conversions() {
        let v = VertexIndex::from(7);
        assert_eq!(u32::from(v), 7);
        assert_eq!(v.as_usize(), 7);

        let t = TriangleIndex::new(2);
        assert_eq!(t.get(), 2);
    }

    #[test]
    fn index_display() {
        assert_eq!(VertexIndex::new(4).to_string(), "v4");
        assert_eq!(TriangleIndex::new(11).to_string(), "t11");
    }

    #[test]
    fn index_ordering() {
        assert!(VertexIndex::new(1) < VertexIndex::new(2));
        assert_eq!(TriangleIndex::default(), TriangleIndex::new(0));
    }
}
