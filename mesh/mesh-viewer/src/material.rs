//! Surface materials and how normals are interpolated across them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a material lights each triangle with its face normal or
/// interpolates vertex normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shading {
    /// One normal per triangle.
    Flat,
    /// Area-weighted vertex normals.
    Smooth,
}

/// The closed set of surface materials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Material {
    /// Phong lighting, flat shaded.
    #[default]
    PhongFlat,
    /// Phong lighting, smooth shaded.
    PhongSmooth,
    /// Diffuse-only lighting.
    Lambert,
}

impl Material {
    /// Every material, in selector order.
    pub const ALL: [Self; 3] = [Self::PhongFlat, Self::PhongSmooth, Self::Lambert];

    /// Name as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PhongFlat => "phongFlat",
            Self::PhongSmooth => "phongSmooth",
            Self::Lambert => "lambert",
        }
    }

    /// How this material interpolates normals.
    #[must_use]
    pub const fn shading(self) -> Shading {
        match self {
            Self::PhongFlat => Shading::Flat,
            Self::PhongSmooth | Self::Lambert => Shading::Smooth,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown material name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material '{0}' (expected one of: phongFlat, phongSmooth, lambert)")]
pub struct ParseMaterialError(pub String);

impl FromStr for Material {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseMaterialError(name.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for material in Material::ALL {
            assert_eq!(material.name().parse::<Material>().unwrap(), material);
        }
        assert_eq!("PHONGSMOOTH".parse::<Material>().unwrap(), Material::PhongSmooth);
        assert!("matte".parse::<Material>().is_err());
    }

    #[test]
    fn test_shading() {
        assert_eq!(Material::default().shading(), Shading::Flat);
        assert_eq!(Material::PhongSmooth.shading(), Shading::Smooth);
        assert_eq!(Material::Lambert.shading(), Shading::Smooth);
    }

    #[test]
    fn test_serde_names_match_display() {
        for material in Material::ALL {
            let json = serde_json::to_string(&material).unwrap();
            assert_eq!(json, format!("\"{material}\""));
        }
    }
}
