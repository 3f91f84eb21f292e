//! Viewer configuration loaded from TOML.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use mesh_subdivide::{DEFAULT_MAX_DEPTH, SubdivideParams};
use mesh_types::{DEFAULT_RADIUS, Polyhedron};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::material::Material;

/// Largest `max_depth` a configuration may ask for.
///
/// The sphere, the largest base shape at 256 triangles, reaches about 15
/// million triangles at this depth.
pub const MAX_DEPTH_LIMIT: u32 = 10;

/// Log verbosity accepted on the command line and in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything.
    Trace,
    /// Per-call sizes and the vertex dump.
    Debug,
    /// Max-depth notices.
    Info,
    /// Rejected commands.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Filter directive for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Errors from loading or checking a [`ViewerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The base shape radius must be finite and positive.
    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f64),

    /// The depth ceiling is above [`MAX_DEPTH_LIMIT`].
    #[error("max_depth {max_depth} exceeds the limit of {limit}")]
    InvalidMaxDepth {
        /// Requested ceiling.
        max_depth: u32,
        /// Largest accepted ceiling.
        limit: u32,
    },
}

/// Startup settings for the viewer.
///
/// Missing keys take their defaults; unknown keys are rejected.
///
/// ```toml
/// geometry = "icosahedron"
/// radius = 2.5
/// material = "phongSmooth"
/// mesh_color = "#3080ff"
/// wireframe = false
/// max_depth = 4
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Base shape.
    pub geometry: Polyhedron,
    /// Base shape size.
    pub radius: f64,
    /// Surface material.
    pub material: Material,
    /// Surface color.
    pub mesh_color: Color,
    /// Wireframe color.
    pub wire_color: Color,
    /// Whether the shaded surface is shown.
    pub surface: bool,
    /// Whether the wireframe is shown.
    pub wireframe: bool,
    /// Depth ceiling for subdivide requests.
    pub max_depth: u32,
    /// Log verbosity when neither `--log-level` nor `RUST_LOG` is given.
    pub log_level: Option<LogLevel>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            geometry: Polyhedron::Tetrahedron,
            radius: DEFAULT_RADIUS,
            material: Material::PhongFlat,
            mesh_color: Color::ORANGE,
            wire_color: Color::WHITE,
            surface: true,
            wireframe: true,
            max_depth: DEFAULT_MAX_DEPTH,
            log_level: None,
        }
    }
}

impl ViewerConfig {
    /// Read and validate a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid for this schema, and the
    /// errors of [`ViewerConfig::validate`] otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRadius`] for a zero, negative, or
    /// non-finite radius and [`ConfigError::InvalidMaxDepth`] for a depth
    /// ceiling above [`MAX_DEPTH_LIMIT`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidMaxDepth {
                max_depth: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }

    /// Subdivision parameters for this configuration.
    #[must_use]
    pub fn subdivide_params(&self) -> SubdivideParams {
        SubdivideParams::new().with_max_depth(self.max_depth)
    }
}

/// Pick the log filter: command line first, then `RUST_LOG`, then the
/// config file, then `info`.
#[must_use]
pub fn resolve_log_filter(
    cli: Option<LogLevel>,
    env: Option<String>,
    config: Option<LogLevel>,
) -> String {
    if let Some(level) = cli {
        return level.as_str().to_string();
    }
    if let Some(filter) = env.filter(|f| !f.trim().is_empty()) {
        return filter;
    }
    config.unwrap_or(LogLevel::Info).as_str().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.geometry, Polyhedron::Tetrahedron);
        assert_eq!(config.radius, 4.0);
        assert_eq!(config.material, Material::PhongFlat);
        assert_eq!(config.mesh_color.to_string(), "#ff8000");
        assert_eq!(config.wire_color.to_string(), "#ffffff");
        assert!(config.surface && config.wireframe);
        assert_eq!(config.subdivide_params().max_depth, 6);
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r##"
geometry = "icosahedron"
material = "lambert"
mesh_color = "#102030"
wireframe = false
max_depth = 3
log_level = "debug"
"##,
        );
        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.geometry, Polyhedron::Icosahedron);
        assert_eq!(config.material, Material::Lambert);
        assert_eq!(config.mesh_color, Color::new(0x10, 0x20, 0x30));
        assert!(!config.wireframe);
        assert!(config.surface);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.radius, 4.0);
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let file = write_config("");
        assert_eq!(ViewerConfig::load(file.path()).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let file = write_config("segments = 12\n");
        let err = ViewerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_bad_values() {
        for contents in [
            "geometry = \"torus\"\n",
            "mesh_color = \"orange\"\n",
            "material = \"matte\"\n",
        ] {
            let file = write_config(contents);
            assert!(matches!(
                ViewerConfig::load(file.path()),
                Err(ConfigError::Parse { .. })
            ));
        }
    }

    #[test]
    fn test_validate_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = ViewerConfig {
                radius,
                ..ViewerConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidRadius(_))
            ));
        }
        let file = write_config("radius = -2.0\n");
        assert!(matches!(
            ViewerConfig::load(file.path()),
            Err(ConfigError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_validate_max_depth() {
        let config = ViewerConfig {
            max_depth: MAX_DEPTH_LIMIT,
            ..ViewerConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = ViewerConfig {
            max_depth: MAX_DEPTH_LIMIT + 1,
            ..ViewerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxDepth { max_depth: 11, limit: 10 })
        ));

        let file = write_config("max_depth = 25\n");
        let err = ViewerConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_depth 25"));
    }

    #[test]
    fn test_resolve_log_filter_precedence() {
        let env = Some("mesh_subdivide=trace".to_string());
        assert_eq!(
            resolve_log_filter(Some(LogLevel::Warn), env.clone(), Some(LogLevel::Debug)),
            "warn"
        );
        assert_eq!(
            resolve_log_filter(None, env, Some(LogLevel::Debug)),
            "mesh_subdivide=trace"
        );
        assert_eq!(
            resolve_log_filter(None, Some("  ".to_string()), Some(LogLevel::Debug)),
            "debug"
        );
        assert_eq!(resolve_log_filter(None, None, None), "info");
    }
}
