//! Headless host for interactive centroid-split subdivision.
//!
//! The viewer owns a single [`SceneState`]: a base shape, its current
//! subdivision depth, the derived bounds and normals a renderer needs, and
//! the display settings (material, colors, visibility). It is driven by
//! [`Command`]s, one per line, from a script or stdin.
//!
//! - [`ViewerConfig`] - Startup settings from TOML
//! - [`SceneState`] - The scene and its operations
//! - [`Command`] / [`CommandReply`] - The command protocol
//! - [`run_script`] - Apply a command stream to a scene
//!
//! # Example
//!
//! ```
//! use mesh_viewer::{run_script, SceneState, ViewerConfig};
//!
//! let mut scene = SceneState::from_config(&ViewerConfig::default())?;
//! let mut replies = Vec::new();
//! run_script(&mut scene, "geometry cube\nsubdivide\n".as_bytes(), &mut replies)?;
//!
//! assert_eq!(scene.depth(), 1);
//! assert_eq!(scene.mesh().triangle_count(), 36);
//! # Ok::<(), mesh_viewer::ViewerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod color;
mod command;
mod config;
mod error;
mod material;
mod scene;
mod script;

pub use color::{Color, ParseColorError};
pub use command::{Command, CommandError, CommandReply};
pub use config::{ConfigError, LogLevel, MAX_DEPTH_LIMIT, ViewerConfig, resolve_log_filter};
pub use error::{ViewerError, ViewerResult};
pub use material::{Material, ParseMaterialError, Shading};
pub use scene::{SceneState, SceneSummary};
pub use script::{ScriptSummary, run_script};
