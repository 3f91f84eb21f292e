//! The line-based command protocol driving a [`SceneState`].
//!
//! One command per line:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `subdivide` | one centroid split, no-op at the depth ceiling |
//! | `geometry <name>` | switch base shape, depth back to 0 |
//! | `material <name>` | `phongFlat`, `phongSmooth` or `lambert` |
//! | `color <#hex>` / `wire-color <#hex>` | surface / wireframe color |
//! | `surface on\|off` / `wireframe on\|off` | visibility |
//! | `stats` | summary and topology report |
//! | `dump` | log vertices and triangles at debug level |
//! | `reset` | regenerate the current shape at depth 0 |
//! | `quit` | stop reading commands |
//!
//! Blank lines and lines starting with `#` are skipped.

use std::fmt;
use std::str::FromStr;

use mesh_subdivide::{SubdivideResult, SubdivisionOutcome};
use mesh_types::{Polyhedron, TopologyReport, UnknownPolyhedron};
use thiserror::Error;

use crate::color::{Color, ParseColorError};
use crate::material::{Material, ParseMaterialError};
use crate::scene::{SceneState, SceneSummary};

/// A parsed viewer command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Apply one subdivide action.
    Subdivide,
    /// Switch the base shape.
    Geometry(Polyhedron),
    /// Switch the surface material.
    Material(Material),
    /// Set the surface color.
    Color(Color),
    /// Set the wireframe color.
    WireColor(Color),
    /// Show or hide the surface.
    Surface(bool),
    /// Show or hide the wireframe.
    Wireframe(bool),
    /// Report the scene summary and topology.
    Stats,
    /// Log the mesh contents.
    Dump,
    /// Regenerate the current shape at depth 0.
    Reset,
    /// Stop processing commands.
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The line held no command.
    #[error("empty command")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command '{0}'")]
    Unknown(String),

    /// A known command with missing, extra, or malformed arguments.
    #[error("invalid command '{line}' (usage: {usage})")]
    Usage {
        /// The offending line.
        line: String,
        /// Expected form.
        usage: &'static str,
    },

    /// Unknown shape name.
    #[error(transparent)]
    Geometry(#[from] UnknownPolyhedron),

    /// Unknown material name.
    #[error(transparent)]
    Material(#[from] ParseMaterialError),

    /// Malformed color.
    #[error(transparent)]
    Color(#[from] ParseColorError),
}

impl Command {
    /// Parse one line of input, skipping blanks and `#` comments.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] for anything that is neither skippable nor
    /// a valid command.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }
        text.parse().map(Some)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let usage = |usage: &'static str| CommandError::Usage {
            line: line.to_string(),
            usage,
        };
        let no_args = |command: Self, form: &'static str| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(usage(form))
            }
        };
        let one_arg = |form: &'static str| match args.as_slice() {
            [arg] => Ok(*arg),
            _ => Err(usage(form)),
        };
        let on_off = |form: &'static str| match one_arg(form)? {
            arg if arg.eq_ignore_ascii_case("on") => Ok(true),
            arg if arg.eq_ignore_ascii_case("off") => Ok(false),
            _ => Err(usage(form)),
        };

        match name.to_ascii_lowercase().as_str() {
            "subdivide" => no_args(Self::Subdivide, "subdivide"),
            "geometry" => Ok(Self::Geometry(one_arg("geometry <name>")?.parse()?)),
            "material" => Ok(Self::Material(one_arg("material <name>")?.parse()?)),
            "color" => Ok(Self::Color(one_arg("color <#rrggbb>")?.parse()?)),
            "wire-color" => Ok(Self::WireColor(one_arg("wire-color <#rrggbb>")?.parse()?)),
            "surface" => on_off("surface on|off").map(Self::Surface),
            "wireframe" => on_off("wireframe on|off").map(Self::Wireframe),
            "stats" => no_args(Self::Stats, "stats"),
            "dump" => no_args(Self::Dump, "dump"),
            "reset" => no_args(Self::Reset, "reset"),
            "quit" | "exit" => no_args(Self::Quit, "quit"),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandReply {
    /// A subdivide request was handled.
    Subdivision {
        /// Whether a split happened.
        outcome: SubdivisionOutcome,
        /// Depth after the request.
        depth: u32,
        /// Vertices after the request.
        vertex_count: usize,
        /// Triangles after the request.
        triangle_count: usize,
    },
    /// A setting changed.
    Updated,
    /// Current state.
    Stats {
        /// Scene snapshot.
        summary: SceneSummary,
        /// Edge and winding diagnostics.
        topology: TopologyReport,
    },
    /// The mesh was written to the log.
    Dumped {
        /// Vertex and triangle lines emitted.
        lines: usize,
    },
    /// Stop processing commands.
    Quit,
}

impl fmt::Display for CommandReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subdivision {
                outcome,
                depth,
                vertex_count,
                triangle_count,
            } => {
                let verb = match outcome {
                    SubdivisionOutcome::Applied => "subdivided to depth",
                    SubdivisionOutcome::AtMaxDepth => "already at max depth",
                };
                write!(
                    f,
                    "{verb} {depth}: {vertex_count} vertices, {triangle_count} triangles"
                )
            }
            Self::Updated => f.write_str("ok"),
            Self::Stats { summary, topology } => write!(f, "{summary}\n  topology: {topology}"),
            Self::Dumped { lines } => write!(f, "dumped {lines} lines at debug level"),
            Self::Quit => f.write_str("bye"),
        }
    }
}

impl SceneState {
    /// Execute one command.
    ///
    /// # Errors
    ///
    /// Propagates subdivision errors from [`Command::Subdivide`].
    pub fn apply(&mut self, command: Command) -> SubdivideResult<CommandReply> {
        let reply = match command {
            Command::Subdivide => {
                let outcome = self.subdivide()?;
                CommandReply::Subdivision {
                    outcome,
                    depth: self.depth(),
                    vertex_count: self.mesh().vertex_count(),
                    triangle_count: self.mesh().triangle_count(),
                }
            }
            Command::Geometry(kind) => {
                self.set_geometry(kind);
                CommandReply::Updated
            }
            Command::Material(material) => {
                self.set_material(material);
                CommandReply::Updated
            }
            Command::Color(color) => {
                self.set_mesh_color(color);
                CommandReply::Updated
            }
            Command::WireColor(color) => {
                self.set_wire_color(color);
                CommandReply::Updated
            }
            Command::Surface(visible) => {
                self.set_surface_visible(visible);
                CommandReply::Updated
            }
            Command::Wireframe(visible) => {
                self.set_wireframe_visible(visible);
                CommandReply::Updated
            }
            Command::Stats => CommandReply::Stats {
                summary: self.summary(),
                topology: self.topology(),
            },
            Command::Dump => CommandReply::Dumped { lines: self.dump() },
            Command::Reset => {
                self.reset();
                CommandReply::Updated
            }
            Command::Quit => CommandReply::Quit,
        };
        Ok(reply)
    }
}
