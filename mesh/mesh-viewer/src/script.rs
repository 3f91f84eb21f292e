//! Run a stream of commands against a scene.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::command::{Command, CommandReply};
use crate::error::{ViewerError, ViewerResult};
use crate::scene::SceneState;

/// Counts from one [`run_script`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Commands executed.
    pub executed: usize,
    /// Lines rejected by the parser.
    pub rejected: usize,
    /// Whether a `quit` command ended the stream early.
    pub quit: bool,
}

/// Read commands from `input` line by line, apply them to `scene`, and
/// write one reply per command to `output`.
///
/// Lines that fail to parse are logged, answered with `error: ...`, and
/// skipped. Processing stops at end of input or after `quit`.
///
/// # Errors
///
/// Returns [`ViewerError::Io`] if reading or writing fails and
/// [`ViewerError::Subdivide`] if a subdivide request fails.
pub fn run_script<R: BufRead, W: Write>(
    scene: &mut SceneState,
    input: R,
    output: &mut W,
) -> ViewerResult<ScriptSummary> {
    let mut summary = ScriptSummary::default();

    for (number, line) in (1..).zip(input.lines()) {
        let io_err = |source| ViewerError::Io {
            line: number,
            source,
        };
        let line = line.map_err(io_err)?;

        let command = match Command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = number, "Rejected command: {err}");
                writeln!(output, "error: {err}").map_err(io_err)?;
                summary.rejected += 1;
                continue;
            }
        };

        debug!(line = number, ?command, "Applying command");
        let reply = scene.apply(command)?;
        writeln!(output, "{reply}").map_err(io_err)?;
        summary.executed += 1;

        if reply == CommandReply::Quit {
            summary.quit = true;
            break;
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use mesh_types::Polyhedron;

    fn run(script: &str) -> (SceneState, ScriptSummary, String) {
        let mut scene = SceneState::from_config(&ViewerConfig::default()).unwrap();
        let mut out = Vec::new();
        let summary = run_script(&mut scene, script.as_bytes(), &mut out).unwrap();
        (scene, summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_script_runs_to_end() {
        let (scene, summary, out) = run("# setup\ngeometry icosahedron\n\nsubdivide\nsubdivide\n");
        assert_eq!(scene.geometry(), Polyhedron::Icosahedron);
        assert_eq!(scene.depth(), 2);
        assert_eq!(scene.mesh().triangle_count(), 180);
        assert_eq!(summary.executed, 3);
        assert_eq!(summary.rejected, 0);
        assert!(!summary.quit);
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_script_stops_at_quit() {
        let (scene, summary, out) = run("subdivide\nquit\nsubdivide\n");
        assert_eq!(scene.depth(), 1);
        assert!(summary.quit);
        assert!(out.ends_with("bye\n"));
    }

    #[test]
    fn test_script_skips_bad_lines() {
        let (scene, summary, out) = run("explode\nsubdivide\ncolor orange\n");
        assert_eq!(scene.depth(), 1);
        assert_eq!(summary.executed, 1);
        assert_eq!(summary.rejected, 2);
        assert!(out.starts_with("error: unknown command 'explode'"));
    }

    #[test]
    fn test_script_past_ceiling() {
        let script = "subdivide\n".repeat(8);
        let (scene, _, out) = run(&script);
        assert_eq!(scene.depth(), 6);
        assert_eq!(scene.mesh().triangle_count(), 2916);
        assert_eq!(out.matches("already at max depth 6").count(), 2);
    }
}
