//! Mesh viewer command-line host.
//!
//! Builds a scene from an optional TOML config plus flags, applies any
//! requested subdivisions, then runs commands from a script file or stdin.
//! The final scene summary goes to stdout; logs go to stderr.
//!
//! ```text
//! mesh-viewer --geometry icosahedron --subdivide 3 --json < /dev/null
//! mesh-viewer --config viewer.toml --script session.txt --log-level debug
//! ```

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mesh_types::Polyhedron;
use mesh_viewer::{LogLevel, Material, SceneState, ViewerConfig, resolve_log_filter, run_script};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interactive centroid-split subdivision of base shapes
#[derive(Parser)]
#[command(name = "mesh-viewer")]
#[command(about = "Subdivide base shapes from a command stream", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base shape (tetrahedron, cube, sphere, icosahedron, dodecahedron)
    #[arg(long)]
    geometry: Option<Polyhedron>,

    /// Surface material (phongFlat, phongSmooth, lambert)
    #[arg(long)]
    material: Option<Material>,

    /// Depth at which subdivide requests become no-ops (at most 10)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Subdivide requests to apply before reading commands
    #[arg(long, value_name = "N", default_value_t = 0)]
    subdivide: u32,

    /// Read commands from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Log verbosity (overrides RUST_LOG and the config file)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    apply_overrides(&cli, &mut config);
    config.validate().context("invalid settings")?;

    init_tracing(&cli, &config)?;

    let mut scene = SceneState::from_config(&config).context("building scene")?;
    for _ in 0..cli.subdivide {
        scene.subdivide().context("initial subdivision")?;
    }

    let mut stdout = io::stdout().lock();
    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            run_script(&mut scene, BufReader::new(file), &mut stdout)?
        }
        None => run_script(&mut scene, io::stdin().lock(), &mut stdout)?,
    };
    info!(
        executed = summary.executed,
        rejected = summary.rejected,
        "Command stream finished"
    );

    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &scene.summary())
            .context("writing JSON summary")?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", scene.summary())?;
    }

    Ok(())
}

fn apply_overrides(cli: &Cli, config: &mut ViewerConfig) {
    if let Some(geometry) = cli.geometry {
        config.geometry = geometry;
    }
    if let Some(material) = cli.material {
        config.material = material;
    }
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
}

fn init_tracing(cli: &Cli, config: &ViewerConfig) -> Result<()> {
    let filter = resolve_log_filter(
        cli.log_level,
        std::env::var("RUST_LOG").ok(),
        config.log_level,
    );
    let filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("invalid log filter '{filter}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}
