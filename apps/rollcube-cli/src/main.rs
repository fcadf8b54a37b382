mod script;

use clap::{Parser, Subcommand};
use rollcube_common::{Direction, GridPos, Settings};
use rollcube_input::InputTracker;
use rollcube_kernel::{RollEvent, RollingCube};
use rollcube_render::{DebugTextRenderer, RenderView, Renderer};
use rollcube_tools::CubeInspector;
use script::Step;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rollcube-cli", about = "Headless rolling cube tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (YAML); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the active settings
    Info,
    /// Drive the engine from an input script and print a trace
    Simulate {
        /// Steps: `+key`, `-key` or a frame count, e.g. "+d 4 -d 4"
        #[arg(short, long)]
        script: String,
        /// Seconds per frame
        #[arg(long, default_value = "0.0625")]
        dt: f32,
        /// Emit one JSON record per frame instead of text
        #[arg(long)]
        json: bool,
    },
}

/// One line of the JSON trace.
#[derive(Serialize)]
struct FrameRecord {
    frame: u64,
    pending: Direction,
    grid: GridPos,
    direction: Direction,
    angle: f32,
    position: [f32; 3],
    rotation: [f32; 4],
}

impl FrameRecord {
    fn capture(cube: &RollingCube, pending: Direction) -> Self {
        let t = cube.transform();
        Self {
            frame: cube.frame(),
            pending,
            grid: cube.grid(),
            direction: cube.active_direction(),
            angle: cube.angle(),
            position: t.position.to_array(),
            rotation: t.rotation.to_array(),
        }
    }
}

fn simulate(settings: &Settings, steps: &[Step], dt: f32, json: bool) -> anyhow::Result<()> {
    let mut tracker = InputTracker::new(settings.keys.clone());
    let mut cube = RollingCube::new(settings.cube);
    let start = cube.grid();
    let renderer = DebugTextRenderer::new();
    let view = RenderView::default();

    for step in steps {
        match step {
            Step::Input(event) => {
                if !tracker.apply(event) {
                    tracing::warn!(?event, "not a movement key");
                }
            }
            Step::Frames(n) => {
                for _ in 0..*n {
                    let pending = tracker.pending_direction();
                    cube.update(dt, pending);
                    if json {
                        println!("{}", serde_json::to_string(&FrameRecord::capture(&cube, pending))?);
                    }
                }
            }
        }
        if !json {
            print!("{}", renderer.render(&cube, &view));
        }
    }

    let completed: Vec<RollEvent> = cube
        .events()
        .iter()
        .filter(|e| matches!(e, RollEvent::TurnCompleted { .. }))
        .copied()
        .collect();

    if json {
        for event in &completed {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        println!("Completed turns: {}", completed.len());
        for event in &completed {
            if let RollEvent::TurnCompleted {
                direction,
                from,
                to,
            } = event
            {
                println!("  {direction}: {from} -> {to}");
            }
        }
        println!("{}", CubeInspector::summary(&cube));
        println!(
            "Replay: {}",
            if RollEvent::replay(start, cube.events()) == cube.grid() {
                "OK"
            } else {
                "MISMATCH"
            }
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("rollcube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", rollcube_input::crate_info());
            println!("render: {}", rollcube_render::crate_info());
            println!("tools: {}", rollcube_tools::crate_info());
            println!("--- settings ---");
            print!("{}", serde_yaml::to_string(&settings)?);
        }
        Commands::Simulate { script, dt, json } => {
            let steps = script::parse(&script)?;
            tracing::debug!(steps = steps.len(), dt, "simulating");
            simulate(&settings, &steps, dt, json)?;
        }
    }

    Ok(())
}
