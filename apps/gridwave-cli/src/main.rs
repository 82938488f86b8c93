use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gridwave_common::{ManipulationMode, RateAdjust};
use gridwave_input::Command;
use gridwave_kernel::{GridAnimator, GridConfig, upload_layout};
use gridwave_render::{DebugTextRenderer, Renderer, pack_constant_buffers};
use gridwave_tools::{FrameStats, GridInspector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridwave-cli", about = "CLI tool for gridwave transform generation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML grid config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of grid cells
    #[arg(long)]
    cells: Option<usize>,

    /// Run the per-cell loop on one thread
    #[arg(long)]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Frame-driving options shared by every subcommand that runs the grid.
#[derive(clap::Args)]
struct RunArgs {
    /// Frames to simulate
    #[arg(short, long, default_value = "60")]
    frames: u64,
    /// Manipulation mode (flat, cos_col, cos_row, cos_col_row, fractal, gravity_well, sphere_map)
    #[arg(short, long)]
    mode: Option<ManipulationMode>,
    /// Rotation rate in degrees per second
    #[arg(short, long, default_value = "45")]
    rate: f32,
    /// Simulated frames per second
    #[arg(long, default_value = "60")]
    fps: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Run frames and print the grid summary and timings
    Simulate {
        #[command(flatten)]
        run: RunArgs,
        /// Cells to list in the frame printout
        #[arg(long, default_value = "8")]
        show: usize,
    },
    /// Inspect one cell after running frames
    Cell {
        #[command(flatten)]
        run: RunArgs,
        /// Cell index
        #[arg(short, long)]
        index: usize,
    },
    /// Print the transform buffer as JSON after running frames
    Dump {
        #[command(flatten)]
        run: RunArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GridConfig::default(),
    };
    if let Some(cells) = cli.cells {
        config.cell_count = cells;
    }
    if cli.sequential {
        config.parallel = false;
    }

    match cli.command {
        Commands::Info => {
            println!("gridwave-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", gridwave_kernel::crate_info());
            println!("render: {}", gridwave_render::crate_info());
            println!("tools: {}", gridwave_tools::crate_info());
            let animator = GridAnimator::new(&config)?;
            println!("{}", GridInspector::summary(&animator));
        }
        Commands::Simulate { run, show } => {
            let (animator, stats) = run_frames(&config, &run)?;
            println!("{}", GridInspector::summary(&animator));
            println!("Update timing: {stats}");
            if let Some(top) = GridInspector::highest_cell(&animator)
                .and_then(|i| GridInspector::inspect_cell(&animator, i))
            {
                println!("Highest: {top}");
            }
            print!(
                "{}",
                DebugTextRenderer::with_max_cells(show).render(animator.buffer())
            );
        }
        Commands::Cell { run, index } => {
            let (animator, _) = run_frames(&config, &run)?;
            let info = GridInspector::inspect_cell(&animator, index).with_context(|| {
                format!(
                    "cell {index} out of range (grid has {} cells)",
                    animator.dims().cell_count()
                )
            })?;
            println!("{info}");
        }
        Commands::Dump { run } => {
            let (animator, _) = run_frames(&config, &run)?;
            let buffer = animator.buffer();
            let records = pack_constant_buffers(buffer);
            let models: Vec<_> = records.iter().map(|r| r.model).collect();
            let doc = serde_json::json!({
                "summary": GridInspector::summary(&animator),
                "view": upload_layout(&buffer.view()),
                "projection": upload_layout(&buffer.projection()),
                "record_bytes": std::mem::size_of_val(records.as_slice()),
                "models": models,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }

    Ok(())
}

/// Build an animator from `config` and drive it for `run.frames` frames.
fn run_frames(config: &GridConfig, run: &RunArgs) -> anyhow::Result<(GridAnimator, FrameStats)> {
    let mut animator = GridAnimator::new(config)?;
    if let Some(mode) = run.mode {
        animator.enqueue(Command::SetManipulationMode(mode));
    }
    animator.enqueue(Command::ModifyRotationRate {
        amount: run.rate,
        adjust: RateAdjust::Increase,
    });

    anyhow::ensure!(run.fps > 0.0, "fps must be positive, got {}", run.fps);
    let mut stats = FrameStats::new(120);
    for frame in 0..run.frames {
        let seconds = frame as f64 / run.fps;
        let rotation = animator.controller().rotation_radians(seconds);
        let start = Instant::now();
        animator.frame(rotation);
        stats.record(start.elapsed());
    }
    tracing::info!(frames = run.frames, mode = %animator.mode(), "simulation finished");
    Ok((animator, stats))
}
