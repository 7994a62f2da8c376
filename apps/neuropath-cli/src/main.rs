use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use neuropath_common::BoundingBox;
use neuropath_maze::{MazeGenerator, MazeSettings};
use neuropath_render::{AsciiRenderer, MazeAnimator, MazeView, Renderer};
use neuropath_tools::MazeInspector;
use tracing_subscriber::EnvFilter;

/// Player collision box (width, height, depth) used for the spawn probe.
const PLAYER_SIZE: glam::Vec3 = glam::Vec3::new(0.3, 1.0, 0.3);

#[derive(Parser)]
#[command(name = "neuropath-cli", about = "CLI tool for neuropath mazes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML settings file (maze size and geometry dimensions)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct MazeArgs {
    /// Screen width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Screen height in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<u32>,
    /// RNG seed; omit for a random maze
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a maze eagerly and print it
    Generate {
        #[command(flatten)]
        maze: MazeArgs,
        /// Do not highlight the solution path
        #[arg(long)]
        no_path: bool,
    },
    /// Drive generation frame by frame, as a game loop would
    Animate {
        #[command(flatten)]
        maze: MazeArgs,
        /// Frames between generation steps
        #[arg(short, long, default_value = "1")]
        frames_per_step: u32,
        /// Print a frame every N frames (0 prints only the final frame)
        #[arg(short, long, default_value = "0")]
        print_every: u64,
        /// Stop after this many frames
        #[arg(long, default_value = "1000000")]
        max_frames: u64,
    },
    /// Generate many mazes with consecutive seeds and verify each one
    Verify {
        #[command(flatten)]
        maze: MazeArgs,
        /// Number of mazes to check
        #[arg(short, long, default_value = "100")]
        runs: u64,
    },
    /// Report collision geometry for a generated maze
    Geometry {
        #[command(flatten)]
        maze: MazeArgs,
        /// Number of boxes of each kind to list
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let settings = match &cli.config {
        Some(path) => MazeSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => MazeSettings::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("neuropath-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("maze: {}", neuropath_maze::crate_info());
            println!("render: {}", neuropath_render::crate_info());
            println!("tools: {}", neuropath_tools::crate_info());
            println!(
                "defaults: {}x{} px, cell {} px",
                settings.maze.width, settings.maze.height, settings.maze.cell_size
            );
        }
        Commands::Generate { maze, no_path } => {
            let mut generator = build(&settings, maze)?;
            generator.generate_to_completion();
            let view = MazeView {
                revealed_path: if no_path { 0 } else { usize::MAX },
                ..MazeView::default()
            };
            print!("{}", AsciiRenderer::new().render(&generator, &view));
            println!("{}", MazeInspector::summary(&generator));
        }
        Commands::Animate {
            maze,
            frames_per_step,
            print_every,
            max_frames,
        } => {
            let mut generator = build(&settings, maze)?;
            let mut animator = MazeAnimator::new(frames_per_step);
            let renderer = AsciiRenderer::new();
            generator.start_generation();

            while !animator.is_finished(&generator) && animator.frame() < max_frames {
                animator.tick(&mut generator);
                if print_every > 0 && animator.frame() % print_every == 0 {
                    println!("--- frame {} ---", animator.frame());
                    print!("{}", renderer.render(&generator, &animator.view()));
                }
            }

            println!("--- final (frame {}) ---", animator.frame());
            print!("{}", renderer.render(&generator, &animator.view()));
            println!("{}", MazeInspector::summary(&generator));
        }
        Commands::Verify { maze, runs } => {
            let first = maze.seed.unwrap_or(0);
            let mut failures = 0u64;
            for seed in first..first.saturating_add(runs) {
                let mut generator = build(
                    &settings,
                    MazeArgs {
                        seed: Some(seed),
                        ..maze
                    },
                )?;
                generator.generate_to_completion();
                if let Err(e) = MazeInspector::verify(&generator) {
                    tracing::error!(seed, "verification failed: {e}");
                    failures += 1;
                }
            }
            println!("Verified {runs} mazes starting at seed {first}: {failures} failures");
            if failures > 0 {
                anyhow::bail!("{failures} of {runs} mazes failed verification");
            }
        }
        Commands::Geometry { maze, limit } => {
            let mut generator = build(&settings, maze)?;
            generator.generate_to_completion();
            let geometry = generator
                .geometry()
                .context("maze did not complete")?;

            println!(
                "Geometry: {} floor boxes, {} wall boxes ({} distinct walls)",
                geometry.floor_boxes().len(),
                geometry.wall_boxes().len(),
                geometry.unique_wall_boxes().count()
            );
            for (i, b) in geometry.floor_boxes().iter().take(limit).enumerate() {
                println!("  floor[{i}] min={} max={}", b.min, b.max);
            }
            for (i, w) in geometry.walls().iter().take(limit).enumerate() {
                println!(
                    "  wall[{i}] cell={} side={:?} min={} max={}",
                    w.cell, w.side, w.bounds.min, w.bounds.max
                );
            }

            let spawn = geometry.spawn_point();
            let player = BoundingBox::from_base(spawn, PLAYER_SIZE);
            println!(
                "Spawn at {spawn}: player box collides={}",
                geometry.collides(&player)
            );
        }
    }

    Ok(())
}

/// Build a generator from settings, with command-line overrides applied.
fn build(settings: &MazeSettings, args: MazeArgs) -> anyhow::Result<MazeGenerator> {
    let mut config = settings.maze;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(cell_size) = args.cell_size {
        config.cell_size = cell_size;
    }

    let generator = match args.seed {
        Some(seed) => MazeGenerator::with_seed(config, seed)?,
        None => MazeGenerator::new(config)?,
    };
    tracing::debug!(?config, seed = ?args.seed, "maze configured");
    Ok(generator.with_geometry(settings.geometry))
}
