//! # Level Preview
//!
//! Builds one level and prints it to the terminal.
//!
//! ```text
//! level_preview --seed 42 --tiles
//! level_preview --config data/level.toml
//! ```

use std::process::ExitCode;
use std::time::Instant;

use catacomb::procedural::{build_level, LevelConfig, MazeResult, MazeSeed};
use catacomb::{render_grid, render_tiles, tile_legend};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "level_preview")]
#[command(about = "Carve a maze level and print it as text")]
struct Args {
    /// Level config file (TOML); flags below override it
    #[arg(short, long)]
    config: Option<String>,

    /// Width of the level in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the level in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (config or built-in default if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Draw wall tiles instead of the raw grid
    #[arg(short, long)]
    tiles: bool,
}

fn load_config(args: &Args) -> MazeResult<LevelConfig> {
    let mut config = match &args.config {
        Some(path) => LevelConfig::from_toml_file(path)?,
        None => LevelConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = MazeSeed::new(seed);
    }
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║           CATACOMB LEVEL PREVIEW                                 ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Config error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Level {}x{} | seed {} | {}x{} corridors per section",
        config.width,
        config.height,
        config.seed.value(),
        config.section_columns,
        config.section_rows
    );

    let start = Instant::now();
    let maze = match build_level(&config) {
        Ok(maze) => maze,
        Err(err) => {
            eprintln!("Generation failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    println!();
    if args.tiles {
        print!("{}", render_tiles(&maze));
        println!();
        print!("{}", tile_legend(&maze));
    } else {
        print!("{}", render_grid(&maze));
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════════");
    println!(
        "Carved in {:?} | {} open cells",
        elapsed,
        maze.grid().open_cell_count()
    );
    println!("═══════════════════════════════════════════════════════════════════");

    ExitCode::SUCCESS
}
