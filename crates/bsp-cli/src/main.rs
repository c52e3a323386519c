//! bspgen: generate a room-and-corridor layout and print it
//!
//! Prints the ASCII map followed by a summary line. `--json` swaps the
//! summary for the report as JSON and `--events` dumps the event log.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use bsp_core::{
    ConfigError, GenConfig, GenError, GenRng, Generation, ScatterConfig, TileGrid, generate_bsp,
    scatter_rooms,
};

/// Layout generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Binary space partition with linked subtrees
    Bsp,
    /// Random placement chained in order
    Scatter,
}

/// Generate a dungeon-style layout
#[derive(Parser, Debug)]
#[command(name = "bspgen")]
#[command(author, version, about = "Generate a room and corridor layout", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = 80)]
    width: i32,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = 40)]
    height: i32,

    /// Seed; a random one is picked and logged when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Method::Bsp)]
    method: Method,

    /// Print the report as JSON instead of a summary line
    #[arg(long)]
    json: bool,

    /// Dump the event log as JSON after the map
    #[arg(long)]
    events: bool,

    /// Skip the map
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Generate(#[from] GenError),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn generate(args: &Args, grid: &mut TileGrid, rng: &mut GenRng) -> Result<Generation, CliError> {
    let generation = match args.method {
        Method::Bsp => {
            let config = match &args.config {
                Some(path) => GenConfig::load_from_file(path)?,
                None => GenConfig::default(),
            };
            generate_bsp(grid, &config, rng)?
        }
        Method::Scatter => {
            let config = match &args.config {
                Some(path) => ScatterConfig::load_from_file(path)?,
                None => ScatterConfig::default(),
            };
            scatter_rooms(grid, &config, rng)?
        }
    };
    Ok(generation)
}

fn run(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    let mut rng = match args.seed {
        Some(seed) => GenRng::new(seed),
        None => GenRng::from_entropy(),
    };
    debug!(seed = rng.seed(), method = ?args.method, "starting");

    let mut grid = TileGrid::new(args.width, args.height);
    let generation = generate(args, &mut grid, &mut rng)?;

    if !args.quiet {
        write!(out, "{}", grid.to_ascii())?;
    }

    let report = generation.report;
    if args.json {
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        writeln!(
            out,
            "seed {}: {} rooms, {} corridors, {} corridor cells, {} components",
            rng.seed(),
            report.rooms,
            report.corridors,
            report.corridor_cells,
            report.components
        )?;
    }

    if args.events {
        writeln!(out, "{}", serde_json::to_string_pretty(&generation.events)?)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.verbose))
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "generation failed");
            eprintln!("bspgen: {err}");
            ExitCode::FAILURE
        }
    }
}
