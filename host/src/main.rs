//! Tessera - constraint-propagation puzzle solver.
//!
//! This is the entry point for the `tessera` binary.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tessera_board::{EngineConfig, HostConfig};
use tessera_host::{cell_renderers, format_chain, format_square, HostLoop, HostResult, HostSummary, RunReport};
use tessera_puzzles::{LatinSquare, RelayChain};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tessera", version, about = "Solve puzzles by constraint propagation")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    verbose: bool,

    #[arg(long, global = true, help = "Engine configuration file (TOML)")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Print the result as JSON")]
    json: bool,

    #[command(flatten)]
    pacing: Pacing,
}

#[derive(Args)]
struct Pacing {
    #[arg(long, global = true, help = "Milliseconds of solving per batch")]
    work_ms: Option<u64>,

    #[arg(long, global = true, help = "Milliseconds to sleep between batches")]
    sleep_ms: Option<u64>,

    #[arg(long, global = true, help = "Most commands to execute per batch")]
    max_count: Option<usize>,

    #[arg(long, global = true, help = "Most batches to run")]
    max_batches: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Solve an N×N Latin square")]
    Latin {
        #[arg(short, long, help = "Side length (1-9)")]
        size: usize,

        #[arg(
            short,
            long,
            help = "Givens row by row; '.' or '0' for blanks, '/' between rows"
        )]
        givens: String,

        #[arg(long, help = "Print remaining candidates instead of digits")]
        candidates: bool,
    },

    #[command(about = "Relay a value down a chain of links")]
    Chain {
        #[arg(short, long, help = "Number of links")]
        length: usize,

        #[arg(long, help = "Value held by the head link")]
        value: Option<i64>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> HostResult<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let host = host_loop(config.host, &cli.pacing);
    let json = cli.json;

    match cli.command {
        Commands::Latin {
            size,
            givens,
            candidates,
        } => {
            let mut board = LatinSquare::parse(size, &givens, config.world)?.into_board()?;
            let summary = host.run(&mut board)?;

            let registry = cell_renderers()?;
            let variant = candidates.then_some("candidates");
            let grid = format_square(board.puzzle(), &registry, variant)?;
            if json {
                let report = RunReport::new("latin", board.is_solved(), &grid, summary);
                println!("{}", report.to_json()?);
            } else {
                print_result(&grid, &summary, &board.scheduler().to_string());
            }
        }
        Commands::Chain { length, value } => {
            let mut board = RelayChain::new(length, value, config.world)?.into_board()?;
            let summary = host.run(&mut board)?;

            let grid = format_chain(board.puzzle());
            if json {
                let report = RunReport::new("chain", board.is_solved(), &grid, summary);
                println!("{}", report.to_json()?);
            } else {
                print_result(&grid, &summary, &board.scheduler().to_string());
            }
        }
    }
    Ok(())
}

fn print_result(grid: &str, summary: &HostSummary, scheduler: &str) {
    println!("{}", grid.trim_end());
    println!("{}", summary);
    println!("{}", scheduler);
}

fn host_loop(mut config: HostConfig, pacing: &Pacing) -> HostLoop {
    if let Some(ms) = pacing.work_ms {
        config.work_cycle_ms = ms;
    }
    if let Some(ms) = pacing.sleep_ms {
        config.sleep_cycle_ms = ms;
    }
    if let Some(batches) = pacing.max_batches {
        config.max_batches = Some(batches);
    }

    let host = HostLoop::new(config);
    match pacing.max_count {
        Some(count) => host.with_max_count(count),
        None => host,
    }
}
