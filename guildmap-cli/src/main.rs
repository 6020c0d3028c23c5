//! Guildmap CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the map editor server
//! - new: Write a blank map snapshot
//! - edit: Paint cells in a snapshot file
//! - show: Summarize a snapshot
//! - route: Plan a route across a snapshot
//! - benchmark: Time route searches on random maps

mod benchmark;
mod edit;
mod route;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "guildmap")]
#[command(about = "Guild map editor and route planner")]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the map editor server
    Serve(server::ServerArgs),
    /// Write a blank map snapshot
    New(edit::NewArgs),
    /// Paint cells in a snapshot file
    Edit(edit::EditArgs),
    /// Summarize a snapshot
    Show(route::ShowArgs),
    /// Plan a route across a snapshot
    Route(route::RouteArgs),
    /// Time route searches on random maps
    Benchmark(benchmark::BenchmarkArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::New(args) => edit::run_new(args),
        Commands::Edit(args) => edit::run_edit(args),
        Commands::Show(args) => route::run_show(args),
        Commands::Route(args) => route::run_route(args),
        Commands::Benchmark(args) => benchmark::run(args, cli.seed),
    }
}

/// RUST_LOG wins when set; otherwise info, or debug with --verbose
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
