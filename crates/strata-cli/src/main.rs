#![forbid(unsafe_code)]
//! `st` — dependency-aware work sequencing.
//!
//! Thin wrapper over `strata-core`: loads a JSON work-item snapshot,
//! analyzes its dependency graph, and renders or schedules. Structured
//! engine errors are caught here and rendered as single-line messages with
//! exit code 1.

mod cmd;
mod graphviz;
mod output;
mod store;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use output::{CliError, OutputMode, render_error};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "strata: dependency-aware work-item sequencing",
    long_about = None
)]
struct Cli {
    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Render the dependency graph",
        long_about = "Render the work-item dependency graph as an ASCII level report, DOT text, or an SVG image.",
        after_help = "EXAMPLES:\n    # ASCII level report\n    st graph\n\n    # DOT text to stdout\n    st graph --format dot\n\n    # SVG via graphviz\n    st graph --format svg --output deps.svg\n\n    # Neighborhood of one item, with analysis sections\n    st graph --focus w-12 --bottlenecks --stats"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        about = "Select the next work item",
        long_about = "Select the next work item: in-progress work first, then the highest-priority ready item.",
        after_help = "EXAMPLES:\n    # Human-readable pick\n    st next\n\n    # Machine-readable output\n    st next --json"
    )]
    Next(cmd::next::NextArgs),
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("STRATA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = cli.output_mode();

    let result = match &cli.command {
        Commands::Graph(args) => cmd::graph::run_graph(args, mode),
        Commands::Next(args) => cmd::next::run_next(args, mode),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Deterministic failures: render once, no retries.
            let cli_err = match err.downcast::<CliError>() {
                Ok(cli_err) => cli_err,
                Err(other) => CliError::new(format!("{other:#}")),
            };
            let _ = render_error(mode, &cli_err);
            ExitCode::FAILURE
        }
    }
}
