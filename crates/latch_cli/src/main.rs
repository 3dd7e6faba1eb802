//! Latch CLI
//!
//! Runs scroll area scenarios headlessly:
//!
//! ```text
//! latch run demos/scroll.toml
//! latch run demos/scroll.toml --format json
//! latch check demos/scroll.toml
//! ```

mod runner;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::runner::Session;
use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "latch")]
#[command(author, version, about = "Run scripted scroll area scenarios")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print a snapshot after every step
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Parse a scenario and attach it without running any steps
    Check {
        /// Scenario file
        scenario: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { scenario, format } => cmd_run(scenario, format),
        Commands::Check { scenario } => cmd_check(scenario),
    }
}

fn cmd_run(path: PathBuf, format: Format) -> Result<()> {
    let scenario = Scenario::load(&path)?;
    let snapshots = runner::run(&scenario)?;

    match format {
        Format::Text => {
            for snapshot in &snapshots {
                println!("{snapshot}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&snapshots)?),
    }
    Ok(())
}

fn cmd_check(path: PathBuf) -> Result<()> {
    let scenario = Scenario::load(&path)?;
    let session = Session::start(&scenario)?;
    session.finish();
    println!(
        "{}: ok ({} steps)",
        path.display(),
        scenario.steps.len()
    );
    Ok(())
}
