//! Hit CLI - runs declarative HTTP scenario files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod scenario;

#[derive(Parser)]
#[command(name = "hit")]
#[command(about = "Declarative HTTP tests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run scenario files against a live service
    Run {
        /// Scenario files (TOML)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Configuration file (defaults to ./hit.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stop at the first failing scenario
        #[arg(long)]
        fail_fast: bool,
    },
    /// Parse scenario files and print the steps each scenario runs
    Check {
        /// Scenario files (TOML)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Respects RUST_LOG (e.g. RUST_LOG=hit_core=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            files,
            config,
            fail_fast,
        } => commands::run::run(&files, config.as_deref(), fail_fast),
        Commands::Check { files } => commands::check::run(&files),
    }
}
