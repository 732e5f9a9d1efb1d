//! Arbor CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Structural code graph for multi-language projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Project root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the project and build the full code graph
    Scan {
        /// Glob patterns to exclude from the scan
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Incrementally update the graph for changed files
    Update {
        /// Glob patterns to exclude from the scan
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Analyze the blast radius of changing a module or file
    Impact {
        /// Module name or file path (substring match as a fallback)
        target: String,
        /// Maximum traversal depth for transitive dependants
        #[arg(long, default_value = "3")]
        depth: u32,
    },
    /// Show the state of the persisted graph
    Status,
    /// Remove the persisted graph artifacts
    Clear,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "arbor={log_level},arbor_core={log_level},arbor_indexer={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let root = cli
        .root
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("cannot resolve directory '{}': {e}", cli.root.display()))?;

    match cli.command {
        Commands::Scan { exclude } => commands::scan(&root, &exclude),
        Commands::Update { exclude } => commands::update(&root, &exclude),
        Commands::Impact { target, depth } => commands::impact(&root, &target, depth),
        Commands::Status => commands::status(&root),
        Commands::Clear => commands::clear(&root),
    }
}
