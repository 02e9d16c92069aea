//! Recollect CLI — the main entry point.
//!
//! Commands:
//! - `seed`  — Populate a data directory with demo content
//! - `query` — Run one retrieval against a data directory
//! - `stats` — Show store entry counts and on-disk sizes

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "recollect",
    about = "Recollect — budgeted context retrieval for conversational agents",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory holding facts.json, archive.jsonl and state.jsonl
    #[arg(short, long, global = true, default_value = ".recollect")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate the data directory with a small demo corpus
    Seed,

    /// Select a context block for a query
    Query {
        /// The incoming user message
        query: String,

        /// Retrieval profile: focus, explore, chat or audit
        #[arg(short, long)]
        profile: Option<String>,

        /// Active mode tag to bias scoring (e.g. "R")
        #[arg(short, long)]
        mode: Option<String>,

        /// Resonance level in [0, 1] accompanying the mode tag
        #[arg(short, long)]
        resonance: Option<f32>,
    },

    /// Show entry counts and file sizes for every store
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Seed => commands::seed::run(&cli.data_dir)?,
        Commands::Query {
            query,
            profile,
            mode,
            resonance,
        } => commands::query::run(&cli.data_dir, &query, profile.as_deref(), mode, resonance)?,
        Commands::Stats => commands::stats::run(&cli.data_dir)?,
    }

    Ok(())
}
