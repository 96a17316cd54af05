//! NutriPlanner CLI - Dish seeding and dashboard inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate a seed file without writing anything
//! nutri-cli seed --file dishes.json --dry-run
//!
//! # Seed the dish collection from a file
//! nutri-cli seed --file dishes.json
//!
//! # Overwrite an already-seeded collection
//! nutri-cli seed --file dishes.json --replace
//!
//! # Print dashboard statistics for the stored orders
//! nutri-cli stats
//! ```
//!
//! # Commands
//!
//! - `seed` - Import dishes from a JSON file into the snapshot store
//! - `stats` - Print the dashboard metrics

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nutri-cli")]
#[command(version, about = "NutriPlanner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import dishes from a JSON seed file
    Seed {
        /// Seed file path; falls back to NUTRIPLANNER_SEED_FILE
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Validate and report without writing to the store
        #[arg(long)]
        dry_run: bool,

        /// Overwrite a dish collection that is already seeded
        #[arg(long)]
        replace: bool,
    },
    /// Print dashboard statistics
    Stats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed {
            file,
            dry_run,
            replace,
        } => commands::seed::dishes(file, dry_run, replace).await?,
        Commands::Stats => commands::stats::print()?,
    }
    Ok(())
}
