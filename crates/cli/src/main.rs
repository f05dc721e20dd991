//! WaveLink CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run billing database migrations
//! wl-cli migrate
//!
//! # Seed the database with demo customers for a month
//! wl-cli seed --month 2024-06
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with demo customers

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wl-cli")]
#[command(author, version, about = "WaveLink Billing CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo customers
    Seed {
        /// Billing month to seed (YYYY-MM)
        #[arg(short, long)]
        month: String,
    },
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { month } => commands::seed::run(&month).await?,
    }
    Ok(())
}
