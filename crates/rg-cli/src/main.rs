//! CLI frontend for the Reality Glitch game.

mod commands;
mod game;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rg",
    about = "Reality Glitch — a text adventure warped by live market and weather data",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive game
    Play {
        /// Print prompt and parser internals while playing
        #[arg(long)]
        debug: bool,
    },

    /// Fetch all data sources once and store the results
    Sync,

    /// Run the background poller (sync on a fixed interval, forever)
    Poll {
        /// Seconds between sync passes (default: RG_SYNC_INTERVAL_SECS or 600)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show the latest stored Bitcoin snapshot
    Btc,

    /// Show the latest stored stock index quotes
    Stocks,

    /// Show the latest stored weather snapshot
    Weather,

    /// List saved games
    Saves,
}

fn main() {
    // .env is optional; a missing file is not an error.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { debug } => commands::play::run(debug),
        Commands::Sync => commands::sync::run(),
        Commands::Poll { interval } => commands::poll::run(interval),
        Commands::Btc => commands::bitcoin::run(),
        Commands::Stocks => commands::stocks::run(),
        Commands::Weather => commands::weather::run(),
        Commands::Saves => commands::saves::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
