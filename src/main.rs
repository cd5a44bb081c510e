//! chronicle-migrate: one-shot Firestore migration for the chronicle content tree
//!
//! Reads the locale-specific JSON trees (eras → topics → events) and writes
//! them into locale-scoped Firestore collections, one atomic batch per locale.

mod commands;

use anyhow::Result;
use chronicle_migrate::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "chronicle-migrate")]
#[command(about = "Migrate the chronicle JSON tree (eras/topics/events) into Firestore")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "migrate.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the migration for all configured locales (or one)
    Migrate {
        /// Migrate a single locale instead of all configured ones
        #[arg(short, long)]
        locale: Option<String>,

        /// Load and build only; commit nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a default configuration file
    Init {
        /// Where to write the config
        #[arg(default_value = "migrate.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Migrate { locale, dry_run } => {
            let config = if cli.config.exists() {
                Config::load(&cli.config)?
            } else {
                Config::default()
            };
            commands::migrate::run(config, locale, dry_run)
        }
        Commands::Init { path } => commands::init::run(path),
    }
}
