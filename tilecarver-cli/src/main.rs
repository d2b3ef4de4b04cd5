//! Tilecarver CLI - Command-line interface
//!
//! This binary provides a command-line interface to the tilecarver library:
//! resolve a map against its atlases and export the tiles, inspect a map,
//! and manage the configuration file.

use std::error::Error as _;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use error::CliError;

#[derive(Debug, Parser)]
#[command(
    name = "tilecarver",
    version = tilecarver::VERSION,
    about = "Resolve orthogonal tile maps against their atlases and export the tiles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a map and export one image per non-empty cell
    Build(commands::build::BuildArgs),

    /// Print a summary of a map without exporting anything
    Inspect {
        /// Path to the map description file
        map: PathBuf,
    },

    /// Initialize the configuration file
    Init,

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Inspect { map } => commands::inspect::run(&map),
        Commands::Init => commands::init::run(),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

/// Route library logs to stderr; `RUST_LOG` overrides the default level.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
