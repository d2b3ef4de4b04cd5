//! Init command - initialize configuration file.

use tilecarver::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    // Keep existing settings; only fill in defaults when the file is absent.
    let config = ConfigFile::load().unwrap_or_default();
    config.save()?;

    println!("Configuration file: {}", config_file_path().display());
    println!();
    println!("Edit this file to customize tilecarver settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
