//! CLI error type.

use std::error::Error;
use std::fmt;

use tilecarver::assets::AssetError;
use tilecarver::config::ConfigError;
use tilecarver::export::ExportError;
use tilecarver::{ConfigurationError, MalformedMapError, PlanError};

/// Any failure a command can surface to the user.
#[derive(Debug)]
pub enum CliError {
    /// A required setting is absent from both the CLI and the config file.
    Config(String),

    /// The configuration file could not be handled.
    ConfigFile(ConfigError),

    /// The map description is malformed.
    Map(MalformedMapError),

    /// The map's tileset list is unusable.
    Atlas(ConfigurationError),

    /// An atlas image could not be loaded.
    Asset(AssetError),

    /// The output directory could not be prepared.
    Export(ExportError),

    /// A cell failed to resolve or export.
    Plan(PlanError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Map(e) => write!(f, "{}", e),
            CliError::Atlas(e) => write!(f, "{}", e),
            CliError::Asset(e) => write!(f, "{}", e),
            CliError::Export(e) => write!(f, "{}", e),
            CliError::Plan(e) => write!(f, "{}", e),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::ConfigFile(e) => e.source(),
            CliError::Map(e) => e.source(),
            CliError::Atlas(e) => e.source(),
            CliError::Asset(e) => e.source(),
            CliError::Export(e) => e.source(),
            CliError::Plan(e) => e.source(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<MalformedMapError> for CliError {
    fn from(e: MalformedMapError) -> Self {
        CliError::Map(e)
    }
}

impl From<ConfigurationError> for CliError {
    fn from(e: ConfigurationError) -> Self {
        CliError::Atlas(e)
    }
}

impl From<AssetError> for CliError {
    fn from(e: AssetError) -> Self {
        CliError::Asset(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}

impl From<PlanError> for CliError {
    fn from(e: PlanError) -> Self {
        CliError::Plan(e)
    }
}
