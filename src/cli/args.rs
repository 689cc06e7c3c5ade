//! Command-line argument definitions for DMI processor
//!
//! This module defines the CLI interface using clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the DMI weather data processor
///
/// Classifies DMI open-data JSON records into typed weather entities and
/// groups them by measurement type and station.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dmi-processor",
    version,
    about = "Classify and group DMI open-data weather records",
    long_about = "Reads DMI metObs JSON payloads (GeoJSON feature collections or plain record \
                  lists), hydrates every record into its typed weather entity by parameter id, \
                  and prints the entities grouped by measurement type, station, or both. \
                  Records and fields that do not fit are counted and reported, not hidden."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the DMI processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Classify records from JSON files and print grouped entities
    Classify(ClassifyArgs),
    /// Print reflected entity schemas
    Schema(SchemaArgs),
}

/// Arguments for the classify command
#[derive(Debug, Clone, Parser)]
pub struct ClassifyArgs {
    /// JSON file, or directory searched recursively for `*.json` files
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// How to group the classified entities
    #[arg(
        short = 'g',
        long = "group-by",
        value_enum,
        default_value = "type",
        help = "Grouping applied to classified entities"
    )]
    pub group_by: GroupBy,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "summary",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Fail on unknown parameter ids, malformed records and rejected fields
    #[arg(long = "strict", help = "Fail instead of skipping records and fields that do not fit")]
    pub strict: bool,

    /// Path to configuration file
    ///
    /// JSON file with processor settings; missing keys take their defaults.
    /// Command-line flags override values from the file.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Override the discriminator key (default "parameterId")
    #[arg(long = "discriminator-key", value_name = "KEY")]
    pub discriminator_key: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the schema command
#[derive(Debug, Clone, Parser)]
pub struct SchemaArgs {
    /// Entity name (case-insensitive); all entities when omitted
    #[arg(value_name = "ENTITY")]
    pub entity: Option<String>,

    /// Only list fields accepting this type (e.g. integer, double, Geometry)
    #[arg(long = "accepts", value_name = "TYPE")]
    pub accepts: Option<String>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "summary",
        help = "Output format for schemas"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Grouping applied by the classify command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    /// Flat list in input order
    None,
    /// By entity type
    Type,
    /// By station id
    Station,
    /// By station, then entity type
    StationType,
    /// Latest entity of each type
    Latest,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// JSON for scripting
    Json,
}

impl ClassifyArgs {
    /// Validate the classify command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(key) = &self.discriminator_key {
            if key.trim().is_empty() {
                return Err(Error::configuration(
                    "Discriminator key cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level(self.verbose)
        }
    }
}

impl SchemaArgs {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose)
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => crate::constants::DEFAULT_LOG_LEVEL,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
