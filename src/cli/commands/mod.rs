//! Command implementations for DMI processor CLI
//!
//! Each command is implemented in its own module:
//! - `classify`: classify JSON records and print grouped entities
//! - `schema`: print reflected entity schemas

pub mod classify;
pub mod schema;
pub mod shared;

pub use shared::RunSummary;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner for DMI processor
pub async fn run(args: Args) -> Result<RunSummary> {
    match args.command {
        Some(Commands::Classify(classify_args)) => classify::run_classify(classify_args).await,
        Some(Commands::Schema(schema_args)) => schema::run_schema(schema_args).await,
        None => Err(Error::configuration("No command given".to_string())),
    }
}
