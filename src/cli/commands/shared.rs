//! Shared components for CLI commands
//!
//! Logging setup, configuration layering and the run summary returned by
//! every command.

use crate::app::services::classifier::ClassificationStats;
use crate::cli::args::ClassifyArgs;
use crate::config::ProcessorConfig;
use crate::{Error, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of input files read
    pub files_processed: usize,
    /// Number of input files that could not be read or decoded
    pub files_failed: usize,
    /// Classification counts across all files
    pub stats: ClassificationStats,
    /// Total processing time
    pub processing_time: Duration,
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the level derived from `-v`/`-q`.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dmi_processor={}", log_level)));

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(args: &ClassifyArgs) -> Result<ProcessorConfig> {
    let mut config = match &args.config_file {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ProcessorConfig::from_file(path)?
        }
        None => ProcessorConfig::default(),
    };

    if let Some(key) = &args.discriminator_key {
        config = config.with_discriminator_key(key.clone());
    }

    if args.strict {
        config = config.with_strict();
    }

    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}
