//! DMI Processor Library
//!
//! A Rust library for turning Danish Meteorological Institute (DMI) open-data
//! records into strongly-typed weather entities and reorganizing them into
//! query-friendly groupings.
//!
//! This library provides tools for:
//! - Declaring entity schemas once and hydrating them generically from decoded JSON
//! - Checking loosely-typed values against declared field types, including
//!   nullable, sum-typed and capability-typed (interface) fields
//! - Classifying raw observation records by parameter id into concrete entity types
//! - Grouping entities by measurement type, by station, or both
//! - Reporting rejected fields and dropped records instead of hiding them

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod classifier;
        pub mod grouping;
        pub mod hydration;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{Geometry, Measurement, Point, Polygon, Station, TextForecast};
pub use app::services::classifier::{ClassificationTable, ObservationClassifier};
pub use app::services::grouping::{EntityCollection, Grouped};
pub use app::services::hydration::{
    DynEntity, Entity, EntityRef, FieldValue, HydrationReport, RawRecord, TypeTag,
};
pub use config::ProcessorConfig;

/// Result type alias for the DMI processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for hydration, classification and the surrounding CLI
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Input could not be read as a flat key/value record
    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// Discriminator has no entry in the classification table (strict mode only)
    #[error("Unclassifiable record: no entity type registered for '{discriminator}'")]
    UnclassifiableRecord { discriminator: String },

    /// A field value was rejected during hydration (strict mode only)
    #[error("Incompatible value for {entity}.{field}: {reason}")]
    IncompatibleValue {
        entity: String,
        field: String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding or encoding failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a malformed record error
    pub fn malformed_record(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }

    /// Create an unclassifiable record error
    pub fn unclassifiable_record(discriminator: impl Into<String>) -> Self {
        Self::UnclassifiableRecord {
            discriminator: discriminator.into(),
        }
    }

    /// Create an incompatible value error
    pub fn incompatible_value(
        entity: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::IncompatibleValue {
            entity: entity.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
