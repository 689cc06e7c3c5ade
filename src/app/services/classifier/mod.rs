//! Record classification for DMI observation payloads
//!
//! Routes raw records to concrete entity types by a discriminator key and
//! hydrates them, keeping count of everything that was dropped.
//!
//! ## Architecture
//!
//! - [`table`] - Immutable discriminator → entity type tables
//! - [`feature`] - GeoJSON feature flattening and geometry resolution
//! - [`observation_classifier`] - Classification of single records and batches
//! - [`stats`] - Classification statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use dmi_processor::ObservationClassifier;
//! use serde_json::json;
//!
//! # fn main() -> dmi_processor::Result<()> {
//! let classifier = ObservationClassifier::with_defaults()?;
//! let result = classifier.classify_json(json!([
//!     {"parameterId": "temp_dry", "stationId": "06180", "value": 4.2},
//!     {"parameterId": "humidity", "stationId": "06180", "value": 91},
//!     {"parameterId": "lightning", "stationId": "06180", "value": 1}
//! ]))?;
//!
//! assert_eq!(result.entities.len(), 2);
//! assert_eq!(result.stats.unclassified, 1);
//! # Ok(())
//! # }
//! ```

pub mod feature;
pub mod observation_classifier;
pub mod stats;
pub mod table;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use feature::FeatureReader;
pub use observation_classifier::{Classified, ObservationClassifier};
pub use stats::{ClassificationResult, ClassificationStats};
pub use table::{ClassificationTable, ClassificationTableBuilder, EntityFactory, Route};
