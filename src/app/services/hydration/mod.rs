//! Schema reflection, type checking and generic hydration
//!
//! This module turns loosely-typed records into strongly-typed entities
//! without any per-entity parsing code.
//!
//! ## Architecture
//!
//! - [`value`] - Loosely-typed values and the type tags they carry
//! - [`record`] - Raw records and JSON shape normalization
//! - [`schema`] - Entity schemas, field kinds, capabilities and the `entity!` macro
//! - [`type_checker`] - Value/field compatibility
//! - [`hydrator`] - The generic hydration algorithm
//! - [`report`] - Per-field hydration outcomes
//!
//! ## Usage
//!
//! ```rust
//! use dmi_processor::app::services::hydration::{Entity, RawRecord};
//! use dmi_processor::Station;
//!
//! let record = RawRecord::new()
//!     .with("stationId", "06180")
//!     .with("name", "København Lufthavn")
//!     .with("stationHeight", 5);
//!
//! let hydrated = Station::from_record(&record);
//! assert_eq!(hydrated.entity.station_id, "06180");
//! assert!(hydrated.report.assigned().contains(&"name"));
//! ```

pub mod hydrator;
pub mod record;
pub mod report;
pub mod schema;
pub mod type_checker;
pub mod value;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use hydrator::hydrate;
pub use record::RawRecord;
pub use report::{FieldOutcome, FieldReport, Hydrated, HydrationReport};
pub use schema::{
    Capability, DynEntity, Entity, EntityRef, EntitySchema, FieldDescriptor, FieldKind, Shared,
    TypeConstraint, reflect,
};
pub use type_checker::{Rejection, accepts, check};
pub use value::{FieldValue, Identifier, Number, TypeTag};
