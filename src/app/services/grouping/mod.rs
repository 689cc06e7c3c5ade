//! Grouping of hydrated entities
//!
//! Reorganizes an ordered collection of entities into views keyed by entity
//! type, by station id, or by station then type. A single-level grouping
//! that produces exactly one bucket collapses to that bucket's flat list.
//!
//! ## Usage
//!
//! ```rust
//! use dmi_processor::app::services::grouping::{Grouped, group_by_type};
//! use dmi_processor::app::models::{Humidity, Temperature};
//! use dmi_processor::Entity;
//!
//! let entities = vec![
//!     Temperature::default().into_shared(),
//!     Humidity::default().into_shared(),
//!     Temperature::default().into_shared(),
//! ];
//!
//! match group_by_type(entities) {
//!     Grouped::Keyed(buckets) => {
//!         assert_eq!(buckets["Temperature"].len(), 2);
//!         assert_eq!(buckets["Humidity"].len(), 1);
//!     }
//!     Grouped::Flat(_) => unreachable!("two types never collapse"),
//! }
//! ```

pub mod collection;
pub mod engine;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use collection::EntityCollection;
pub use engine::{
    Groupable, Grouped, group_by_station, group_by_station_and_type, group_by_station_key,
    group_by_station_key_and_type, group_by_type, only_first_by_type,
};
