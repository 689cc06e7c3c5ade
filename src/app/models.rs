//! Data models for DMI open data
//!
//! This module contains the entity declarations for DMI weather station
//! metadata, observations, GeoJSON geometries and text forecasts. Every
//! entity is a thin `entity!` declaration; hydration, type checking and
//! serialization are handled generically.

pub mod forecast;
pub mod geometry;
pub mod observation;
pub mod station;

use crate::app::services::hydration::{Capability, EntitySchema};
use chrono::{DateTime, Utc};

pub use forecast::TextForecast;
pub use geometry::{Point, Polygon, geometry_table};
pub use observation::{
    Cloud, Humidity, LeafMoisture, Precipitation, Pressure, Radiation, Snow, Sunshine,
    Temperature, Visibility, Weather, Wind, default_observation_table,
};
pub use station::Station;

// =============================================================================
// Capabilities
// =============================================================================

/// Capability declared by every observation entity
#[derive(Debug, Clone, Copy)]
pub struct Measurement;

impl Capability for Measurement {
    const NAME: &'static str = "Measurement";
}

/// Capability declared by every GeoJSON geometry entity
///
/// Fields typed `Shared<Geometry>` accept a [`Point`] or a [`Polygon`].
#[derive(Debug, Clone, Copy)]
pub struct Geometry;

impl Capability for Geometry {
    const NAME: &'static str = "Geometry";
}

/// Parse an RFC 3339 timestamp as carried by DMI records
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

// =============================================================================
// Schema Catalog
// =============================================================================

/// Reflected schemas of every built-in entity type
pub fn catalog() -> Vec<EntitySchema> {
    vec![
        EntitySchema::of::<Station>(),
        EntitySchema::of::<Temperature>(),
        EntitySchema::of::<Humidity>(),
        EntitySchema::of::<Pressure>(),
        EntitySchema::of::<Wind>(),
        EntitySchema::of::<Precipitation>(),
        EntitySchema::of::<Sunshine>(),
        EntitySchema::of::<Radiation>(),
        EntitySchema::of::<Visibility>(),
        EntitySchema::of::<Cloud>(),
        EntitySchema::of::<Snow>(),
        EntitySchema::of::<Weather>(),
        EntitySchema::of::<LeafMoisture>(),
        EntitySchema::of::<Point>(),
        EntitySchema::of::<Polygon>(),
        EntitySchema::of::<TextForecast>(),
    ]
}

/// Find a built-in schema by entity name, ignoring case
pub fn find_schema(name: &str) -> Option<EntitySchema> {
    catalog()
        .into_iter()
        .find(|schema| schema.name.eq_ignore_ascii_case(name))
}
