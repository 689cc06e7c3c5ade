//! Test fixtures for classifier testing
//!
//! Payloads mirror the shape of DMI metObs `collections/observation/items`
//! responses.

use serde_json::{Value, json};

use crate::app::services::hydration::RawRecord;

mod feature_tests;
mod stats_tests;

/// One observation feature as published by the metObs API
pub fn observation_feature(parameter_id: &str, station_id: &str, value: Value) -> Value {
    json!({
        "type": "Feature",
        "id": format!("{}-{}", station_id, parameter_id),
        "geometry": {"type": "Point", "coordinates": [12.6417, 55.614]},
        "properties": {
            "parameterId": parameter_id,
            "stationId": station_id,
            "observed": "2024-03-01T12:00:00Z",
            "created": "2024-03-01T12:05:12Z",
            "value": value
        }
    })
}

/// A flat (non-GeoJSON) observation record
pub fn flat_observation(parameter_id: &str, station_id: &str, value: f64) -> RawRecord {
    RawRecord::new()
        .with("parameterId", parameter_id)
        .with("stationId", station_id)
        .with("value", value)
}

/// Five observations, two of them with parameter ids no table knows
pub fn mixed_batch() -> Vec<RawRecord> {
    vec![
        flat_observation("temp_dry", "06180", 4.2),
        flat_observation("lightning_strikes", "06180", 3.0),
        flat_observation("humidity", "06180", 91.0),
        flat_observation("ozone", "06030", 41.0),
        flat_observation("wind_speed", "06030", 7.5),
    ]
}
