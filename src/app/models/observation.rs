//! Observation entities from the DMI metObs API
//!
//! Every observation shares one field layout; the entity type is decided by
//! the record's parameter id (see [`default_observation_table`]). All of them
//! declare the [`Measurement`] capability.

use super::{Geometry, Measurement};
use crate::Result;
use crate::app::services::classifier::ClassificationTable;
use crate::app::services::hydration::{Number, Shared};
use crate::constants::parameters;

macro_rules! observation {
    ($(#[$meta:meta])* $name:ident) => {
        $crate::entity! {
            $(#[$meta])*
            pub struct $name implements [Measurement] {
                /// Observation UUID
                pub id: Option<String> => "id",
                pub station_id: Option<String> => "stationId",
                pub parameter_id: Option<String> => "parameterId",
                /// Observation time (RFC 3339)
                pub observed: Option<String> => "observed",
                pub created: Option<String> => "created",
                pub value: Option<Number> => "value",
                pub location: Option<Shared<Geometry>> => "geometry",
            }
        }

        impl $name {
            /// Reading as a float, whichever way it was published
            pub fn numeric_value(&self) -> Option<f64> {
                self.value.as_ref().map(Number::as_f64)
            }
        }
    };
}

observation! {
    /// Air, dew point, grass or soil temperature (°C)
    Temperature
}

observation! {
    /// Relative humidity (%)
    Humidity
}

observation! {
    /// Station or sea level pressure (hPa)
    Pressure
}

observation! {
    /// Wind direction (degrees) or speed (m/s)
    Wind
}

observation! {
    /// Precipitation amount (mm) or duration (minutes)
    Precipitation
}

observation! {
    /// Bright sunshine duration (minutes)
    Sunshine
}

observation! {
    /// Global radiation (W/m²)
    Radiation
}

observation! {
    /// Horizontal visibility (m)
    Visibility
}

observation! {
    /// Cloud cover (%) or cloud base height (m)
    Cloud
}

observation! {
    /// Snow depth (cm) or snow cover
    Snow
}

observation! {
    /// Present weather code
    Weather
}

observation! {
    /// Leaf moisture duration (minutes)
    LeafMoisture
}

/// Table routing every known metObs parameter id to its observation type
pub fn default_observation_table(discriminator_key: &str) -> Result<ClassificationTable> {
    ClassificationTable::builder(discriminator_key)
        .route::<Temperature>(parameters::TEMPERATURE)
        .route::<Humidity>(parameters::HUMIDITY)
        .route::<Pressure>(parameters::PRESSURE)
        .route::<Wind>(parameters::WIND)
        .route::<Precipitation>(parameters::PRECIPITATION)
        .route::<Sunshine>(parameters::SUNSHINE)
        .route::<Radiation>(parameters::RADIATION)
        .route::<Visibility>(parameters::VISIBILITY)
        .route::<Cloud>(parameters::CLOUD)
        .route::<Snow>(parameters::SNOW)
        .route::<Weather>(parameters::WEATHER)
        .route::<LeafMoisture>(parameters::LEAF_MOISTURE)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Point;
    use crate::app::services::hydration::{Entity, FieldValue, RawRecord};
    use crate::constants::PARAMETER_ID_KEY;
    use std::sync::Arc;

    #[test]
    fn test_default_table_covers_every_parameter_list() {
        let table = default_observation_table(PARAMETER_ID_KEY).unwrap();

        assert_eq!(table.lookup("temp_dry").map(|r| r.entity), Some("Temperature"));
        assert_eq!(table.lookup("temp_soil_min_past1h").map(|r| r.entity), Some("Temperature"));
        assert_eq!(table.lookup("wind_speed").map(|r| r.entity), Some("Wind"));
        assert_eq!(table.lookup("leav_hum_dur_past1h").map(|r| r.entity), Some("LeafMoisture"));
        assert_eq!(table.entity_types().len(), 12);
        assert_eq!(
            table.discriminators_for("Temperature").len(),
            parameters::TEMPERATURE.len()
        );
        assert!(table.lookup("lightning").is_none());
    }

    #[test]
    fn test_integer_and_float_readings_are_both_accepted() {
        let int_record = RawRecord::new().with("value", 12);
        let float_record = RawRecord::new().with("value", 12.5);

        assert_eq!(Humidity::from_record(&int_record).entity.numeric_value(), Some(12.0));
        assert_eq!(Humidity::from_record(&float_record).entity.numeric_value(), Some(12.5));
    }

    #[test]
    fn test_location_accepts_any_geometry() {
        let point: FieldValue = FieldValue::Object(Arc::new(Point::new(12.5, 55.7)));
        let record = RawRecord::new()
            .with("stationId", "06180")
            .with("geometry", point);

        let wind = Wind::from_record(&record).entity;
        let location = wind.location.expect("location should be assigned");
        assert_eq!(
            location.downcast_ref::<Point>().and_then(Point::latitude),
            Some(55.7)
        );
    }

    #[test]
    fn test_raw_geometry_mapping_is_rejected() {
        let record = RawRecord::from_json(
            serde_json::json!({"geometry": {"type": "Point", "coordinates": [12.5, 55.7]}}),
            8,
        )
        .unwrap();

        let hydrated = Wind::from_record(&record);
        assert!(hydrated.entity.location.is_none());
        assert_eq!(hydrated.report.skipped_count(), 1);
    }
}
