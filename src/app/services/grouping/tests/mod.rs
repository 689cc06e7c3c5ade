//! Test helpers for grouping tests

use crate::app::models::{Humidity, Temperature, Wind};
use crate::app::services::hydration::{Entity, EntityRef};


pub fn temperature(station: &str, observed: &str) -> EntityRef {
    Temperature {
        station_id: Some(station.to_string()),
        observed: Some(observed.to_string()),
        ..Default::default()
    }
    .into_shared()
}

pub fn humidity(station: &str, observed: &str) -> EntityRef {
    Humidity {
        station_id: Some(station.to_string()),
        observed: Some(observed.to_string()),
        ..Default::default()
    }
    .into_shared()
}

pub fn wind(station: &str, observed: &str) -> EntityRef {
    Wind {
        station_id: Some(station.to_string()),
        observed: Some(observed.to_string()),
        ..Default::default()
    }
    .into_shared()
}

/// Identity of a test entity: type, station and time
pub fn describe(entity: &EntityRef) -> (String, String) {
    use super::Groupable;

    (
        entity.type_tag().to_string(),
        entity
            .key_value("observed")
            .unwrap_or_default(),
    )
}

/// Sorted identities, for multiset comparisons
pub fn multiset<'a>(entities: impl IntoIterator<Item = &'a EntityRef>) -> Vec<(String, String, String)> {
    use super::Groupable;

    let mut items: Vec<_> = entities
        .into_iter()
        .map(|entity| {
            let (kind, observed) = describe(entity);
            (kind, entity.station_id().unwrap_or_default(), observed)
        })
        .collect();
    items.sort();
    items
}
