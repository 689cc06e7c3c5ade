//! Tests for GeoJSON feature reading

use serde_json::json;

use super::super::feature::FeatureReader;
use super::observation_feature;
use crate::app::models::{Point, Polygon};
use crate::app::services::hydration::{FieldValue, RawRecord};
use crate::config::ProcessorConfig;

fn reader() -> FeatureReader {
    FeatureReader::with_default_geometry(&ProcessorConfig::default()).unwrap()
}

#[test]
fn test_properties_are_flattened() {
    let record = RawRecord::from_json(observation_feature("temp_dry", "06180", json!(4.2)), 8)
        .unwrap();
    let flat = reader().read(&record);

    assert!(!flat.contains_key("properties"));
    assert_eq!(flat.get_str("parameterId"), Some("temp_dry"));
    assert_eq!(flat.get_str("stationId"), Some("06180"));
    assert_eq!(flat.get_str("id"), Some("06180-temp_dry"));
}

#[test]
fn test_properties_win_over_siblings() {
    let record = RawRecord::from_json(
        json!({"type": "Feature", "properties": {"type": "Synop"}}),
        8,
    )
    .unwrap();

    assert_eq!(reader().read(&record).get_str("type"), Some("Synop"));
}

#[test]
fn test_point_geometry_is_resolved() {
    let record = RawRecord::from_json(observation_feature("temp_dry", "06180", json!(4.2)), 8)
        .unwrap();
    let flat = reader().read(&record);

    let geometry = flat
        .get("geometry")
        .and_then(FieldValue::as_object)
        .expect("geometry should be an entity");
    assert_eq!(geometry.type_name(), "Point");
    assert!(geometry.implements("Geometry"));
    assert_eq!(
        geometry.downcast_ref::<Point>().and_then(Point::longitude),
        Some(12.6417)
    );
}

#[test]
fn test_polygon_geometry_is_resolved() {
    let record = RawRecord::from_json(
        json!({
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [[[8, 54], [9, 54], [9, 55], [8, 54]]]},
            "properties": {}
        }),
        8,
    )
    .unwrap();

    let entity = reader().resolve_geometry(&record).unwrap();
    assert!(entity.is::<Polygon>());
}

#[test]
fn test_unknown_geometry_stays_raw() {
    let record = RawRecord::from_json(
        json!({"geometry": {"type": "LineString", "coordinates": [[8, 54], [9, 55]]}}),
        8,
    )
    .unwrap();
    let flat = reader().read(&record);

    assert!(reader().resolve_geometry(&record).is_none());
    assert!(flat.get("geometry").and_then(FieldValue::as_map).is_some());
}

#[test]
fn test_null_geometry_passes_through() {
    let record = RawRecord::new().with("geometry", FieldValue::Null).with("value", 1);
    let flat = reader().read(&record);

    assert_eq!(flat.get("geometry"), Some(&FieldValue::Null));
    assert_eq!(flat, record);
}
