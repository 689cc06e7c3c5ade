//! Tests for classification statistics

use serde_json::json;

use super::super::ObservationClassifier;
use super::super::stats::ClassificationStats;

#[test]
fn test_success_rate() {
    let stats = ClassificationStats {
        total_records: 8,
        classified: 6,
        unclassified: 2,
        ..Default::default()
    };

    assert_eq!(stats.success_rate(), 75.0);
    assert!(!stats.is_lossless());
    assert_eq!(ClassificationStats::new().success_rate(), 0.0);
}

#[test]
fn test_merge_adds_counts() {
    let mut first = ClassificationStats::new();
    first.total_records = 3;
    first.classified = 2;
    first.record_unknown("ozone");

    let mut second = ClassificationStats::new();
    second.total_records = 2;
    second.classified = 1;
    second.malformed = 1;
    second.record_unknown("ozone");
    second.record_unknown("pollen");

    first.merge(&second);

    assert_eq!(first.total_records, 5);
    assert_eq!(first.classified, 3);
    assert_eq!(first.unclassified, 3);
    assert_eq!(first.malformed, 1);
    assert_eq!(first.unknown_discriminators["ozone"], 2);
    assert_eq!(first.unknown_discriminators["pollen"], 1);
}

#[test]
fn test_summary_mentions_every_count() {
    let stats = ClassificationStats {
        total_records: 4,
        classified: 2,
        unclassified: 1,
        malformed: 1,
        fields_skipped: 3,
        ..Default::default()
    };

    assert_eq!(
        stats.summary(),
        "4 records: 2 classified, 1 unclassified, 1 malformed, 3 fields skipped (50.0%)"
    );
}

#[test]
fn test_result_merge_keeps_input_order() {
    let classifier = ObservationClassifier::with_defaults().unwrap();
    let mut combined = classifier
        .classify_json(json!([{"parameterId": "temp_dry", "stationId": "06180", "value": 1.5}]))
        .unwrap();
    let second = classifier
        .classify_json(json!([
            {"parameterId": "humidity", "stationId": "06030", "value": 80},
            {"parameterId": "ozone", "stationId": "06030", "value": 12}
        ]))
        .unwrap();

    combined.merge(second);

    assert_eq!(combined.entities.len(), 2);
    assert_eq!(combined.reports.len(), 2);
    assert_eq!(combined.entities[0].type_name(), "Temperature");
    assert_eq!(combined.reports[1].entity, "Humidity");
    assert_eq!(combined.stats.total_records, 3);
    assert_eq!(combined.stats.unknown_discriminators["ozone"], 1);
}
