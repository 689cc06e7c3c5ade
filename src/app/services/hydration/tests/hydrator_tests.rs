//! Tests for the generic hydrator

use super::super::report::FieldOutcome;
use super::super::type_checker::Rejection;
use super::super::{Entity, FieldValue, Identifier, Number, RawRecord, hydrate};
use super::{Circle, Sample, Square, circle, label, square};
use crate::Error;

fn full_record() -> RawRecord {
    RawRecord::new()
        .with("name", "sample")
        .with("count", 3)
        .with("ratio", 0.25)
        .with("reading", 12)
        .with("code", "06180")
        .with("tags", FieldValue::List(vec!["a".into(), "b".into()]))
        .with("extra", true)
        .with("origin", circle(1.0))
        .with("shape", square(2.0))
}

#[test]
fn test_assigns_every_compatible_field() {
    let hydrated = Sample::from_record(&full_record());
    let sample = hydrated.entity;

    assert_eq!(sample.name, "sample");
    assert_eq!(sample.count, Some(3));
    assert_eq!(sample.ratio, Some(0.25));
    assert_eq!(sample.reading, Some(Number::Int(12)));
    assert_eq!(sample.code, Some(Identifier::Text("06180".to_string())));
    assert_eq!(sample.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(sample.extra, FieldValue::Bool(true));
    assert_eq!(sample.origin, Some(Circle { radius: Some(1.0) }));

    let shape = sample.shape.expect("shape should be assigned");
    assert_eq!(shape.type_name(), "Square");
    assert_eq!(shape.downcast_ref::<Square>().and_then(|s| s.side), Some(2.0));

    assert!(hydrated.report.is_clean());
    assert_eq!(hydrated.report.assigned().len(), Sample::FIELDS.len());
}

#[test]
fn test_absent_nullable_fields_are_nulled() {
    let record = RawRecord::new().with("name", "only name");
    let hydrated = Sample::from_record(&record);

    assert_eq!(hydrated.entity.count, None);
    assert_eq!(hydrated.entity.shape, None);
    assert_eq!(hydrated.report.outcome("count"), Some(&FieldOutcome::Nulled));
    assert_eq!(hydrated.report.outcome("extra"), Some(&FieldOutcome::Nulled));
}

#[test]
fn test_absent_fields_keep_current_values() {
    let mut sample = Sample {
        count: Some(7),
        ..Default::default()
    };

    let report = hydrate(&mut sample, &RawRecord::new().with("ratio", 1.5));

    assert_eq!(sample.count, Some(7));
    assert_eq!(sample.ratio, Some(1.5));
    assert_eq!(report.outcome("count"), Some(&FieldOutcome::Retained));
    assert!(report.retained().contains(&"name"));
}

#[test]
fn test_rejected_value_leaves_field_untouched() {
    let mut sample = Sample {
        ratio: Some(1.5),
        ..Default::default()
    };

    let report = hydrate(&mut sample, &RawRecord::new().with("ratio", "high"));

    assert_eq!(sample.ratio, Some(1.5));
    let skipped = report.skipped();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].0, "ratio");
    assert!(matches!(skipped[0].1, Rejection::Incompatible { .. }));
}

#[test]
fn test_integer_for_float_field_is_skipped() {
    let hydrated = Sample::from_record(&RawRecord::new().with("ratio", 2));

    assert_eq!(hydrated.entity.ratio, None);
    assert_eq!(hydrated.report.skipped_count(), 1);
}

#[test]
fn test_explicit_null_overwrites_nullable_field() {
    let mut sample = Sample {
        count: Some(9),
        ..Default::default()
    };

    let report = hydrate(&mut sample, &RawRecord::new().with("count", FieldValue::Null));

    assert_eq!(sample.count, None);
    assert_eq!(report.outcome("count"), Some(&FieldOutcome::Nulled));
}

#[test]
fn test_explicit_null_for_required_field_is_skipped() {
    let mut sample = Sample {
        name: "kept".to_string(),
        ..Default::default()
    };

    let report = hydrate(&mut sample, &RawRecord::new().with("name", FieldValue::Null));

    assert_eq!(sample.name, "kept");
    assert_eq!(
        report.outcome("name"),
        Some(&FieldOutcome::Skipped {
            rejection: Rejection::NullNotAllowed
        })
    );
}

#[test]
fn test_capability_field_rejects_other_entities() {
    let record = RawRecord::new().with("shape", label("flat"));
    let hydrated = Sample::from_record(&record);

    assert!(hydrated.entity.shape.is_none());
    assert!(matches!(
        hydrated.report.outcome("shape"),
        Some(FieldOutcome::Skipped {
            rejection: Rejection::Incompatible { .. }
        })
    ));
}

#[test]
fn test_capability_field_accepts_each_implementor() {
    for (value, expected) in [(circle(1.0), "Circle"), (square(1.0), "Square")] {
        let hydrated = Sample::from_record(&RawRecord::new().with("shape", value));
        let shape = hydrated.entity.shape.expect("shape should be assigned");
        assert_eq!(shape.type_name(), expected);
        assert!(shape.implements("Shape"));
    }
}

#[test]
fn test_mixed_list_is_unconvertible() {
    let record = RawRecord::new().with("tags", FieldValue::List(vec!["a".into(), 1.into()]));
    let hydrated = Sample::from_record(&record);

    assert!(hydrated.entity.tags.is_empty());
    assert_eq!(
        hydrated.report.outcome("tags"),
        Some(&FieldOutcome::Skipped {
            rejection: Rejection::Unconvertible {
                found: "list".to_string()
            }
        })
    );
}

#[test]
fn test_unknown_keys_are_reported_not_assigned() {
    let record = full_record().with("colour", "red").with("weight", 4);
    let hydrated = Sample::from_record(&record);

    assert!(hydrated.report.is_clean());
    assert_eq!(hydrated.report.unconsumed, vec!["colour", "weight"]);
}

#[test]
fn test_ensure_clean_reports_first_skipped_field() {
    let record = RawRecord::new().with("count", "three").with("ratio", "high");
    let hydrated = Sample::from_record(&record);

    match hydrated.report.ensure_clean() {
        Err(Error::IncompatibleValue { entity, field, .. }) => {
            assert_eq!(entity, "Sample");
            assert_eq!(field, "count");
        }
        other => panic!("expected incompatible value error, got {:?}", other),
    }
}

#[test]
fn test_hydrated_map_keeps_report() {
    let hydrated = Circle::from_record(&RawRecord::new().with("radius", 2.0));
    let shared = hydrated.map(Entity::into_shared);

    assert_eq!(shared.entity.type_name(), "Circle");
    assert_eq!(shared.report.entity, "Circle");
    assert!(shared.report.is_clean());
}
