//! Tests for value/field compatibility

use super::super::type_checker::{Rejection, accepts, check};
use super::super::{FieldValue, TypeTag};
use super::{circle, label, sample_field, square};

#[test]
fn test_untyped_field_accepts_anything() {
    let extra = sample_field("extra");

    assert!(accepts(extra, &FieldValue::Null));
    assert!(accepts(extra, &FieldValue::from("text")));
    assert!(accepts(extra, &FieldValue::from(3)));
    assert!(accepts(extra, &FieldValue::List(vec![])));
    assert!(accepts(extra, &circle(1.0)));
}

#[test]
fn test_null_only_fits_nullable_fields() {
    assert!(accepts(sample_field("count"), &FieldValue::Null));
    assert_eq!(
        check(sample_field("name"), &FieldValue::Null),
        Err(Rejection::NullNotAllowed)
    );
}

#[test]
fn test_int_is_not_coerced_to_float() {
    let ratio = sample_field("ratio");

    assert!(accepts(ratio, &FieldValue::from(0.5)));
    assert_eq!(
        check(ratio, &FieldValue::from(2)),
        Err(Rejection::Incompatible {
            expected: vec![TypeTag::Float],
            found: vec![TypeTag::Int],
        })
    );
}

#[test]
fn test_sum_types_accept_each_member() {
    let reading = sample_field("reading");
    assert!(accepts(reading, &FieldValue::from(12)));
    assert!(accepts(reading, &FieldValue::from(12.5)));
    assert!(!accepts(reading, &FieldValue::from("12")));

    let code = sample_field("code");
    assert!(accepts(code, &FieldValue::from("06180")));
    assert!(accepts(code, &FieldValue::from(6180)));
    assert!(!accepts(code, &FieldValue::from(true)));
}

#[test]
fn test_capability_field_accepts_any_implementor() {
    let shape = sample_field("shape");

    assert!(accepts(shape, &circle(2.0)));
    assert!(accepts(shape, &square(3.0)));
    assert!(!accepts(shape, &label("not a shape")));
    assert!(!accepts(shape, &FieldValue::from("circle")));
}

#[test]
fn test_entity_field_accepts_only_its_type() {
    let origin = sample_field("origin");

    assert!(accepts(origin, &circle(1.0)));
    assert!(!accepts(origin, &square(1.0)));
}

#[test]
fn test_container_fields() {
    let tags = sample_field("tags");

    assert!(accepts(tags, &FieldValue::List(vec!["a".into()])));
    assert!(!accepts(tags, &FieldValue::Map(Default::default())));
    assert!(!accepts(tags, &FieldValue::from("a")));
}

#[test]
fn test_rejection_messages() {
    let rejection = check(sample_field("reading"), &FieldValue::from("x")).unwrap_err();
    assert_eq!(rejection.to_string(), "expected int | float, found string");
    assert_eq!(Rejection::NullNotAllowed.to_string(), "null not allowed");
}
