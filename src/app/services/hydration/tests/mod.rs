//! Test entities and helpers for hydration testing
//!
//! The entities declared here cover every field kind: plain, nullable,
//! sum-typed, untyped, list-valued, entity-valued and capability-valued.

use std::sync::Arc;

use super::{Capability, FieldValue, Identifier, Number, Shared};
use crate::entity;

// Test modules
mod hydrator_tests;
mod type_checker_tests;

/// Capability shared by [`Circle`] and [`Square`]
pub struct Shape;

impl Capability for Shape {
    const NAME: &'static str = "Shape";
}

entity! {
    /// A shape with a radius
    pub struct Circle implements [Shape] {
        pub radius: Option<f64> => "radius",
    }
}

entity! {
    pub struct Square implements [Shape] {
        pub side: Option<f64> => "side",
    }
}

entity! {
    /// Declares no capability
    pub struct Label {
        pub text: Option<String> => "text",
    }
}

entity! {
    pub struct Empty {}
}

entity! {
    /// One field of every kind
    pub struct Sample {
        pub name: String => "name",
        pub count: Option<i64> => "count",
        pub ratio: Option<f64> => "ratio",
        pub reading: Option<Number> => "reading",
        pub code: Option<Identifier> => "code",
        pub tags: Vec<String> => "tags",
        pub extra: FieldValue => "extra",
        pub origin: Option<Circle> => "origin",
        pub shape: Option<Shared<Shape>> => "shape",
    }
}

pub fn circle(radius: f64) -> FieldValue {
    FieldValue::Object(Arc::new(Circle {
        radius: Some(radius),
    }))
}

pub fn square(side: f64) -> FieldValue {
    FieldValue::Object(Arc::new(Square { side: Some(side) }))
}

pub fn label(text: &str) -> FieldValue {
    FieldValue::Object(Arc::new(Label {
        text: Some(text.to_string()),
    }))
}

/// Descriptor of a [`Sample`] field by record key
pub fn sample_field(key: &str) -> &'static super::FieldDescriptor {
    use super::Entity;

    Sample::FIELDS
        .iter()
        .find(|descriptor| descriptor.key == key)
        .unwrap_or_else(|| panic!("Sample has no field '{}'", key))
}
