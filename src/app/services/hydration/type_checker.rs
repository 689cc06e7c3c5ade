//! Value/field compatibility checks
//!
//! A value fits a field when the field is untyped, when the value is null and
//! the field is nullable, or when the value's type set intersects the field's
//! accepted types. No coercion happens here: an integer never satisfies a
//! float-only field.

use super::schema::{FieldDescriptor, TypeConstraint};
use super::value::{FieldValue, TypeTag};
use serde::Serialize;
use std::fmt;

/// Why a value was not assigned to a field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// No value in the record, no current value and the field is not nullable
    Missing,
    /// Explicit null for a non-nullable field
    NullNotAllowed,
    /// The value's type set does not intersect the accepted types
    Incompatible {
        expected: Vec<TypeTag>,
        found: Vec<TypeTag>,
    },
    /// Accepted by type but could not be stored (e.g. mixed list elements)
    Unconvertible { found: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Missing => write!(f, "missing value"),
            Rejection::NullNotAllowed => write!(f, "null not allowed"),
            Rejection::Incompatible { expected, found } => write!(
                f,
                "expected {}, found {}",
                join_tags(expected),
                join_tags(found)
            ),
            Rejection::Unconvertible { found } => write!(f, "cannot convert {}", found),
        }
    }
}

fn join_tags(tags: &[TypeTag]) -> String {
    if tags.is_empty() {
        return "nothing".to_string();
    }
    tags.iter()
        .map(TypeTag::name)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Check a value against a field's declared constraint
pub fn check(descriptor: &FieldDescriptor, value: &FieldValue) -> Result<(), Rejection> {
    let TypeConstraint::Typed { accepts, nullable } = descriptor.constraint else {
        return Ok(());
    };

    if value.is_null() {
        return if nullable {
            Ok(())
        } else {
            Err(Rejection::NullNotAllowed)
        };
    }

    let found = value.type_set();
    if found.iter().any(|tag| accepts.contains(tag)) {
        Ok(())
    } else {
        Err(Rejection::Incompatible {
            expected: accepts.to_vec(),
            found,
        })
    }
}

/// Whether `value` may be assigned to the field described by `descriptor`
pub fn accepts(descriptor: &FieldDescriptor, value: &FieldValue) -> bool {
    check(descriptor, value).is_ok()
}
