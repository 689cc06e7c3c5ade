//! Generic record-to-entity hydration
//!
//! One algorithm serves every entity type: for each declared field, the
//! record's value wins if present; otherwise the entity's current non-null
//! value is kept; otherwise the field is nulled. Values the type checker
//! rejects are skipped and the field keeps whatever it held before.

use super::record::RawRecord;
use super::report::{FieldOutcome, HydrationReport};
use super::schema::{Entity, FieldDescriptor};
use super::type_checker::{self, Rejection};
use super::value::FieldValue;
use std::borrow::Cow;
use tracing::debug;

/// Where a candidate value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Record,
    Current,
    Absent,
}

/// Hydrate `entity` in place from `record`
///
/// Never fails: rejected fields are listed in the returned report and logged
/// at debug level. Record keys matching no declared field are ignored and
/// listed as unconsumed.
pub fn hydrate<E: Entity>(entity: &mut E, record: &RawRecord) -> HydrationReport {
    let mut report = HydrationReport::new(E::NAME);

    for descriptor in E::FIELDS {
        let outcome = hydrate_field(entity, descriptor, record);
        if let FieldOutcome::Skipped { rejection } = &outcome {
            debug!(
                "Skipped {}.{} ({}): {}",
                E::NAME,
                descriptor.field,
                descriptor.key,
                rejection
            );
        }
        report.record(descriptor.key, outcome);
    }

    report.unconsumed = record
        .keys()
        .filter(|key| !E::FIELDS.iter().any(|descriptor| descriptor.key == *key))
        .map(str::to_string)
        .collect();

    report
}

fn hydrate_field<E: Entity>(
    entity: &mut E,
    descriptor: &FieldDescriptor,
    record: &RawRecord,
) -> FieldOutcome {
    let (value, origin) = match record.get(descriptor.key) {
        Some(value) => (Cow::Borrowed(value), Origin::Record),
        None => match entity.get_field(descriptor.key) {
            Some(current) if !current.is_null() => (Cow::Owned(current), Origin::Current),
            _ => (Cow::Owned(FieldValue::Null), Origin::Absent),
        },
    };

    if let Err(rejection) = type_checker::check(descriptor, &value) {
        let rejection = match (origin, rejection) {
            (Origin::Absent, Rejection::NullNotAllowed) => Rejection::Missing,
            (_, rejection) => rejection,
        };
        return FieldOutcome::Skipped { rejection };
    }

    if origin == Origin::Current {
        return FieldOutcome::Retained;
    }

    if !entity.set_field(descriptor.key, &value) {
        return FieldOutcome::Skipped {
            rejection: Rejection::Unconvertible {
                found: value.kind().to_string(),
            },
        };
    }

    if value.is_null() {
        FieldOutcome::Nulled
    } else {
        FieldOutcome::Assigned
    }
}
