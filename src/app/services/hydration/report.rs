//! Per-field hydration outcomes

use super::type_checker::Rejection;
use crate::{Error, Result};
use serde::Serialize;

/// What happened to one declared field during hydration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// A non-null value was taken from the record
    Assigned,
    /// The record had no value; the entity's current value was kept
    Retained,
    /// The field was set to null
    Nulled,
    /// The field was left untouched
    Skipped { rejection: Rejection },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub key: &'static str,
    #[serde(flatten)]
    pub outcome: FieldOutcome,
}

/// Outcome of hydrating one entity from one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrationReport {
    pub entity: &'static str,
    pub fields: Vec<FieldReport>,
    /// Record keys that matched no declared field
    pub unconsumed: Vec<String>,
}

impl HydrationReport {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            fields: Vec::new(),
            unconsumed: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, key: &'static str, outcome: FieldOutcome) {
        self.fields.push(FieldReport { key, outcome });
    }

    /// Outcome recorded for a field key
    pub fn outcome(&self, key: &str) -> Option<&FieldOutcome> {
        self.fields
            .iter()
            .find(|report| report.key == key)
            .map(|report| &report.outcome)
    }

    /// Keys assigned from the record
    pub fn assigned(&self) -> Vec<&'static str> {
        self.keys_where(|outcome| matches!(outcome, FieldOutcome::Assigned))
    }

    /// Keys that kept their current value
    pub fn retained(&self) -> Vec<&'static str> {
        self.keys_where(|outcome| matches!(outcome, FieldOutcome::Retained))
    }

    /// Keys left untouched, with the reason
    pub fn skipped(&self) -> Vec<(&'static str, &Rejection)> {
        self.fields
            .iter()
            .filter_map(|report| match &report.outcome {
                FieldOutcome::Skipped { rejection } => Some((report.key, rejection)),
                _ => None,
            })
            .collect()
    }

    pub fn skipped_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|report| matches!(report.outcome, FieldOutcome::Skipped { .. }))
            .count()
    }

    /// True when no field was skipped
    pub fn is_clean(&self) -> bool {
        self.skipped_count() == 0
    }

    /// Fail with the first skipped field, if any
    pub fn ensure_clean(&self) -> Result<()> {
        match self.skipped().first() {
            Some((key, rejection)) => Err(Error::incompatible_value(
                self.entity,
                *key,
                rejection.to_string(),
            )),
            None => Ok(()),
        }
    }

    fn keys_where(&self, predicate: impl Fn(&FieldOutcome) -> bool) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|report| predicate(&report.outcome))
            .map(|report| report.key)
            .collect()
    }
}

/// A hydrated entity together with its report
#[derive(Debug, Clone)]
pub struct Hydrated<E> {
    pub entity: E,
    pub report: HydrationReport,
}

impl<E> Hydrated<E> {
    pub fn new(entity: E, report: HydrationReport) -> Self {
        Self { entity, report }
    }

    pub fn into_entity(self) -> E {
        self.entity
    }

    /// Transform the entity, keeping the report
    pub fn map<U>(self, f: impl FnOnce(E) -> U) -> Hydrated<U> {
        Hydrated {
            entity: f(self.entity),
            report: self.report,
        }
    }
}
