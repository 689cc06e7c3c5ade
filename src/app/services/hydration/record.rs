//! Raw records decoded from JSON
//!
//! A [`RawRecord`] is the flat, ordered key/value mapping the hydrator reads
//! from. Shape normalization happens here, before hydration: a list wrapping
//! exactly one object is unwrapped, anything else that is not an object is a
//! malformed record.

use super::value::FieldValue;
use crate::constants::FEATURES_KEY;
use crate::{Error, Result};
use indexmap::IndexMap;
use indexmap::map::Iter;

/// Ordered mapping from upstream field names to loosely-typed values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: IndexMap<String, FieldValue>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a field, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Read a field as text, if it holds a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Deepest nesting of any value in the record
    pub fn depth(&self) -> usize {
        self.fields.values().map(FieldValue::depth).max().unwrap_or(0)
    }

    /// Normalize a decoded JSON value into a single record
    ///
    /// Accepts an object, or an array holding exactly one object. Any other
    /// shape, or a record nested deeper than `max_depth`, is rejected.
    pub fn from_json(value: serde_json::Value, max_depth: usize) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Self::from_object(map, max_depth),
            serde_json::Value::Array(mut items) => {
                if items.len() != 1 {
                    return Err(Error::malformed_record(format!(
                        "expected a single record, found a list of {}",
                        items.len()
                    )));
                }
                match items.pop() {
                    Some(serde_json::Value::Object(map)) => Self::from_object(map, max_depth),
                    Some(other) => Err(Error::malformed_record(format!(
                        "expected an object inside the list, found {}",
                        json_kind(&other)
                    ))),
                    None => Err(Error::malformed_record("empty list")),
                }
            }
            other => Err(Error::malformed_record(format!(
                "expected an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Split a decoded JSON payload into records
    ///
    /// Accepts a GeoJSON feature collection, a list of objects, or a single
    /// object. Each element is normalized independently; the first malformed
    /// element fails the whole payload. Use [`RawRecord::split_json`] to keep
    /// per-element results.
    pub fn many_from_json(value: serde_json::Value, max_depth: usize) -> Result<Vec<Self>> {
        Self::split_json(value, max_depth)?.into_iter().collect()
    }

    /// Split a decoded JSON payload into per-element results
    ///
    /// The outer shape must be a feature collection, a list or an object;
    /// element failures are returned in place so callers can count them.
    pub fn split_json(value: serde_json::Value, max_depth: usize) -> Result<Vec<Result<Self>>> {
        match value {
            serde_json::Value::Array(items) => Ok(items
                .into_iter()
                .map(|item| Self::from_json(item, max_depth))
                .collect()),
            serde_json::Value::Object(mut map) => match map.remove(FEATURES_KEY) {
                Some(serde_json::Value::Array(features)) => Ok(features
                    .into_iter()
                    .map(|item| Self::from_json(item, max_depth))
                    .collect()),
                Some(other) => Err(Error::malformed_record(format!(
                    "'{}' must be a list, found {}",
                    FEATURES_KEY,
                    json_kind(&other)
                ))),
                None => Ok(vec![Self::from_object(map, max_depth)]),
            },
            other => Err(Error::malformed_record(format!(
                "expected an object or a list of objects, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Merge a nested mapping into the record
    ///
    /// Entries of the mapping under `key` are copied into the record and win
    /// over existing fields of the same name. The nested key itself is removed.
    /// Records without a mapping under `key` are returned unchanged.
    pub fn flatten(&self, key: &str) -> RawRecord {
        let Some(nested) = self.get(key).and_then(FieldValue::as_map) else {
            return self.clone();
        };

        let mut flattened = self.clone();
        flattened.remove(key);
        for (nested_key, value) in nested {
            flattened.insert(nested_key.clone(), value.clone());
        }
        flattened
    }

    fn from_object(map: serde_json::Map<String, serde_json::Value>, max_depth: usize) -> Result<Self> {
        let record = Self {
            fields: map
                .into_iter()
                .map(|(key, value)| Ok((key, FieldValue::try_from(value)?)))
                .collect::<Result<_>>()?,
        };

        let depth = record.depth();
        if depth > max_depth {
            return Err(Error::malformed_record(format!(
                "record nests {} levels deep, limit is {}",
                depth, max_depth
            )));
        }

        Ok(record)
    }
}

impl FromIterator<(String, FieldValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<IndexMap<String, FieldValue>> for RawRecord {
    fn from(fields: IndexMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
