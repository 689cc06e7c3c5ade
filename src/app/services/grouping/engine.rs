//! Grouping of entities by type, by station, or both
//!
//! Every function makes one pass over its input and keeps buckets in
//! first-occurrence order. No entity is dropped or duplicated, except by
//! [`only_first_by_type`], which keeps one per type by design of its
//! contract.

use crate::app::models::parse_timestamp;
use crate::app::services::hydration::{Entity, EntityRef, FieldValue};
use crate::constants::{NO_STATION, OBSERVED_KEY, STATION_ID_KEY};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Read access the grouping engine needs from an entity
pub trait Groupable {
    /// Concrete entity type name
    fn type_tag(&self) -> &'static str;

    /// Text form of a field usable as a group key
    fn key_value(&self, key: &str) -> Option<String>;

    /// Station identifier, if the entity carries one
    fn station_id(&self) -> Option<String> {
        self.key_value(STATION_ID_KEY)
    }

    /// Observation time parsed from the `observed` field (RFC 3339)
    fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.key_value(OBSERVED_KEY)
            .as_deref()
            .and_then(parse_timestamp)
    }
}

impl<E: Entity> Groupable for E {
    fn type_tag(&self) -> &'static str {
        E::NAME
    }

    fn key_value(&self, key: &str) -> Option<String> {
        self.get_field(key).as_ref().and_then(key_text)
    }
}

impl Groupable for EntityRef {
    fn type_tag(&self) -> &'static str {
        self.type_name()
    }

    fn key_value(&self, key: &str) -> Option<String> {
        self.field_value(key).as_ref().and_then(key_text)
    }
}

fn key_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::String(s) => Some(s.clone()),
        FieldValue::Int(i) => Some(i.to_string()),
        _ => None,
    }
}

/// Result of a single-level grouping
///
/// Exactly one bucket collapses to its flat contents; zero or several
/// buckets stay keyed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Grouped<T> {
    Flat(Vec<T>),
    Keyed(IndexMap<String, Vec<T>>),
}

impl<T> Grouped<T> {
    /// Apply the single-bucket collapse rule
    pub fn from_buckets(mut buckets: IndexMap<String, Vec<T>>) -> Self {
        if buckets.len() == 1 {
            if let Some((_, bucket)) = buckets.pop() {
                return Grouped::Flat(bucket);
            }
        }
        Grouped::Keyed(buckets)
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, Grouped::Flat(_))
    }

    pub fn as_flat(&self) -> Option<&[T]> {
        match self {
            Grouped::Flat(entities) => Some(entities),
            Grouped::Keyed(_) => None,
        }
    }

    pub fn as_keyed(&self) -> Option<&IndexMap<String, Vec<T>>> {
        match self {
            Grouped::Flat(_) => None,
            Grouped::Keyed(buckets) => Some(buckets),
        }
    }

    /// Number of entities across all buckets
    pub fn entity_count(&self) -> usize {
        match self {
            Grouped::Flat(entities) => entities.len(),
            Grouped::Keyed(buckets) => buckets.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// All entities, bucket by bucket
    pub fn into_entities(self) -> Vec<T> {
        match self {
            Grouped::Flat(entities) => entities,
            Grouped::Keyed(buckets) => buckets.into_values().flatten().collect(),
        }
    }
}

pub(crate) fn bucket<T>(
    entities: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> String,
) -> IndexMap<String, Vec<T>> {
    let mut buckets: IndexMap<String, Vec<T>> = IndexMap::new();
    for entity in entities {
        buckets.entry(key(&entity)).or_default().push(entity);
    }
    buckets
}

pub(crate) fn station_key<T: Groupable>(entity: &T, key: &str) -> String {
    entity
        .key_value(key)
        .unwrap_or_else(|| NO_STATION.to_string())
}

/// Partition by concrete entity type
pub fn group_by_type<T: Groupable>(entities: impl IntoIterator<Item = T>) -> Grouped<T> {
    Grouped::from_buckets(bucket(entities, |entity| entity.type_tag().to_string()))
}

/// Partition by station id; entities without one share the `""` bucket
pub fn group_by_station<T: Groupable>(entities: impl IntoIterator<Item = T>) -> Grouped<T> {
    group_by_station_key(entities, STATION_ID_KEY)
}

/// Partition by the field stored under `key`
pub fn group_by_station_key<T: Groupable>(
    entities: impl IntoIterator<Item = T>,
    key: &str,
) -> Grouped<T> {
    Grouped::from_buckets(bucket(entities, |entity| station_key(entity, key)))
}

/// Partition by station, then by type within each station
///
/// The outer level is never collapsed; each station's inner grouping is
/// collapsed on its own.
pub fn group_by_station_and_type<T: Groupable>(
    entities: impl IntoIterator<Item = T>,
) -> IndexMap<String, Grouped<T>> {
    group_by_station_key_and_type(entities, STATION_ID_KEY)
}

pub fn group_by_station_key_and_type<T: Groupable>(
    entities: impl IntoIterator<Item = T>,
    key: &str,
) -> IndexMap<String, Grouped<T>> {
    bucket(entities, |entity| station_key(entity, key))
        .into_iter()
        .map(|(station, members)| (station, group_by_type(members)))
        .collect()
}

/// First entity of each type, in input order
///
/// Sort by recency first if "first" should mean "latest".
pub fn only_first_by_type<T: Groupable>(entities: impl IntoIterator<Item = T>) -> IndexMap<String, T> {
    let mut firsts: IndexMap<String, T> = IndexMap::new();
    for entity in entities {
        firsts
            .entry(entity.type_tag().to_string())
            .or_insert(entity);
    }
    firsts
}
