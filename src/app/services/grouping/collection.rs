//! Ordered entity collections

use super::engine::{
    Groupable, Grouped, group_by_station_key, group_by_station_key_and_type, group_by_type,
    only_first_by_type,
};
use crate::constants::STATION_ID_KEY;
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Reverse;

/// An ordered collection of entities with grouping views
///
/// Grouping clones entities out of the collection; with `EntityRef` items
/// that is a reference count bump.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct EntityCollection<T> {
    entities: Vec<T>,
    #[serde(skip)]
    station_key: String,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> EntityCollection<T> {
    pub fn new(entities: Vec<T>) -> Self {
        Self {
            entities,
            station_key: STATION_ID_KEY.to_string(),
        }
    }

    /// Group stations by a different record key
    pub fn with_station_key(mut self, key: impl Into<String>) -> Self {
        self.station_key = key.into();
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn push(&mut self, entity: T) {
        self.entities.push(entity);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entities
    }

    pub fn into_inner(self) -> Vec<T> {
        self.entities
    }
}

impl<T: Groupable + Clone> EntityCollection<T> {
    pub fn group_by_type(&self) -> Grouped<T> {
        group_by_type(self.entities.iter().cloned())
    }

    pub fn group_by_station(&self) -> Grouped<T> {
        group_by_station_key(self.entities.iter().cloned(), &self.station_key)
    }

    pub fn group_by_station_and_type(&self) -> IndexMap<String, Grouped<T>> {
        group_by_station_key_and_type(self.entities.iter().cloned(), &self.station_key)
    }

    pub fn only_first_by_type(&self) -> IndexMap<String, T> {
        only_first_by_type(self.entities.iter().cloned())
    }

    /// Latest entity of each type by observation time
    pub fn latest_by_type(&self) -> IndexMap<String, T> {
        let mut sorted = self.clone();
        sorted.sort_by_recency();
        sorted.only_first_by_type()
    }

    /// Entities of one type, in order
    pub fn of_type(&self, type_tag: &str) -> Vec<&T> {
        self.entities
            .iter()
            .filter(|entity| entity.type_tag() == type_tag)
            .collect()
    }
}

impl<T: Groupable> EntityCollection<T> {
    /// Order newest first; entities without a parsable time go last
    ///
    /// The sort is stable, so ties keep their input order.
    pub fn sort_by_recency(&mut self) {
        self.entities
            .sort_by_cached_key(|entity| Reverse(entity.observed_at()));
    }
}

impl<T> From<Vec<T>> for EntityCollection<T> {
    fn from(entities: Vec<T>) -> Self {
        Self::new(entities)
    }
}

impl<T> FromIterator<T> for EntityCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for EntityCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
