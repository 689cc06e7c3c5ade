//! Classification rule tables
//!
//! A table maps many discriminator strings to one entity type. It is built
//! once, validated, and shared read-only (`Arc`) by every classifier that
//! uses it.

use crate::app::services::hydration::{Entity, EntityRef, Hydrated, RawRecord};
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Hydrates a record into a shared entity of one concrete type
pub type EntityFactory = fn(&RawRecord) -> Hydrated<EntityRef>;

/// Target of a discriminator
#[derive(Clone, Copy)]
pub struct Route {
    /// Name of the entity type records are hydrated into
    pub entity: &'static str,
    factory: EntityFactory,
}

impl Route {
    pub fn of<E: Entity>() -> Self {
        Self {
            entity: E::NAME,
            factory: hydrate_shared::<E>,
        }
    }

    /// Hydrate `record` into this route's entity type
    pub fn hydrate(&self, record: &RawRecord) -> Hydrated<EntityRef> {
        (self.factory)(record)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("entity", &self.entity).finish()
    }
}

fn hydrate_shared<E: Entity>(record: &RawRecord) -> Hydrated<EntityRef> {
    E::from_record(record).map(Entity::into_shared)
}

/// Immutable mapping from discriminator values to entity types
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    discriminator_key: String,
    routes: HashMap<String, Route>,
    entity_types: Vec<&'static str>,
}

impl ClassificationTable {
    /// Start a table that reads discriminators from `discriminator_key`
    pub fn builder(discriminator_key: impl Into<String>) -> ClassificationTableBuilder {
        ClassificationTableBuilder {
            discriminator_key: discriminator_key.into(),
            routes: HashMap::new(),
            entity_types: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    pub fn discriminator_key(&self) -> &str {
        &self.discriminator_key
    }

    pub fn lookup(&self, discriminator: &str) -> Option<&Route> {
        self.routes.get(discriminator)
    }

    /// Read the discriminator of a record, if it holds a string
    pub fn discriminator_of<'r>(&self, record: &'r RawRecord) -> Option<&'r str> {
        record.get_str(&self.discriminator_key)
    }

    /// Entity types in registration order
    pub fn entity_types(&self) -> &[&'static str] {
        &self.entity_types
    }

    /// Discriminators routed to `entity`, sorted
    pub fn discriminators_for(&self, entity: &str) -> Vec<&str> {
        let mut discriminators: Vec<&str> = self
            .routes
            .iter()
            .filter(|(_, route)| route.entity == entity)
            .map(|(discriminator, _)| discriminator.as_str())
            .collect();
        discriminators.sort_unstable();
        discriminators
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for [`ClassificationTable`]
#[derive(Debug)]
pub struct ClassificationTableBuilder {
    discriminator_key: String,
    routes: HashMap<String, Route>,
    entity_types: Vec<&'static str>,
    conflicts: Vec<String>,
}

impl ClassificationTableBuilder {
    /// Route every discriminator in `discriminators` to `E`
    pub fn route<E: Entity>(mut self, discriminators: &[&str]) -> Self {
        if !self.entity_types.contains(&E::NAME) {
            self.entity_types.push(E::NAME);
        }

        for discriminator in discriminators {
            match self.routes.get(*discriminator) {
                Some(existing) if existing.entity != E::NAME => {
                    self.conflicts.push(format!(
                        "'{}' routes to both {} and {}",
                        discriminator,
                        existing.entity,
                        E::NAME
                    ));
                }
                Some(_) => {}
                None => {
                    self.routes.insert(discriminator.to_string(), Route::of::<E>());
                }
            }
        }
        self
    }

    /// Validate and freeze the table
    pub fn build(self) -> Result<ClassificationTable> {
        if self.discriminator_key.trim().is_empty() {
            return Err(Error::configuration("discriminator key cannot be empty"));
        }

        if !self.conflicts.is_empty() {
            return Err(Error::configuration(format!(
                "conflicting classification routes: {}",
                self.conflicts.join("; ")
            )));
        }

        Ok(ClassificationTable {
            discriminator_key: self.discriminator_key,
            routes: self.routes,
            entity_types: self.entity_types,
        })
    }
}
