//! GeoJSON feature reading
//!
//! DMI endpoints return GeoJSON features: the record's own fields sit under
//! `properties` and its position under `geometry`. The reader flattens the
//! properties into the record and replaces the geometry mapping with a
//! hydrated geometry entity so capability-typed fields can accept it.

use super::table::ClassificationTable;
use crate::Result;
use crate::app::models::geometry_table;
use crate::app::services::hydration::{EntityRef, FieldValue, RawRecord};
use crate::config::ProcessorConfig;
use std::sync::Arc;
use tracing::debug;

/// Normalizes GeoJSON features into flat records
#[derive(Debug, Clone)]
pub struct FeatureReader {
    geometry: Arc<ClassificationTable>,
    properties_key: String,
    geometry_key: String,
}

impl FeatureReader {
    pub fn new(geometry: Arc<ClassificationTable>, config: &ProcessorConfig) -> Self {
        Self {
            geometry,
            properties_key: config.properties_key.clone(),
            geometry_key: config.geometry_key.clone(),
        }
    }

    /// Reader resolving `Point` and `Polygon` geometries
    pub fn with_default_geometry(config: &ProcessorConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(geometry_table()?), config))
    }

    /// Flatten a feature into a record ready for hydration
    ///
    /// Property values win over sibling keys of the same name. Records that
    /// are not features pass through with only the geometry resolved.
    pub fn read(&self, record: &RawRecord) -> RawRecord {
        let mut flat = record.flatten(&self.properties_key);

        if let Some(geometry) = self.resolve_geometry(record) {
            flat.insert(self.geometry_key.clone(), FieldValue::Object(geometry));
        }

        flat
    }

    /// Hydrate the geometry mapping of a record, if its type is known
    ///
    /// Unknown geometry types are left as raw mappings and will be reported
    /// as skipped by any capability-typed field they reach.
    pub fn resolve_geometry(&self, record: &RawRecord) -> Option<EntityRef> {
        let mapping = record.get(&self.geometry_key).and_then(FieldValue::as_map)?;
        let geometry = RawRecord::from(mapping.clone());

        let Some(route) = self
            .geometry
            .discriminator_of(&geometry)
            .and_then(|kind| self.geometry.lookup(kind))
        else {
            debug!(
                "Unresolved geometry type: {:?}",
                geometry.get(self.geometry.discriminator_key())
            );
            return None;
        };

        Some(route.hydrate(&geometry).entity)
    }
}
