//! Discriminator-driven observation classification
//!
//! Reads a record's discriminator, looks it up in a shared
//! [`ClassificationTable`] and hydrates the routed entity type. Records with
//! unknown discriminators are dropped by default and counted; strict mode
//! turns drops and skipped fields into errors.

use super::feature::FeatureReader;
use super::stats::{ClassificationResult, ClassificationStats};
use super::table::ClassificationTable;
use crate::app::models::default_observation_table;
use crate::app::services::hydration::{EntityRef, HydrationReport, RawRecord};
use crate::config::ProcessorConfig;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// A record hydrated into its routed entity type
#[derive(Debug, Clone)]
pub struct Classified {
    pub discriminator: String,
    pub entity: EntityRef,
    pub report: HydrationReport,
}

/// Why a record produced no entity
enum Dispatch {
    Classified(Classified),
    Unknown(String),
    NoDiscriminator,
}

/// Classifies raw records into observation entities
#[derive(Debug, Clone)]
pub struct ObservationClassifier {
    table: Arc<ClassificationTable>,
    reader: FeatureReader,
    config: ProcessorConfig,
}

impl ObservationClassifier {
    pub fn new(
        table: Arc<ClassificationTable>,
        reader: FeatureReader,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            table,
            reader,
            config,
        }
    }

    /// Classifier over the built-in metObs parameter table
    pub fn from_config(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        let table = Arc::new(default_observation_table(&config.discriminator_key)?);
        let reader = FeatureReader::with_default_geometry(&config)?;
        Ok(Self::new(table, reader, config))
    }

    pub fn with_defaults() -> Result<Self> {
        Self::from_config(ProcessorConfig::default())
    }

    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Classify one record, or `None` if its discriminator is missing or unknown
    pub fn classify(&self, record: &RawRecord) -> Option<Classified> {
        match self.dispatch(record) {
            Dispatch::Classified(classified) => Some(classified),
            Dispatch::Unknown(_) | Dispatch::NoDiscriminator => None,
        }
    }

    /// Classify a batch of records in order
    ///
    /// The output holds exactly one entity per record with a known
    /// discriminator. In strict mode the first dropped record or skipped
    /// field fails the batch.
    pub fn classify_batch<'a>(
        &self,
        records: impl IntoIterator<Item = &'a RawRecord>,
    ) -> Result<ClassificationResult> {
        let mut result = ClassificationResult::default();

        for record in records {
            self.accumulate(record, &mut result)?;
        }

        info!("Classification complete: {}", result.stats.summary());
        Ok(result)
    }

    /// Split a decoded JSON payload and classify every element
    ///
    /// Elements that are not flat records count as malformed and are
    /// skipped, unless the classifier is strict.
    pub fn classify_json(&self, value: serde_json::Value) -> Result<ClassificationResult> {
        let mut result = ClassificationResult::default();

        for element in RawRecord::split_json(value, self.config.max_depth)? {
            match element {
                Ok(record) => self.accumulate(&record, &mut result)?,
                Err(e) if self.config.strict => return Err(e),
                Err(e) => {
                    debug!("Skipping malformed element: {}", e);
                    result.stats.total_records += 1;
                    result.stats.malformed += 1;
                }
            }
        }

        info!("Classification complete: {}", result.stats.summary());
        Ok(result)
    }

    fn accumulate(&self, record: &RawRecord, result: &mut ClassificationResult) -> Result<()> {
        let stats: &mut ClassificationStats = &mut result.stats;
        stats.total_records += 1;

        match self.dispatch(record) {
            Dispatch::Classified(classified) => {
                if self.config.strict {
                    classified.report.ensure_clean()?;
                }
                stats.classified += 1;
                stats.fields_skipped += classified.report.skipped_count();
                result.entities.push(classified.entity);
                result.reports.push(classified.report);
            }
            Dispatch::Unknown(discriminator) => {
                if self.config.strict {
                    return Err(Error::unclassifiable_record(discriminator));
                }
                debug!("Dropping record with unknown discriminator '{}'", discriminator);
                stats.record_unknown(&discriminator);
            }
            Dispatch::NoDiscriminator => {
                if self.config.strict {
                    return Err(Error::malformed_record(format!(
                        "record has no string '{}'",
                        self.table.discriminator_key()
                    )));
                }
                debug!(
                    "Dropping record without '{}'",
                    self.table.discriminator_key()
                );
                stats.unclassified += 1;
            }
        }

        Ok(())
    }

    fn dispatch(&self, record: &RawRecord) -> Dispatch {
        let flat = self.reader.read(record);

        let Some(discriminator) = self.table.discriminator_of(&flat) else {
            return Dispatch::NoDiscriminator;
        };

        match self.table.lookup(discriminator) {
            Some(route) => {
                let hydrated = route.hydrate(&flat);
                Dispatch::Classified(Classified {
                    discriminator: discriminator.to_string(),
                    entity: hydrated.entity,
                    report: hydrated.report,
                })
            }
            None => Dispatch::Unknown(discriminator.to_string()),
        }
    }
}
