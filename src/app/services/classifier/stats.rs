//! Classification statistics and result structures

use crate::app::services::hydration::{EntityRef, HydrationReport};
use indexmap::IndexMap;
use serde::Serialize;

/// Entities produced from one batch, with per-record reports and statistics
#[derive(Debug, Clone, Default)]
pub struct ClassificationResult {
    /// Hydrated entities in input order
    pub entities: Vec<EntityRef>,

    /// Hydration report of each entity, aligned with `entities`
    pub reports: Vec<HydrationReport>,

    pub stats: ClassificationStats,
}

impl ClassificationResult {
    /// Append another result, keeping input order
    pub fn merge(&mut self, other: ClassificationResult) {
        self.entities.extend(other.entities);
        self.reports.extend(other.reports);
        self.stats.merge(&other.stats);
    }
}

/// Record counts for a classification run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationStats {
    /// Records seen, including malformed ones
    pub total_records: usize,

    /// Records hydrated into an entity
    pub classified: usize,

    /// Records with a missing or unknown discriminator
    pub unclassified: usize,

    /// Elements that were not representable as flat records
    pub malformed: usize,

    /// Fields skipped across all hydrated entities
    pub fields_skipped: usize,

    /// Unknown discriminator values and how often each was dropped
    pub unknown_discriminators: IndexMap<String, usize>,
}

impl ClassificationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_unknown(&mut self, discriminator: &str) {
        self.unclassified += 1;
        *self
            .unknown_discriminators
            .entry(discriminator.to_string())
            .or_insert(0) += 1;
    }

    /// Calculate classification rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.classified as f64 / self.total_records as f64) * 100.0
        }
    }

    /// True when nothing was dropped or skipped
    pub fn is_lossless(&self) -> bool {
        self.unclassified == 0 && self.malformed == 0 && self.fields_skipped == 0
    }

    /// Add the counts of another run
    pub fn merge(&mut self, other: &ClassificationStats) {
        self.total_records += other.total_records;
        self.classified += other.classified;
        self.unclassified += other.unclassified;
        self.malformed += other.malformed;
        self.fields_skipped += other.fields_skipped;
        for (discriminator, count) in &other.unknown_discriminators {
            *self
                .unknown_discriminators
                .entry(discriminator.clone())
                .or_insert(0) += count;
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} records: {} classified, {} unclassified, {} malformed, {} fields skipped ({:.1}%)",
            self.total_records,
            self.classified,
            self.unclassified,
            self.malformed,
            self.fields_skipped,
            self.success_rate()
        )
    }
}
