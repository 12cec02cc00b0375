//! The fee pipeline: a synchronous, side-effect-free transformation
//! from scraped entries to deduplicated, categorized, ordered report
//! artifacts. Data flow is strictly linear:
//!
//! raw entries -> Extractor -> Classifier -> Normalizer ->
//! Deduplicator -> Aggregator -> Exporter

pub mod aggregator;
pub mod classifier;
pub mod dedup;
pub mod exporter;
pub mod extractor;
pub mod normalizer;

use serde::{Deserialize, Serialize};

use crate::lookup::{DatabaseFee, FeeQuery};
use crate::taxonomy::Taxonomy;
use aggregator::Aggregator;
use classifier::Classifier;
use dedup::Deduplicator;
use exporter::{Artifacts, Exporter};
use extractor::{Extractor, SourceBatch};
use normalizer::Normalizer;

/// One completed scrape session as handed over by the browser
/// automation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeSession {
    #[serde(default)]
    pub case: Option<FeeQuery>,
    #[serde(default)]
    pub sources: Vec<SourceBatch>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    pub extracted: usize,
    pub skipped: usize,
    pub database_removed: usize,
    pub deduplicated: usize,
    pub buckets: usize,
}

pub struct PipelineOutput {
    pub artifacts: Artifacts,
    pub stats: PipelineStats,
}

/// Runs the six stages over one session. Holds only the immutable
/// taxonomy; no state survives between invocations.
#[derive(Debug, Clone)]
pub struct FeePipeline {
    taxonomy: Taxonomy,
}

impl FeePipeline {
    #[must_use]
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// The database fee, if any, was resolved by an external
    /// collaborator before this call; the pipeline itself never does
    /// I/O.
    #[must_use]
    pub fn run(&self, batches: &[SourceBatch], database_fee: Option<DatabaseFee>) -> PipelineOutput {
        let extraction = Extractor::new().extract(batches);
        let extracted = extraction.mentions.len();
        let skipped = extraction.skipped;

        let classified = Classifier::new(&self.taxonomy).classify_all(extraction.mentions);
        let normalized = Normalizer::new(&self.taxonomy).normalize_all(classified);
        let database_removed = normalized.database_removed;

        let survivors = Deduplicator::new().dedup(normalized.mentions);
        let deduplicated = survivors.len();

        let buckets = Aggregator::new().aggregate(survivors.clone());
        let bucket_count = buckets.len();

        let artifacts = Exporter::new().export(batches, survivors, buckets, database_fee);

        let stats = PipelineStats {
            extracted,
            skipped,
            database_removed,
            deduplicated,
            buckets: bucket_count,
        };
        tracing::info!(
            extracted,
            skipped,
            database_removed,
            deduplicated,
            buckets = bucket_count,
            "pipeline run complete"
        );

        PipelineOutput { artifacts, stats }
    }
}
