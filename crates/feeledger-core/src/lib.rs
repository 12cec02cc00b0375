pub mod error;
pub mod lookup;
pub mod mention;
pub mod pipeline;
pub mod table;
pub mod taxonomy;

pub use error::{Error, Result};
pub use lookup::{DatabaseFee, FeeLookup, FeeQuery, SqliteFeeLookup, STANDARD_LIENHOLDER};
pub use mention::{canonical, FeeMention, FeeSource, FeeType};
pub use pipeline::aggregator::{Aggregator, CategoryBucket};
pub use pipeline::classifier::{Classifier, KEYS_BUCKET_KEY, KEYS_DISPLAY_NAME};
pub use pipeline::dedup::{DedupKey, Deduplicator};
pub use pipeline::exporter::{
    to_json_pretty, Artifacts, Exporter, FlatExport, GroupedExport, RawEntriesExport,
};
pub use pipeline::extractor::{ExtractionOutput, Extractor, RawAmount, RawEntry, SourceBatch};
pub use pipeline::normalizer::{NormalizationOutput, Normalizer};
pub use pipeline::{FeePipeline, PipelineOutput, PipelineStats, ScrapeSession};
pub use table::{FeeTable, TableRow, FEE_TABLE_COLUMNS};
pub use taxonomy::Taxonomy;
