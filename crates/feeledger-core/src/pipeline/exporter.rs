use serde::{Deserialize, Serialize};

use super::aggregator::CategoryBucket;
use super::extractor::SourceBatch;
use crate::lookup::DatabaseFee;
use crate::mention::FeeMention;
use crate::Result;

/// Echo of the scraped input, exported untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntriesExport {
    pub sources: Vec<SourceBatch>,
}

/// The flat deduplicated mention list for structured export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatExport {
    pub mentions: Vec<FeeMention>,
}

/// The classified, grouped report: ordered buckets plus the optional
/// authoritative value, which never appears inside a bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedExport {
    pub buckets: Vec<CategoryBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_fee: Option<DatabaseFee>,
}

/// The three independent output artifacts of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub raw_entries: RawEntriesExport,
    pub records: FlatExport,
    pub report: GroupedExport,
}

/// Serialize one artifact. Output is byte-identical across runs with
/// identical inputs; nothing here generates ids or timestamps.
pub fn to_json_pretty<T: Serialize>(artifact: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(artifact)?)
}

/// Assembles the final artifacts from the upstream stages. Pure
/// assembly, no further filtering or ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter;

impl Exporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn export(
        &self,
        raw: &[SourceBatch],
        mentions: Vec<FeeMention>,
        buckets: Vec<CategoryBucket>,
        database_fee: Option<DatabaseFee>,
    ) -> Artifacts {
        Artifacts {
            raw_entries: RawEntriesExport {
                sources: raw.to_vec(),
            },
            records: FlatExport { mentions },
            report: GroupedExport {
                buckets,
                database_fee,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::{FeeSource, FeeType};

    fn mention() -> FeeMention {
        FeeMention {
            amount: 45.0,
            raw_amount_text: "$45.00".into(),
            date: Some("2024-03-01".into()),
            category: "Field Visit".into(),
            fee_type: FeeType::Predefined,
            reference_sentence: "field visit completed".into(),
            source: FeeSource::MySummary,
            approved: true,
            is_fallback: false,
            content: None,
            context: String::new(),
        }
    }

    fn bucket() -> CategoryBucket {
        CategoryBucket {
            key: "field visit".into(),
            display_name: "Field Visit".into(),
            fee_type: FeeType::Predefined,
            has_entries: true,
            members: vec![mention()],
        }
    }

    #[test]
    fn artifacts_serialize_independently() {
        let artifacts = Exporter::new().export(&[], vec![mention()], vec![bucket()], None);

        let records = to_json_pretty(&artifacts.records).unwrap();
        let report = to_json_pretty(&artifacts.report).unwrap();

        assert!(records.contains("Field Visit"));
        assert!(report.contains("field visit completed"));
        assert!(!report.contains("databaseFee"));
    }

    #[test]
    fn repeated_export_is_byte_identical() {
        let exporter = Exporter::new();
        let a = exporter.export(&[], vec![mention()], vec![bucket()], None);
        let b = exporter.export(&[], vec![mention()], vec![bucket()], None);

        assert_eq!(
            to_json_pretty(&a.records).unwrap(),
            to_json_pretty(&b.records).unwrap()
        );
        assert_eq!(
            to_json_pretty(&a.report).unwrap(),
            to_json_pretty(&b.report).unwrap()
        );
        assert_eq!(
            to_json_pretty(&a.raw_entries).unwrap(),
            to_json_pretty(&b.raw_entries).unwrap()
        );
    }

    #[test]
    fn absent_database_fee_leaves_buckets_untouched() {
        let exporter = Exporter::new();
        let with_none = exporter.export(&[], vec![mention()], vec![bucket()], None);

        assert!(with_none.report.database_fee.is_none());
        assert_eq!(with_none.report.buckets.len(), 1);
        assert_eq!(with_none.report.buckets[0].members.len(), 1);
    }

    #[test]
    fn database_fee_never_joins_a_bucket() {
        let fee = DatabaseFee {
            amount: 300.0,
            lienholder_resolved: "Standard (Standard Fallback)".into(),
            fee_type: "Involuntary Repo".into(),
            is_fallback: true,
            record_id: 7,
        };
        let artifacts = Exporter::new().export(&[], vec![mention()], vec![bucket()], Some(fee));

        assert!(artifacts.report.database_fee.is_some());
        let bucket_total: usize = artifacts
            .report
            .buckets
            .iter()
            .map(|b| b.members.len())
            .sum();
        assert_eq!(bucket_total, 1);
    }
}
