use serde::{Deserialize, Serialize};

use crate::mention::FeeMention;
use crate::pipeline::aggregator::CategoryBucket;

/// Fixed column order of every rendered fee table.
pub const FEE_TABLE_COLUMNS: [&str; 5] = ["Date", "Amount", "Status", "Source", "Reference"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub date: String,
    pub amount: String,
    pub status: String,
    pub source: String,
    pub reference: String,
}

impl TableRow {
    #[must_use]
    pub fn for_mention(mention: &FeeMention) -> Self {
        Self {
            date: mention.date.clone().unwrap_or_default(),
            amount: format!("${:.2}", mention.amount),
            status: if mention.approved { "Yes" } else { "Likely" }.to_string(),
            source: mention.source.as_str().to_string(),
            reference: mention.reference_sentence.clone(),
        }
    }

    /// The single row shown for a bucket with no entries.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            date: String::new(),
            amount: String::new(),
            status: String::new(),
            source: String::new(),
            reference: "No fees recorded".to_string(),
        }
    }
}

/// Renderable form of one category bucket: data only, markup is a
/// downstream concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl FeeTable {
    #[must_use]
    pub fn for_bucket(bucket: &CategoryBucket) -> Self {
        let rows = if bucket.members.is_empty() {
            vec![TableRow::placeholder()]
        } else {
            bucket.members.iter().map(TableRow::for_mention).collect()
        };

        Self {
            title: bucket.display_name.clone(),
            columns: FEE_TABLE_COLUMNS.iter().map(ToString::to_string).collect(),
            rows,
        }
    }
}
