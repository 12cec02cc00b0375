use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::mention::{FeeMention, FeeSource, FeeType};

/// One scraped dollar amount with its surrounding text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAmount {
    /// Amount text as scraped, e.g. `"$1,234.56"`.
    pub amount: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub fee_type: Option<String>,
    #[serde(default)]
    pub is_explicitly_approved: bool,
}

/// One scraped update or summary row, possibly carrying several
/// amounts. Nothing but the amount text is mandatory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    #[serde(default, alias = "feeLabel")]
    pub label: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reference_sentence: Option<String>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub amounts: Vec<RawAmount>,
}

/// The raw entries scraped from one source, tagged with its label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBatch {
    pub source: String,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionOutput {
    pub mentions: Vec<FeeMention>,
    /// Entries dropped for unparsable or non-positive amounts.
    pub skipped: usize,
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([0-9][0-9,]*(?:\.[0-9]{1,2})?)").expect("amount pattern is valid")
    })
}

/// Turns raw per-source entries into atomic fee mentions, one per
/// amount. Amounts that cannot be resolved to a positive numeric
/// value are dropped here with a warning and never reach later
/// stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor;

impl Extractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn extract(&self, batches: &[SourceBatch]) -> ExtractionOutput {
        let mut output = ExtractionOutput::default();

        for batch in batches {
            let source = FeeSource::from_label(&batch.source);

            for entry in &batch.entries {
                let first_context = entry
                    .amounts
                    .first()
                    .map(|a| a.context.trim().to_string())
                    .unwrap_or_default();

                for raw in &entry.amounts {
                    let Some(value) = Self::parse_amount(&raw.amount) else {
                        tracing::warn!(
                            amount = %raw.amount,
                            source = %source,
                            "dropping fee mention with unparsable amount"
                        );
                        output.skipped += 1;
                        continue;
                    };
                    if value <= 0.0 {
                        tracing::debug!(amount = value, "skipping non-positive amount");
                        output.skipped += 1;
                        continue;
                    }

                    let context = if raw.context.trim().is_empty() {
                        first_context.clone()
                    } else {
                        raw.context.trim().to_string()
                    };

                    output.mentions.push(FeeMention {
                        amount: value,
                        raw_amount_text: raw.amount.clone(),
                        date: entry.date.clone().filter(|d| !d.trim().is_empty()),
                        category: raw
                            .fee_type
                            .clone()
                            .or_else(|| entry.label.clone())
                            .unwrap_or_default(),
                        // Assigned by the classifier.
                        fee_type: FeeType::Other,
                        reference_sentence: entry
                            .reference_sentence
                            .clone()
                            .unwrap_or_default(),
                        source,
                        approved: entry.is_approved || raw.is_explicitly_approved,
                        is_fallback: false,
                        content: entry.content.clone().filter(|c| !c.trim().is_empty()),
                        context,
                    });
                }
            }
        }

        tracing::debug!(
            extracted = output.mentions.len(),
            skipped = output.skipped,
            "extraction complete"
        );
        output
    }

    /// Pull the first numeric value out of scraped amount text.
    /// Currency symbols and thousands separators are tolerated.
    #[must_use]
    pub fn parse_amount(text: &str) -> Option<f64> {
        let captures = amount_pattern().find(text)?;
        captures.as_str().replace(',', "").parse::<f64>().ok()
    }
}
