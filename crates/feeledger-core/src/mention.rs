use serde::{Deserialize, Serialize};

/// Where a fee mention was scraped from.
///
/// `CasePage` only exists between extraction and normalization; the
/// normalizer rewrites it to `Updates`, so later stages never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeSource {
    #[serde(rename = "My Summary")]
    MySummary,
    #[serde(rename = "Case Page")]
    CasePage,
    Updates,
    Database,
}

impl FeeSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySummary => "My Summary",
            Self::CasePage => "Case Page",
            Self::Updates => "Updates",
            Self::Database => "Database",
        }
    }

    /// Total mapping from a scraped source label. Missing, empty and
    /// unrecognized labels all resolve to `Updates`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "My Summary" => Self::MySummary,
            "Case Page" => Self::CasePage,
            "Database" => Self::Database,
            _ => Self::Updates,
        }
    }

    /// Retention priority for deduplication: My Summary wins over
    /// Updates. Database mentions never reach the deduplicator.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            Self::MySummary => 0,
            _ => 1,
        }
    }
}

impl std::fmt::Display for FeeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Taxonomy type assigned by the classifier, in table display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Predefined,
    Keys,
    Other,
}

impl FeeType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Predefined => "predefined",
            Self::Keys => "keys",
            Self::Other => "other",
        }
    }

    /// Presentation rank: Predefined buckets before Keys before Other.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Predefined => 1,
            Self::Keys => 2,
            Self::Other => 3,
        }
    }
}

impl std::fmt::Display for FeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical form used for keying: whitespace collapsed, trimmed,
/// lowercased. Display forms are kept separately.
#[must_use]
pub fn canonical(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// One atomic fee mention.
///
/// Created once by the extractor, mutated only by the normalizer
/// (source renaming, reference backfill, approval standardization),
/// read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeMention {
    pub amount: f64,
    pub raw_amount_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Display form; canonical form is derived via [`canonical`].
    pub category: String,
    pub fee_type: FeeType,
    pub reference_sentence: String,
    pub source: FeeSource,
    pub approved: bool,
    pub is_fallback: bool,
    /// Entry-level content, second candidate in the reference fallback
    /// chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Context of the amount this mention was extracted from, third
    /// candidate in the reference fallback chain.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
}

impl FeeMention {
    #[must_use]
    pub fn canonical_category(&self) -> String {
        canonical(&self.category)
    }

    /// The text the classifier scans for keys keywords. Walks the same
    /// chain the normalizer back-fills the reference from (explicit
    /// reference, then entry content, then amount context) so a keyword
    /// in any of them routes the mention the same way the final
    /// reference would.
    #[must_use]
    pub fn reference_text(&self) -> &str {
        if !self.reference_sentence.trim().is_empty() {
            return &self.reference_sentence;
        }
        if let Some(content) = self.content.as_deref() {
            if !content.trim().is_empty() {
                return content;
            }
        }
        &self.context
    }

    /// Amount rounded to whole cents, the numeric component of the
    /// dedup key.
    #[must_use]
    pub fn amount_cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }
}
