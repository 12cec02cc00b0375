use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::mention::canonical;

/// Immutable category configuration consumed by the classifier and
/// the normalizer. Passed explicitly; there is no process-wide
/// category table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TaxonomyConfig")]
pub struct Taxonomy {
    whitelist: BTreeSet<String>,
    keys_keywords: BTreeSet<String>,
}

/// Wire form of a taxonomy; entries are canonicalized on conversion so
/// configuration files may use display casing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaxonomyConfig {
    #[serde(default)]
    whitelist: Vec<String>,
    #[serde(default)]
    keys_keywords: Vec<String>,
}

impl From<TaxonomyConfig> for Taxonomy {
    fn from(config: TaxonomyConfig) -> Self {
        Self::new(config.whitelist, config.keys_keywords)
    }
}

impl Taxonomy {
    /// Build a taxonomy from raw name lists. Entries are canonicalized
    /// so membership checks are case- and whitespace-insensitive.
    #[must_use]
    pub fn new<I, J, S, T>(whitelist: I, keys_keywords: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            whitelist: whitelist
                .into_iter()
                .map(|s| canonical(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
            keys_keywords: keys_keywords
                .into_iter()
                .map(|s| canonical(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Empty taxonomy: every non-empty, non-"Other" category becomes
    /// Predefined by elimination and keys detection never triggers.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The production fee matrix configuration.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            [
                "Field Visit",
                "Flatbed Fees",
                "Dolly Fees",
                "Mileage/ Fuel",
                "Incentive",
                "Frontend",
                "Frontend (for Impound)",
                "LPR Invoulantry Repo",
                "LPR REPOSSESSION",
                "Finder's fee",
                "CR AND PHOTOS FEE",
                "Fuel Surcharge",
                "OTHER",
                "SKIP REPOSSESSION",
                "Bonus",
                "Keys Fee",
                "Key Fee",
                "Involuntary Repo",
                "Voluntary Repo",
                "Recovery Fee",
            ],
            [
                "key fee",
                "keys fee",
                "for key",
                "key charge",
                "keys charge",
                "replacement key",
                "key replacement",
                "spare key",
                "key duplication",
                "key cutting",
                "key made",
                "push to start",
            ],
        )
    }

    /// Whether the canonical form of `category` is on the pre-approved
    /// whitelist. Used for approval standardization and upstream
    /// styling, not for type classification.
    #[must_use]
    pub fn is_whitelisted(&self, category: &str) -> bool {
        self.whitelist.contains(&canonical(category))
    }

    /// Whether `text` contains any keys keyword, case-insensitively.
    /// Always false when the keyword set is empty.
    #[must_use]
    pub fn matches_keys(&self, text: &str) -> bool {
        if self.keys_keywords.is_empty() {
            return false;
        }
        let haystack = canonical(text);
        self.keys_keywords.iter().any(|kw| haystack.contains(kw.as_str()))
    }

    #[must_use]
    pub fn whitelist(&self) -> &BTreeSet<String> {
        &self.whitelist
    }

    #[must_use]
    pub fn keys_keywords(&self) -> &BTreeSet<String> {
        &self.keys_keywords
    }
}
