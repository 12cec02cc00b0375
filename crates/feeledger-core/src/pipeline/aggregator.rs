use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::classifier::{KEYS_BUCKET_KEY, KEYS_DISPLAY_NAME};
use crate::mention::{FeeMention, FeeType};

/// An ordered, typed group of fee mentions sharing a canonical
/// category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    /// Lowercase canonical name; `"keys fee"` is reserved.
    pub key: String,
    /// First-seen casing of the category.
    pub display_name: String,
    pub fee_type: FeeType,
    /// Buckets built here always hold at least one member; renderers
    /// may construct an [`CategoryBucket::empty`] bucket to
    /// force-display a reserved category.
    pub has_entries: bool,
    pub members: Vec<FeeMention>,
}

impl CategoryBucket {
    /// A memberless bucket for renderers that always show a reserved
    /// category. The aggregator itself never produces one.
    #[must_use]
    pub fn empty(key: impl Into<String>, display_name: impl Into<String>, fee_type: FeeType) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            fee_type,
            has_entries: false,
            members: Vec::new(),
        }
    }
}

/// Groups deduplicated mentions into lazily created category buckets
/// and orders them for presentation: Predefined before Keys before
/// Other, then display name case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator;

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn aggregate(&self, mentions: Vec<FeeMention>) -> Vec<CategoryBucket> {
        let mut buckets: Vec<CategoryBucket> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for mention in mentions {
            // Every Keys mention lands in the reserved bucket no
            // matter what its original label was.
            let (key, display_name) = if mention.fee_type == FeeType::Keys {
                (KEYS_BUCKET_KEY.to_string(), KEYS_DISPLAY_NAME.to_string())
            } else {
                (mention.canonical_category(), mention.category.clone())
            };

            let slot = *index.entry(key.clone()).or_insert_with(|| {
                buckets.push(CategoryBucket {
                    key,
                    display_name,
                    fee_type: mention.fee_type,
                    has_entries: true,
                    members: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].members.push(mention);
        }

        buckets.sort_by(|a, b| {
            a.fee_type
                .rank()
                .cmp(&b.fee_type.rank())
                .then_with(|| {
                    a.display_name
                        .to_lowercase()
                        .cmp(&b.display_name.to_lowercase())
                })
                .then_with(|| a.display_name.cmp(&b.display_name))
        });

        tracing::debug!(buckets = buckets.len(), "aggregation complete");
        buckets
    }
}
