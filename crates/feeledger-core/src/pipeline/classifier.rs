use crate::mention::{FeeMention, FeeType};
use crate::taxonomy::Taxonomy;

/// Reserved bucket key for key-replacement fees.
pub const KEYS_BUCKET_KEY: &str = "keys fee";
/// Display name of the reserved keys bucket.
pub const KEYS_DISPLAY_NAME: &str = "Keys Fee";

/// Assigns each mention a taxonomy type and canonical category.
///
/// The decision order determines table placement and must not be
/// reordered:
/// 1. keys keyword in the category or reference text, taking
///    precedence over everything else;
/// 2. empty or "Other" category;
/// 3. Predefined by elimination. Whitelist membership is not required
///    here; the whitelist only drives approval standardization and
///    upstream styling.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    #[must_use]
    pub fn classify_all(&self, mentions: Vec<FeeMention>) -> Vec<FeeMention> {
        mentions.into_iter().map(|m| self.classify(m)).collect()
    }

    #[must_use]
    pub fn classify(&self, mut mention: FeeMention) -> FeeMention {
        if self.taxonomy.matches_keys(&mention.category)
            || self.taxonomy.matches_keys(mention.reference_text())
        {
            mention.fee_type = FeeType::Keys;
            mention.category = KEYS_DISPLAY_NAME.to_string();
            return mention;
        }

        let canon = mention.canonical_category();
        if canon.is_empty() {
            mention.fee_type = FeeType::Other;
            mention.category = "Other".to_string();
        } else if canon == "other" {
            mention.fee_type = FeeType::Other;
        } else {
            mention.fee_type = FeeType::Predefined;
            mention.category = mention.category.trim().to_string();
        }
        mention
    }
}
