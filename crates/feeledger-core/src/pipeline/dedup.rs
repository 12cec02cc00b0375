use std::collections::HashSet;

use crate::mention::{canonical, FeeMention};

/// Identity of a real-world fee mention regardless of source: amount
/// rounded to cents plus canonical category and reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    cents: i64,
    category: String,
    reference: String,
}

impl DedupKey {
    #[must_use]
    pub fn of(mention: &FeeMention) -> Self {
        Self {
            cents: mention.amount_cents(),
            category: canonical(&mention.category),
            reference: canonical(&mention.reference_sentence),
        }
    }
}

/// Collapses mentions sharing a [`DedupKey`], keeping the highest
/// priority source (My Summary before Updates) and, within one
/// source, the first encountered in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator;

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn dedup(&self, mentions: Vec<FeeMention>) -> Vec<FeeMention> {
        let mut ordered = mentions;
        // Stable sort: input order is preserved within each source.
        ordered.sort_by_key(|m| m.source.priority());

        let mut seen = HashSet::new();
        let mut survivors = Vec::with_capacity(ordered.len());

        for mention in ordered {
            let key = DedupKey::of(&mention);
            if seen.insert(key) {
                survivors.push(mention);
            } else {
                tracing::debug!(
                    amount = mention.amount,
                    source = %mention.source,
                    category = %mention.category,
                    "skipping duplicate fee mention"
                );
            }
        }

        survivors
    }
}
