use crate::mention::{FeeMention, FeeSource};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, Default)]
pub struct NormalizationOutput {
    /// Table-bound mentions; never contains `CasePage` or `Database`
    /// sources.
    pub mentions: Vec<FeeMention>,
    /// Database-sourced mentions stripped from the stream. The
    /// authoritative value travels separately to the exporter.
    pub database_removed: usize,
}

/// Standardizes source labels, approval flags and reference text.
///
/// Guarantees that every surviving mention has a non-empty reference
/// sentence.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> Normalizer<'a> {
    #[must_use]
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    #[must_use]
    pub fn normalize_all(&self, mentions: Vec<FeeMention>) -> NormalizationOutput {
        let mut output = NormalizationOutput::default();

        for mut mention in mentions {
            if mention.source == FeeSource::Database {
                tracing::debug!(
                    amount = mention.amount,
                    "removing database-sourced mention from table stream"
                );
                output.database_removed += 1;
                continue;
            }
            if mention.source == FeeSource::CasePage {
                // Case Page rows are vetted upstream; they count as
                // approved before the source label is rewritten.
                mention.approved = true;
                mention.source = FeeSource::Updates;
            }

            mention.reference_sentence = Self::backfill_reference(&mention);
            mention.approved =
                mention.approved || self.taxonomy.is_whitelisted(&mention.category);

            output.mentions.push(mention);
        }

        output
    }

    /// Reference fallback chain, first non-empty candidate wins:
    /// explicit reference, entry content, amount context, category,
    /// then the literal `"Unknown"`. Total by construction.
    fn backfill_reference(mention: &FeeMention) -> String {
        let candidates = [
            Some(mention.reference_sentence.as_str()),
            mention.content.as_deref(),
            Some(mention.context.as_str()),
            Some(mention.category.as_str()),
        ];

        candidates
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|candidate| !candidate.is_empty())
            .unwrap_or("Unknown")
            .to_string()
    }
}
