//! Risky-zone extraction from question/answer annotations.
//!
//! Each annotation group whose question matches the keyword table yields one
//! zone per answer span. Zones come out in group order, then answer order;
//! the chunk labeler's tie-break depends on that order.

use std::collections::BTreeMap;

use lexguard_core::{Category, Document, KeywordTable};
use tracing::warn;

/// A character range of a document tagged with a risk category.
///
/// Invariant: `start < end <= document length` (in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskyZone {
    pub start: usize,
    pub end: usize,
    pub category: Category,
}

/// Per-run counters for zone extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneStats {
    /// Zones emitted, by category.
    pub matches: BTreeMap<Category, usize>,
    /// Answer spans dropped for starting past the context or being empty.
    pub dropped: usize,
    /// Answer spans whose end was clipped to the context length.
    pub clipped: usize,
}

impl ZoneStats {
    pub fn merge(&mut self, other: &ZoneStats) {
        for (category, count) in &other.matches {
            *self.matches.entry(*category).or_default() += count;
        }
        self.dropped += other.dropped;
        self.clipped += other.clipped;
    }

    pub fn matches_for(&self, category: Category) -> usize {
        self.matches.get(&category).copied().unwrap_or(0)
    }

    pub fn total_matches(&self) -> usize {
        self.matches.values().sum()
    }
}

/// Extract the risky zones of one document, in discovery order.
pub fn extract_zones(
    document: &Document,
    keywords: &KeywordTable,
    stats: &mut ZoneStats,
) -> Vec<RiskyZone> {
    let len = document.char_len();
    let mut zones = Vec::new();

    for group in &document.groups {
        let Some(category) = keywords.resolve(&group.question) else {
            continue;
        };

        for answer in &group.answers {
            let start = answer.answer_start;
            let span_len = answer.text.chars().count();

            if span_len == 0 || start >= len {
                warn!(
                    document = %document.id,
                    start,
                    span_len,
                    context_len = len,
                    "dropping answer span outside document bounds"
                );
                stats.dropped += 1;
                continue;
            }

            let mut end = start + span_len;
            if end > len {
                warn!(
                    document = %document.id,
                    start,
                    end,
                    context_len = len,
                    "clipping answer span to document length"
                );
                stats.clipped += 1;
                end = len;
            }

            *stats.matches.entry(category).or_default() += 1;
            zones.push(RiskyZone {
                start,
                end,
                category,
            });
        }
    }

    zones
}
