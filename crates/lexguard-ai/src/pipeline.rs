//! Corpus build: zones, windows, labels, and balancing over a set of documents.
//!
//! Each document is processed independently into a [`DocumentOutcome`];
//! outcomes are merged into the run's [`RunReport`] and row list in document
//! order. Nothing here performs I/O.

use std::collections::BTreeMap;

use lexguard_core::{
    Category, CorpusError, CorpusRow, Document, PipelineConfig, normalize_whitespace,
};
use tracing::info;

use crate::balance::balance;
use crate::chunker::chunks;
use crate::labeler::label_chunks;
use crate::zones::{ZoneStats, extract_zones};

/// Rows and counters produced from one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentOutcome {
    pub rows: Vec<CorpusRow>,
    pub zones: ZoneStats,
}

/// Diagnostics for one corpus build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub documents: usize,
    pub zones: ZoneStats,
    /// Chunks emitted (after the minimum-length filter), before balancing.
    pub chunks: usize,
    /// Chunk labels before balancing.
    pub label_counts: BTreeMap<Category, usize>,
    /// Rows kept by the balancer; `None` until balancing has run.
    pub balanced_rows: Option<usize>,
}

impl RunReport {
    fn absorb(&mut self, outcome: &DocumentOutcome) {
        self.documents += 1;
        self.zones.merge(&outcome.zones);
        self.chunks += outcome.rows.len();
        for row in &outcome.rows {
            *self.label_counts.entry(row.label).or_default() += 1;
        }
    }

    pub fn label_count(&self, category: Category) -> usize {
        self.label_counts.get(&category).copied().unwrap_or(0)
    }

    /// Categories whose zone count is below the number of documents.
    ///
    /// This is expected for most clause types (few contracts contain any
    /// given clause) and is reported, not treated as an error.
    pub fn low_signal(&self, categories: &[Category]) -> Vec<Category> {
        categories
            .iter()
            .copied()
            .filter(|&c| self.zones.matches_for(c) < self.documents)
            .collect()
    }
}

/// Labelled, unbalanced rows for a whole corpus.
#[derive(Debug, Clone, Default)]
pub struct LabelledCorpus {
    pub rows: Vec<CorpusRow>,
    pub report: RunReport,
}

/// Extract zones, window, and label one document.
pub fn process_document(document: &Document, config: &PipelineConfig) -> DocumentOutcome {
    let mut zone_stats = ZoneStats::default();
    let zones = extract_zones(document, &config.keywords, &mut zone_stats);

    let rows = label_chunks(chunks(&document.context, &config.chunking), &zones)
        .map(|chunk| CorpusRow::new(normalize_whitespace(chunk.text), chunk.category))
        .collect();

    DocumentOutcome {
        rows,
        zones: zone_stats,
    }
}

/// Label every document without balancing.
pub fn label_documents(documents: &[Document], config: &PipelineConfig) -> LabelledCorpus {
    let mut corpus = LabelledCorpus::default();
    for document in documents {
        let outcome = process_document(document, config);
        corpus.report.absorb(&outcome);
        corpus.rows.extend(outcome.rows);
    }
    corpus
}

/// Full build: label every document, log diagnostics, then balance.
///
/// Fails with [`CorpusError::EmptyPositiveSet`] when no chunk was labelled
/// risky; callers must not write an artifact in that case.
pub fn build_corpus(
    documents: &[Document],
    config: &PipelineConfig,
) -> Result<LabelledCorpus, CorpusError> {
    let LabelledCorpus { rows, mut report } = label_documents(documents, config);

    info!(
        documents = report.documents,
        zones = report.zones.total_matches(),
        dropped_spans = report.zones.dropped,
        clipped_spans = report.zones.clipped,
        chunks = report.chunks,
        "labelled corpus"
    );
    for (category, count) in &report.zones.matches {
        info!(category = %category, zones = count, "zone matches");
    }
    for (category, count) in &report.label_counts {
        info!(category = %category, chunks = count, "chunk labels");
    }
    for category in report.low_signal(&config.keywords.categories()) {
        info!(
            category = %category,
            zones = report.zones.matches_for(category),
            documents = report.documents,
            "low signal: fewer matches than documents"
        );
    }

    let rows = balance(rows, &config.balance)?;
    report.balanced_rows = Some(rows.len());
    info!(rows = rows.len(), "balanced corpus ready");

    Ok(LabelledCorpus { rows, report })
}
