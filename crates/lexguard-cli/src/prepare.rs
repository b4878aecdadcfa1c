//! Offline runners: corpus build, corpus stats, and training export.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use lexguard_ai::{RunReport, build_corpus, label_documents};
use lexguard_core::{LabelSpace, PipelineConfig};
use lexguard_store::{TableFormat, load_cuad, read_corpus, write_corpus, write_table};

#[derive(Debug)]
pub struct PrepareStats {
    pub report: RunReport,
    pub elapsed_secs: f64,
}

/// Load → label → balance → write. Nothing is written unless balancing succeeds.
pub fn run_prepare(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
) -> anyhow::Result<PrepareStats> {
    let start = Instant::now();
    TableFormat::from_path(output)?;

    let documents = load_cuad(input).context("loading annotated corpus")?;
    let corpus = build_corpus(&documents, config)?;
    write_corpus(output, &corpus.rows)
        .with_context(|| format!("writing {}", output.display()))?;

    Ok(PrepareStats {
        report: corpus.report,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

/// Label without balancing or writing.
pub fn run_stats(input: &Path, config: &PipelineConfig) -> anyhow::Result<RunReport> {
    let documents = load_cuad(input).context("loading annotated corpus")?;
    Ok(label_documents(&documents, config).report)
}

/// Rewrite a prepared corpus into the model's label space, dropping rows
/// whose category the model does not predict. Returns the rows written.
pub fn run_export(input: &Path, output: &Path, labels: &LabelSpace) -> anyhow::Result<usize> {
    TableFormat::from_path(output)?;
    let rows = read_corpus(input).with_context(|| format!("reading {}", input.display()))?;

    let (texts, indices): (Vec<&str>, Vec<u8>) = labels
        .remap_rows(&rows)
        .map(|(text, index)| (text, index as u8))
        .unzip();
    tracing::info!(
        read = rows.len(),
        kept = texts.len(),
        labels = labels.len(),
        "remapped to model label space"
    );

    write_table(output, &texts, &indices)?;
    Ok(texts.len())
}
