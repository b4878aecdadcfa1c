//! Training table I/O: `(text, label)` rows as CSV or Parquet.
//!
//! The format follows the file extension. CSV files carry a header line and
//! no index column; labels are small integer codes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, LargeStringArray, StringArray, UInt8Array};
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use lexguard_core::schema::corpus::{LABEL, TEXT, corpus_schema};
use lexguard_core::{Category, CorpusRow};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::info;

use crate::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Write corpus rows with category codes as labels.
pub fn write_corpus(path: &Path, rows: &[CorpusRow]) -> Result<(), StoreError> {
    let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
    let labels: Vec<u8> = rows.iter().map(|r| r.label.code()).collect();
    write_table(path, &texts, &labels)
}

/// Write `(text, label)` pairs where labels are already integer codes,
/// e.g. model indices after a label-space remap.
pub fn write_table(path: &Path, texts: &[&str], labels: &[u8]) -> Result<(), StoreError> {
    if texts.len() != labels.len() {
        return Err(StoreError::Other(format!(
            "{} texts but {} labels",
            texts.len(),
            labels.len()
        )));
    }
    let format = TableFormat::from_path(path)?;
    let schema: SchemaRef = Arc::new(corpus_schema());
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(texts.to_vec())),
            Arc::new(UInt8Array::from(labels.to_vec())),
        ],
    )?;

    let file = File::create(path)?;
    match format {
        TableFormat::Csv => {
            let mut writer = arrow::csv::WriterBuilder::new()
                .with_header(true)
                .build(BufWriter::new(file));
            writer.write(&batch)?;
            writer.into_inner().flush()?;
        }
        TableFormat::Parquet => {
            let mut writer = ArrowWriter::try_new(file, schema, None)?;
            writer.write(&batch)?;
            writer.close()?;
        }
    }

    info!(path = %path.display(), rows = texts.len(), ?format, "wrote corpus table");
    Ok(())
}

/// Read a corpus table back into rows, validating label codes.
pub fn read_corpus(path: &Path) -> Result<Vec<CorpusRow>, StoreError> {
    let mut rows = Vec::new();
    for batch in read_batches(path)? {
        let texts = batch
            .column_by_name(TEXT)
            .ok_or_else(|| StoreError::Other(format!("missing '{TEXT}' column")))?;
        let labels = batch
            .column_by_name(LABEL)
            .ok_or_else(|| StoreError::Other(format!("missing '{LABEL}' column")))?;
        let labels = labels
            .as_any()
            .downcast_ref::<UInt8Array>()
            .ok_or_else(|| StoreError::Other("label column is not UInt8".into()))?;

        for row in 0..batch.num_rows() {
            let text = get_string(texts.as_ref(), row).unwrap_or_default();
            let code = labels.value(row);
            let label = Category::from_code(code).ok_or(StoreError::InvalidLabel(code))?;
            rows.push(CorpusRow::new(text, label));
        }
    }
    Ok(rows)
}

fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    if !path.exists() {
        return Err(StoreError::InputNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let batches = match TableFormat::from_path(path)? {
        TableFormat::Csv => arrow::csv::ReaderBuilder::new(csv_read_schema())
            .with_header(true)
            .build(file)?
            .collect::<Result<Vec<_>, _>>()?,
        TableFormat::Parquet => ParquetRecordBatchReaderBuilder::try_new(file)?
            .build()?
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(batches)
}

/// CSV has no null marker: an empty `text` field reads back as null, so the
/// reader accepts nulls and [`get_string`] restores them as `""`.
fn csv_read_schema() -> SchemaRef {
    let schema = corpus_schema();
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| {
            let nullable = f.name() == TEXT;
            f.as_ref().clone().with_nullable(nullable)
        })
        .collect();
    Arc::new(Schema::new(fields))
}

fn get_string(col: &dyn Array, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(row).to_string())
        .or_else(|| {
            col.as_any()
                .downcast_ref::<LargeStringArray>()
                .map(|arr| arr.value(row).to_string())
        })
}
