//! Loader for CUAD-style annotated contract corpora.

use std::path::Path;

use lexguard_core::{CuadFile, Document};
use tracing::info;

use crate::StoreError;

/// Read a CUAD JSON file into one [`Document`] per contract paragraph.
pub fn load_cuad(path: &Path) -> Result<Vec<Document>, StoreError> {
    if !path.exists() {
        return Err(StoreError::InputNotFound(path.to_path_buf()));
    }
    let raw = std::fs::read_to_string(path)?;
    let file: CuadFile = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let contracts = file.data.len();
    let documents = file.into_documents();
    info!(
        path = %path.display(),
        contracts,
        documents = documents.len(),
        "loaded annotated corpus"
    );
    Ok(documents)
}
