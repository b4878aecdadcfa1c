//! Pipeline configuration: chunk windows, keyword table, and balance policy.

use crate::{CorpusError, KeywordTable};

pub const DEFAULT_CHUNK_SIZE: usize = 1500;
pub const DEFAULT_OVERLAP: usize = 300;
pub const DEFAULT_MIN_CHUNK_LENGTH: usize = 100;
pub const DEFAULT_SAFE_RATIO: usize = 3;
pub const DEFAULT_SEED: u64 = 42;

/// Sliding-window geometry, in characters.
///
/// Construct through [`ChunkConfig::new`] so that `0 < overlap < chunk_size`
/// holds; the stride is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    chunk_size: usize,
    overlap: usize,
    min_chunk_length: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
            min_chunk_length: DEFAULT_MIN_CHUNK_LENGTH,
        }
    }
}

impl ChunkConfig {
    pub fn new(
        chunk_size: usize,
        overlap: usize,
        min_chunk_length: usize,
    ) -> Result<Self, CorpusError> {
        if overlap == 0 || overlap >= chunk_size {
            return Err(CorpusError::InvalidConfig(format!(
                "overlap ({overlap}) must satisfy 0 < overlap < chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
            min_chunk_length,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn min_chunk_length(&self) -> usize {
        self.min_chunk_length
    }

    /// Distance between consecutive window starts.
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

/// How many Safe rows to keep per risky row, and the sampling seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalancePolicy {
    pub safe_ratio: usize,
    pub seed: u64,
}

impl Default for BalancePolicy {
    fn default() -> Self {
        Self {
            safe_ratio: DEFAULT_SAFE_RATIO,
            seed: DEFAULT_SEED,
        }
    }
}

/// Everything a corpus build needs, created at run start and dropped at run end.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub chunking: ChunkConfig,
    pub keywords: KeywordTable,
    pub balance: BalancePolicy,
}
