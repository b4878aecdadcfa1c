//! Core types, category tables, Arrow schemas, and shared configuration for LexGuard.

pub mod api;
pub mod category;
pub mod config;
pub mod corpus;
pub mod document;
mod error;
pub mod schema;

pub use api::{AnalysisReport, RiskFinding, SyncResponse, UserSync};
pub use category::{Category, KeywordTable, LabelSpace};
pub use config::{BalancePolicy, ChunkConfig, PipelineConfig};
pub use corpus::{CorpusRow, normalize_whitespace};
pub use document::{AnnotationGroup, AnswerSpan, CuadFile, Document};
pub use error::CorpusError;
