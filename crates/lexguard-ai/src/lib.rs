//! Corpus labelling (zones, windows, first-match labels, balancing) and the
//! analysis path: paragraph splitting, ONNX classification, LLM explanations.

pub mod analyze;
pub mod balance;
pub mod chunker;
pub mod classifier;
pub mod explain;
pub mod labeler;
pub mod paragraphs;
pub mod pipeline;
pub mod zones;

#[cfg(feature = "llm")]
mod chat;
#[cfg(feature = "llm")]
pub use chat::{ChatExplainer, DEFAULT_BASE_URL, DEFAULT_MODEL, ExplainError};
#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

pub use analyze::Analyzer;
pub use balance::balance;
pub use chunker::{Chunk, chunks};
pub use classifier::{ClauseClassifier, Prediction};
pub use explain::{ExplainRequest, Explainer};
pub use paragraphs::split_paragraphs;
pub use pipeline::{LabelledCorpus, RunReport, build_corpus, label_documents};
pub use zones::{RiskyZone, ZoneStats, extract_zones};
