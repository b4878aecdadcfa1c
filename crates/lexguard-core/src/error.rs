use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("no risky rows among {total} labelled chunks; check the keyword table against the corpus questions")]
    EmptyPositiveSet { total: usize },
}
