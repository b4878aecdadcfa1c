use crate::Category;

/// One training example: whitespace-normalised chunk text and its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRow {
    pub text: String,
    pub label: Category,
}

impl CorpusRow {
    pub fn new(text: impl Into<String>, label: Category) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
