//! Annotated contract documents and the CUAD/SQuAD JSON layout they load from.

use serde::{Deserialize, Serialize};

/// One annotated contract text.
///
/// Character offsets in answer spans count Unicode scalar values, matching
/// the corpus's own convention, not UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `"{title}#{paragraph_index}"` for documents loaded from CUAD.
    pub id: String,
    pub context: String,
    pub groups: Vec<AnnotationGroup>,
}

/// A question-labelled set of answer spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationGroup {
    pub question: String,
    #[serde(default)]
    pub answers: Vec<AnswerSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSpan {
    pub text: String,
    pub answer_start: usize,
}

impl Document {
    pub fn new(id: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context: context.into(),
            groups: Vec::new(),
        }
    }

    /// Append an annotation group (builder style, mostly for tests).
    pub fn with_group(mut self, question: &str, answers: &[(usize, &str)]) -> Self {
        self.groups.push(AnnotationGroup {
            question: question.to_string(),
            answers: answers
                .iter()
                .map(|&(answer_start, text)| AnswerSpan {
                    text: text.to_string(),
                    answer_start,
                })
                .collect(),
        });
        self
    }

    /// Length of the context in characters.
    pub fn char_len(&self) -> usize {
        self.context.chars().count()
    }
}

// ── CUAD / SQuAD v2 file layout ──

/// Top level of a CUAD JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuadFile {
    pub data: Vec<CuadContract>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuadContract {
    #[serde(default)]
    pub title: String,
    pub paragraphs: Vec<CuadParagraph>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuadParagraph {
    pub context: String,
    #[serde(default)]
    pub qas: Vec<AnnotationGroup>,
}

impl CuadFile {
    /// Flatten into one [`Document`] per paragraph, in file order.
    pub fn into_documents(self) -> Vec<Document> {
        let mut documents = Vec::new();
        for contract in self.data {
            for (i, paragraph) in contract.paragraphs.into_iter().enumerate() {
                documents.push(Document {
                    id: format!("{}#{i}", contract.title),
                    context: paragraph.context,
                    groups: paragraph.qas,
                });
            }
        }
        documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "aok_v1.0",
        "data": [
            {
                "title": "ACME_SERVICES_AGREEMENT",
                "paragraphs": [
                    {
                        "context": "This Agreement may be terminated by either party.",
                        "qas": [
                            {
                                "id": "ACME__Termination For Convenience",
                                "question": "Highlight the parts related to \"Termination For Convenience\"",
                                "answers": [{"text": "terminated by either party", "answer_start": 22}],
                                "is_impossible": false
                            },
                            {
                                "id": "ACME__Governing Law",
                                "question": "Governing Law",
                                "answers": [],
                                "is_impossible": true
                            }
                        ]
                    }
                ]
            },
            {
                "title": "BETA_SUPPLY",
                "paragraphs": [
                    {"context": "first", "qas": []},
                    {"context": "second"}
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_cuad_layout() {
        let file: CuadFile = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(file.data.len(), 2);
        assert_eq!(file.version.as_deref(), Some("aok_v1.0"));
        let qas = &file.data[0].paragraphs[0].qas;
        assert_eq!(qas.len(), 2);
        assert_eq!(qas[0].answers[0].answer_start, 22);
        assert!(qas[1].answers.is_empty());
    }

    #[test]
    fn flattens_paragraphs_with_ids() {
        let file: CuadFile = serde_json::from_str(SAMPLE).unwrap();
        let docs = file.into_documents();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["ACME_SERVICES_AGREEMENT#0", "BETA_SUPPLY#0", "BETA_SUPPLY#1"]
        );
        assert_eq!(docs[0].groups.len(), 2);
        assert!(docs[2].groups.is_empty());
    }

    #[test]
    fn missing_context_is_an_error() {
        let json = r#"{"data": [{"title": "X", "paragraphs": [{"qas": []}]}]}"#;
        assert!(serde_json::from_str::<CuadFile>(json).is_err());
    }

    #[test]
    fn char_len_counts_characters() {
        let doc = Document::new("d", "Société €10");
        assert_eq!(doc.char_len(), 11);
        assert!(doc.context.len() > 11);
    }
}
