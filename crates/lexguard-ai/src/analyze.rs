//! Document analysis: split, classify, and explain flagged paragraphs.

use lexguard_core::{AnalysisReport, Category, RiskFinding};
use tracing::{info, warn};

use crate::classifier::ClauseClassifier;
use crate::explain::{ExplainRequest, Explainer};
use crate::paragraphs::split_paragraphs;

/// A user rule must be longer than this to count.
pub const MIN_RULE_CHARS: usize = 5;

/// Only the first paragraphs are checked against a user rule when the
/// classifier found nothing risky in them.
pub const RULE_CHECK_LIMIT: usize = 20;

pub const STANDARD_EXPLANATION: &str = "Standard clause.";
pub const UNAVAILABLE_EXPLANATION: &str = "AI Analysis unavailable.";

/// Holds the model and explainer for the lifetime of a service.
pub struct Analyzer<C, E> {
    classifier: C,
    explainer: E,
}

impl<C: ClauseClassifier, E: Explainer> Analyzer<C, E> {
    pub fn new(classifier: C, explainer: E) -> Self {
        Self {
            classifier,
            explainer,
        }
    }

    /// Analyse one document given its extracted page texts.
    ///
    /// A paragraph is reported when it is classified risky or a user rule is
    /// present. Explainer failures degrade to a fixed message; classifier
    /// failures fail the whole analysis.
    pub async fn analyze<S: AsRef<str>>(
        &mut self,
        filename: &str,
        pages: &[S],
        user_rule: Option<&str>,
    ) -> anyhow::Result<AnalysisReport> {
        let paragraphs = split_paragraphs(pages);
        info!(filename, paragraphs = paragraphs.len(), "scanning document");

        let texts: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
        let predictions = self.classifier.classify_batch(&texts)?;
        anyhow::ensure!(
            predictions.len() == texts.len(),
            "classifier returned {} predictions for {} paragraphs",
            predictions.len(),
            texts.len()
        );

        let has_rule = user_rule.is_some_and(|r| r.chars().count() > MIN_RULE_CHARS);
        let mut results = Vec::new();

        for (id, (text, prediction)) in texts.iter().zip(&predictions).enumerate() {
            let is_risky = prediction.category != Category::Safe;
            if !is_risky && !has_rule {
                continue;
            }

            let explanation = if is_risky || id < RULE_CHECK_LIMIT {
                let request = ExplainRequest {
                    clause: text,
                    category: prediction.category,
                    confidence: prediction.score,
                    user_rule,
                };
                match self.explainer.explain(&request).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(filename, paragraph = id, error = %e, "explanation failed");
                        UNAVAILABLE_EXPLANATION.to_string()
                    }
                }
            } else {
                STANDARD_EXPLANATION.to_string()
            };

            results.push(RiskFinding {
                id,
                text: text.to_string(),
                risk_type: prediction.category,
                confidence: round4(prediction.score),
                explanation,
            });
        }

        info!(filename, risks = results.len(), "analysis complete");
        Ok(AnalysisReport {
            filename: filename.to_string(),
            total_clauses_scanned: texts.len(),
            risks_found: results.len(),
            results,
        })
    }
}

fn round4(x: f32) -> f32 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Prediction;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Flags paragraphs mentioning termination; everything else is Safe.
    struct KeywordClassifier;

    impl ClauseClassifier for KeywordClassifier {
        fn classify_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Prediction>> {
            Ok(texts
                .iter()
                .map(|t| {
                    if t.contains("terminate") {
                        Prediction {
                            category: Category::Termination,
                            score: 0.912_345,
                        }
                    } else {
                        Prediction {
                            category: Category::Safe,
                            score: 0.8,
                        }
                    }
                })
                .collect())
        }
    }

    #[derive(Default)]
    struct RecordingExplainer {
        seen: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl Explainer for RecordingExplainer {
        async fn explain(&self, request: &ExplainRequest<'_>) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push((
                request.category.name().to_string(),
                request.user_rule.map(str::to_string),
            ));
            Ok(format!("explained {}", request.category))
        }
    }

    struct FailingExplainer;

    #[async_trait]
    impl Explainer for FailingExplainer {
        async fn explain(&self, _request: &ExplainRequest<'_>) -> anyhow::Result<String> {
            anyhow::bail!("rate limited")
        }
    }

    fn clause(body: &str) -> String {
        format!("{body} under the terms and conditions of this Master Services Agreement.")
    }

    fn page() -> String {
        [
            clause("The Supplier shall deliver the Services"),
            clause("The Client may terminate this Agreement on notice"),
            "Page 1".to_string(),
            clause("Fees are payable within thirty days of invoice"),
        ]
        .join("\n\n")
    }

    #[tokio::test]
    async fn reports_only_risky_paragraphs_without_rule() {
        let mut analyzer = Analyzer::new(KeywordClassifier, RecordingExplainer::default());
        let report = analyzer.analyze("msa.pdf", &[page()], None).await.unwrap();

        assert_eq!(report.filename, "msa.pdf");
        assert_eq!(report.total_clauses_scanned, 3);
        assert_eq!(report.risks_found, 1);
        let finding = &report.results[0];
        assert_eq!(finding.id, 1);
        assert_eq!(finding.risk_type, Category::Termination);
        assert_eq!(finding.confidence, 0.9123);
        assert_eq!(finding.explanation, "explained Termination");
    }

    #[tokio::test]
    async fn rule_reports_every_paragraph() {
        let mut analyzer = Analyzer::new(KeywordClassifier, RecordingExplainer::default());
        let report = analyzer
            .analyze("msa.pdf", &[page()], Some("Payment terms must be 60 days"))
            .await
            .unwrap();

        assert_eq!(report.risks_found, 3);
        assert_eq!(report.results[0].risk_type, Category::Safe);
        let seen = analyzer.explainer.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(
            seen.iter()
                .all(|(_, rule)| rule.as_deref() == Some("Payment terms must be 60 days"))
        );
    }

    #[tokio::test]
    async fn short_rule_is_ignored() {
        let mut analyzer = Analyzer::new(KeywordClassifier, RecordingExplainer::default());
        let report = analyzer
            .analyze("msa.pdf", &[page()], Some("none"))
            .await
            .unwrap();
        assert_eq!(report.risks_found, 1);
    }

    #[tokio::test]
    async fn rule_checks_stop_after_limit() {
        let pages: Vec<String> = (0..25)
            .map(|i| clause(&format!("Section {i} describes the delivery schedule")))
            .collect();
        let mut analyzer = Analyzer::new(KeywordClassifier, RecordingExplainer::default());
        let report = analyzer
            .analyze("long.pdf", &pages, Some("Delivery within 10 days"))
            .await
            .unwrap();

        assert_eq!(report.risks_found, 25);
        assert_eq!(analyzer.explainer.seen.lock().unwrap().len(), RULE_CHECK_LIMIT);
        assert_eq!(report.results[24].explanation, STANDARD_EXPLANATION);
        assert_eq!(report.results[0].explanation, "explained Safe");
    }

    #[tokio::test]
    async fn explainer_failure_degrades() {
        let mut analyzer = Analyzer::new(KeywordClassifier, FailingExplainer);
        let report = analyzer.analyze("msa.pdf", &[page()], None).await.unwrap();
        assert_eq!(report.results[0].explanation, UNAVAILABLE_EXPLANATION);
    }

    #[test]
    fn rounds_to_four_places() {
        assert_eq!(round4(0.987_654), 0.9877);
        assert_eq!(round4(1.0), 1.0);
    }
}
