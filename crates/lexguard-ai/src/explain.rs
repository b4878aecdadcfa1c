//! Plain-English explanations of flagged clauses from a chat model.

use async_trait::async_trait;
use lexguard_core::Category;

/// What the explainer is told about one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainRequest<'a> {
    pub clause: &'a str,
    pub category: Category,
    pub confidence: f32,
    pub user_rule: Option<&'a str>,
}

/// Produces a human-readable explanation for a classified clause.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, request: &ExplainRequest<'_>) -> anyhow::Result<String>;
}

/// System prompt for the legal-auditor persona.
pub fn system_prompt(request: &ExplainRequest<'_>) -> String {
    format!(
        "You are a legal auditor.\n\
         Detected Risk Category: {category} (Confidence: {confidence:.2})\n\
         User's Constraint Rule: {rule}\n\
         \n\
         Task:\n\
         1. Summarize what this clause says in plain English.\n\
         2. If a User Rule exists, explicitly state if this clause violates it.\n\
         3. If it is risky, suggest a 1-sentence edit to make it safer.",
        category = request.category,
        confidence = request.confidence,
        rule = request.user_rule.unwrap_or("None"),
    )
}
