//! Wire types shared between the analysis service and its clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Category;

/// A flagged paragraph in an analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFinding {
    /// Paragraph index within the scanned document.
    pub id: usize,
    pub text: String,
    pub risk_type: Category,
    /// Classifier score, rounded to 4 decimals.
    pub confidence: f32,
    pub explanation: String,
}

/// Response body of a document analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub filename: String,
    pub total_clauses_scanned: usize,
    pub risks_found: usize,
    pub results: Vec<RiskFinding>,
}

/// A user record pushed from the frontend's identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSync {
    pub clerk_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub status: String,
    pub updated: bool,
}

impl SyncResponse {
    pub fn synced(updated: bool) -> Self {
        Self {
            status: "synced".to_string(),
            updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_serializes_category_name() {
        let finding = RiskFinding {
            id: 4,
            text: "Either party may terminate on 30 days notice.".into(),
            risk_type: Category::Termination,
            confidence: 0.9731,
            explanation: "Allows exit without cause.".into(),
        };
        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["risk_type"], "Termination");
        assert!((value["confidence"].as_f64().unwrap() - 0.9731).abs() < 1e-6);
    }

    #[test]
    fn user_sync_defaults_optional_fields() {
        let json = r#"{"clerk_id": "user_2abc", "email": "a@example.com"}"#;
        let user: UserSync = serde_json::from_str(json).unwrap();
        assert_eq!(user.clerk_id, "user_2abc");
        assert!(user.name.is_none());
    }

    #[test]
    fn user_sync_keeps_explicit_timestamp() {
        let json = r#"{
            "clerk_id": "user_2abc",
            "email": "a@example.com",
            "name": "Ada",
            "created_at": "2026-02-21T10:00:00Z"
        }"#;
        let user: UserSync = serde_json::from_str(json).unwrap();
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_eq!(user.created_at.to_rfc3339(), "2026-02-21T10:00:00+00:00");
    }

    #[test]
    fn sync_response_shape() {
        let json = serde_json::to_string(&SyncResponse::synced(true)).unwrap();
        assert_eq!(json, r#"{"status":"synced","updated":true}"#);
    }
}
