//! HTTP explainer for OpenAI-compatible chat completion APIs (Groq by default).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::explain::{ExplainRequest, Explainer, system_prompt};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("completion contained no message")]
    EmptyResponse,
}

/// Chat-completions client used to explain flagged clauses.
pub struct ChatExplainer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl ChatExplainer {
    /// Create a client for `base_url` (no trailing slash needed).
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    /// Groq endpoint with the default model.
    pub fn groq(api_key: String) -> Self {
        Self::new(DEFAULT_BASE_URL.to_string(), api_key, DEFAULT_MODEL.to_string())
    }

    /// Send one completion request and return the reply text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ExplainError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        debug!(url = %url, model = %self.model, "requesting explanation");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExplainError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        parse_reply(&text)
    }
}

fn parse_reply(body: &str) -> Result<String, ExplainError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ExplainError::EmptyResponse)
}

#[async_trait]
impl Explainer for ChatExplainer {
    async fn explain(&self, request: &ExplainRequest<'_>) -> anyhow::Result<String> {
        let system = system_prompt(request);
        Ok(self.complete(&system, request.clause).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let client = ChatExplainer::new(
            "http://localhost:8080/v1/".into(),
            "key".into(),
            "m".into(),
        );
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn groq_defaults() {
        let client = ChatExplainer::groq("key".into());
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn request_body_shape() {
        let body = ChatRequest {
            model: "m",
            temperature: 0.0,
            messages: vec![ChatMessage {
                role: "system",
                content: "be brief",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "m");
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "be brief");
    }

    #[test]
    fn parses_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Allows exit without cause."}, "finish_reason": "stop"}
            ],
            "usage": {"total_tokens": 42}
        }"#;
        assert_eq!(parse_reply(body).unwrap(), "Allows exit without cause.");
    }

    #[test]
    fn empty_choices_is_an_error() {
        assert!(matches!(
            parse_reply(r#"{"choices": []}"#),
            Err(ExplainError::EmptyResponse)
        ));
        assert!(matches!(
            parse_reply(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(ExplainError::EmptyResponse)
        ));
        assert!(matches!(parse_reply("not json"), Err(ExplainError::Json(_))));
    }
}
