//! Completion provider seam and the OpenAI implementation.
//!
//! The handler talks to a `CompletionProvider` trait object so tests can
//! stub the model. The real implementation posts to the OpenAI Chat
//! Completions API via `reqwest` and extracts the first choice's text.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::profiles::SamplingConfig;

/// Default model for roast completions.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Failures from the completion service.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider returned HTTP 401 for the configured key.
    #[error("completion provider rejected the API key")]
    InvalidApiKey,

    /// Any other failure: network, quota, malformed response body.
    #[error("completion provider call failed: {0}")]
    Upstream(String),
}

/// Truncate an error-body snippet for logging without splitting a
/// multi-byte character.
fn truncate_snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// A short-completion capability.
///
/// One call per invocation; the only retry logic in this crate is the
/// content-novelty loop in the request handler, which operates on
/// successful-but-repetitive results, not on failures.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request a single short completion. Returns the raw text, or an empty
    /// string when the provider responds without content.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, ProviderError>;
}

/// OpenAI Chat Completions client.
#[derive(Debug, Clone)]
pub struct OpenAiCompletion {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiCompletion {
    /// Create a client for the given API key, using the default model and
    /// endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the Chat Completions request body.
    pub fn build_request_body(&self, system: &str, user: &str, sampling: &SamplingConfig) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": sampling.temperature,
            "frequency_penalty": sampling.frequency_penalty,
            "presence_penalty": sampling.presence_penalty,
            "max_tokens": sampling.max_tokens,
        })
    }

    /// Extract the first choice's message content from a response body.
    fn parse_response(&self, response: &Value) -> String {
        let content = response
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .unwrap_or("");

        if let Some(usage) = response.get("usage") {
            let prompt_tokens = usage
                .get("prompt_tokens")
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            let completion_tokens = usage
                .get("completion_tokens")
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            tracing::debug!(prompt_tokens, completion_tokens, "token usage");
        }

        content.trim().to_string()
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletion {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, ProviderError> {
        let endpoint = format!("{}/chat/completions", self.base_url);
        let body = self.build_request_body(system, user, sampling);

        tracing::debug!(model = %self.model, temperature = sampling.temperature, "calling completion API");

        let response = self
            .client
            .post(&endpoint)
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::InvalidApiKey);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Upstream(format!(
                "OpenAI API error ({}): {}",
                status,
                truncate_snippet(&text, 500)
            )));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Upstream(format!("malformed response body: {}", e)))?;

        Ok(self.parse_response(&json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::sampling_for;

    #[test]
    fn test_build_request_body() {
        let provider = OpenAiCompletion::new("sk-test");
        let body = provider.build_request_body("be funny", "make a joke", &sampling_for("dry"));

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be funny");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["frequency_penalty"], 2.0);
        assert_eq!(body["max_tokens"], 50);
    }

    #[test]
    fn test_parse_response_extracts_content() {
        let provider = OpenAiCompletion::new("sk-test");
        let response = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  a wet dog  " } }
            ],
            "usage": { "prompt_tokens": 40, "completion_tokens": 5, "total_tokens": 45 }
        });
        assert_eq!(provider.parse_response(&response), "a wet dog");
    }

    #[test]
    fn test_parse_response_without_content_is_empty() {
        let provider = OpenAiCompletion::new("sk-test");
        assert_eq!(provider.parse_response(&serde_json::json!({})), "");
        assert_eq!(
            provider.parse_response(&serde_json::json!({"choices": []})),
            ""
        );
    }

    #[test]
    fn test_truncate_snippet_respects_char_boundaries() {
        let body = "é".repeat(600);
        let snippet = truncate_snippet(&body, 500);
        assert_eq!(snippet.chars().count(), 500);
        assert_eq!(truncate_snippet("short body", 500), "short body");
    }

    #[test]
    fn test_with_model_and_base_url() {
        let provider = OpenAiCompletion::new("sk-test")
            .with_model("gpt-4o")
            .with_base_url("http://localhost:9999/v1");
        let body = provider.build_request_body("s", "u", &sampling_for("dry"));
        assert_eq!(body["model"], "gpt-4o");
    }
}
