// src/provider/google.rs — Google Generative AI (Gemini) client

use async_trait::async_trait;
use std::time::Duration;

use super::GenerationClient;
use crate::core::formatter;
use crate::core::types::GenerationRequest;
use crate::infra::config::ModelConfig;
use crate::infra::errors::SheetChatError;

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, SheetChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SheetChatError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(api_key: String, config: &ModelConfig) -> Result<Self, SheetChatError> {
        Self::new(
            api_key,
            config.name.clone(),
            config.base_url.clone(),
            config.timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key,
        )
    }

    fn transport(&self, detail: String) -> SheetChatError {
        SheetChatError::Transport {
            model: self.model.clone(),
            detail,
        }
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response.
///
/// Any missing level yields `UnparseableResponse`; the detail says which.
pub fn extract_reply_text(resp: &serde_json::Value) -> Result<String, SheetChatError> {
    let unparseable = |detail: String| SheetChatError::UnparseableResponse { detail };

    let candidates = match resp["candidates"].as_array() {
        Some(c) if !c.is_empty() => c,
        _ => {
            // A blocked prompt comes back with promptFeedback and no candidates.
            let detail = match resp["promptFeedback"]["blockReason"].as_str() {
                Some(reason) => format!("no candidates (prompt blocked: {reason})"),
                None => "no candidates".to_string(),
            };
            return Err(unparseable(detail));
        }
    };

    let candidate = &candidates[0];
    if !candidate["content"].is_object() {
        let detail = match candidate["finishReason"].as_str() {
            Some(reason) => format!("candidate has no content (finishReason: {reason})"),
            None => "candidate has no content".to_string(),
        };
        return Err(unparseable(detail));
    }

    let parts = match candidate["content"]["parts"].as_array() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(unparseable("content has no parts".into())),
    };

    parts[0]["text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| unparseable("first part has no text".into()))
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, SheetChatError> {
        let body = formatter::request_body(request);

        tracing::debug!(
            model = %self.model,
            turns = request.history.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let detail = if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    // Strip the URL: it carries the API key.
                    e.without_url().to_string()
                };
                tracing::warn!(model = %self.model, "Generation request failed: {}", detail);
                self.transport(detail)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, %status, "Generation endpoint returned an error");
            return Err(self.transport(format!("HTTP {}: {}", status, error_body.trim())));
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.transport(e.without_url().to_string()))?;

        let resp: serde_json::Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(model = %self.model, "Response is not JSON: {}", e);
                return Err(SheetChatError::UnparseableResponse {
                    detail: format!("response is not JSON: {e}"),
                });
            }
        };

        extract_reply_text(&resp).inspect_err(|e| {
            if let SheetChatError::UnparseableResponse { detail } = e {
                tracing::warn!(model = %self.model, "Unusable response: {}", detail);
            }
        })
    }
}
