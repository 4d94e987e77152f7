// src/provider/openai_compat.rs — OpenAI-compatible completion provider
//
// Groq (the default), and any other endpoint exposing
// `POST {base_url}/chat/completions`.

use async_trait::async_trait;
use std::time::Duration;

use super::{ChatRequest, ChatResponse, ModelProvider, TokenUsage};
use crate::infra::config::ModelConfig;
use crate::infra::errors::AgentError;
use crate::infra::session::ApiKey;

pub struct OpenAICompatProvider {
    id_str: String,
    api_key: ApiKey,
    base_url: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl OpenAICompatProvider {
    pub fn new(id: impl Into<String>, api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            id_str: id.into(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ModelConfig, api_key: ApiKey) -> Self {
        let provider = Self::new(config.provider.clone(), api_key, config.base_url.clone());
        match config.timeout_seconds {
            Some(secs) => provider.with_timeout(Duration::from_secs(secs)),
            None => provider,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn provider_error(&self, message: impl Into<String>) -> AgentError {
        AgentError::Provider {
            provider: self.id_str.clone(),
            message: message.into(),
        }
    }
}

/// Build the JSON body for a chat completion call.
pub(crate) fn request_body(request: &ChatRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|m| {
            serde_json::json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages,
    });
    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    if let Some(temp) = request.temperature {
        body["temperature"] = serde_json::json!(temp);
    }
    body
}

/// Pull the completion text and usage out of a response body.
pub(crate) fn parse_response(resp: &serde_json::Value) -> Option<ChatResponse> {
    let content = resp["choices"][0]["message"]["content"].as_str()?.to_string();
    let usage = TokenUsage {
        input_tokens: resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        output_tokens: resp["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    };
    Some(ChatResponse { content, usage })
}

/// Providers report failures as `{"error": {"message": ...}}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ModelProvider for OpenAICompatProvider {
    fn id(&self) -> &str {
        &self.id_str
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AgentError> {
        let body = request_body(&request);

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header(
                "User-Agent",
                format!("code-agent/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&body);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.provider_error(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.provider_error(format!(
                "HTTP {status}: {}",
                error_message(&error_body)
            )));
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.provider_error(e.to_string()))?;

        let parsed = parse_response(&resp)
            .ok_or_else(|| self.provider_error("response contained no completion text"))?;

        tracing::debug!(
            provider = %self.id_str,
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "completion received"
        );
        Ok(parsed)
    }
}
