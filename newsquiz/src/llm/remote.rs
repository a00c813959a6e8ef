use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{LlmProvider, LlmRequest, LlmResponse, UsageMetadata};

/// Remote LLM provider using an OpenAI-compatible chat-completions API
pub struct RemoteLlmProvider {
    base_url: String,
    api_key: String,
    model: String,
    default_timeout: Duration,
    default_max_tokens: usize,
    default_temperature: f32,
    client: reqwest::Client,
}

impl RemoteLlmProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            default_timeout: Duration::from_secs(30),
            default_max_tokens: 1500,
            default_temperature: 0.7,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_defaults(mut self, timeout_secs: u64, max_tokens: usize, temperature: f32) -> Self {
        self.default_timeout = Duration::from_secs(timeout_secs);
        self.default_max_tokens = max_tokens;
        self.default_temperature = temperature;
        self
    }
}

#[async_trait::async_trait]
impl LlmProvider for RemoteLlmProvider {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse> {
        let timeout = request
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let max_tokens = request.max_tokens.unwrap_or(self.default_max_tokens);
        let temperature = request.temperature.unwrap_or(self.default_temperature);

        // Build OpenAI-compatible request
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(Message {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.push(Message {
            role: "user".to_string(),
            content: request.prompt,
        });

        let req_body = OpenAiRequest {
            model: self.model.clone(),
            messages,
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
            response_format: request.response_format,
        };

        // Make HTTP request with timeout
        let response = tokio::time::timeout(
            timeout,
            self.client
                .post(&self.base_url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&req_body)
                .send(),
        )
        .await
        .context("LLM request timed out")?
        .context("LLM HTTP request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("LLM API error {}: {}", status, body);
        }

        let resp_body: OpenAiResponse = response
            .json()
            .await
            .context("Failed to parse LLM response")?;

        let choice = resp_body
            .choices
            .first()
            .context("LLM response has no choices")?;

        let usage = UsageMetadata {
            prompt_tokens: resp_body.usage.prompt_tokens.unwrap_or(0),
            completion_tokens: resp_body.usage.completion_tokens.unwrap_or(0),
            total_tokens: resp_body.usage.total_tokens.unwrap_or(0),
        };

        Ok(LlmResponse {
            content: choice.message.content.clone(),
            usage,
            model: resp_body.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}

// OpenAI API request/response structures
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: Option<usize>,
    #[serde(default)]
    completion_tokens: Option<usize>,
    #[serde(default)]
    total_tokens: Option<usize>,
}
