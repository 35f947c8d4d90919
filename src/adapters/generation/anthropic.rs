//! Anthropic Generator - GenerationPort over the Messages API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http::{build_client, check_status, map_send_error, require_text, with_retries};
use crate::ports::{GenerationError, GenerationPort, GenerationRequest};

const BACKEND: &str = "anthropic";

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic generator.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-3-5-sonnet-20241022".to_string(),
            base_url: "https://api.anthropic.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct AnthropicGenerator {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicGenerator {
    pub fn new(config: AnthropicConfig) -> Result<Self, GenerationError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Messages must open with a user turn, so the prompt is sent as one.
    fn to_anthropic_request(&self, request: &GenerationRequest) -> AnthropicRequest {
        AnthropicRequest {
            model: self.config.model.clone(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_once(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&self.to_anthropic_request(request))
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;
        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::format(format!("failed to parse response: {}", e)))?;

        let text = body
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");
        require_text(Some(text), BACKEND)
    }
}

#[async_trait]
impl GenerationPort for AnthropicGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let request = &request;
        with_retries(BACKEND, self.config.max_retries, || self.send_once(request)).await
    }

    fn backend_name(&self) -> &str {
        BACKEND
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}
