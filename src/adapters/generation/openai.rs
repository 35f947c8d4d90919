//! OpenAI Generator - GenerationPort over the chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let generator = OpenAiGenerator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http::{build_client, check_status, map_send_error, require_text, with_retries};
use crate::ports::{GenerationError, GenerationPort, GenerationRequest};

const BACKEND: &str = "openai";

/// Configuration for the OpenAI generator.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
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

pub struct OpenAiGenerator {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiConfig) -> Result<Self, GenerationError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// The whole prompt goes in as the system message.
    fn to_openai_request(&self, request: &GenerationRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: self.config.model.clone(),
            messages: vec![OpenAiMessage {
                role: "system".to_string(),
                content: Some(request.prompt.clone()),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_once(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_openai_request(request))
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;
        let body: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::format(format!("failed to parse response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        require_text(content, BACKEND)
    }
}

#[async_trait]
impl GenerationPort for OpenAiGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let request = &request;
        with_retries(BACKEND, self.config.max_retries, || self.send_once(request)).await
    }

    fn backend_name(&self) -> &str {
        BACKEND
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::generation::http::test_server::serve;
    use crate::domain::debate::PromptPhase;

    fn generator(base_url: &str) -> OpenAiGenerator {
        OpenAiGenerator::new(
            OpenAiConfig::new("test-key")
                .with_base_url(base_url)
                .with_max_retries(0),
        )
        .unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new(PromptPhase::Opening, "Argue against the motion")
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAiConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_debug_hides_key() {
        let rendered = format!("{:?}", OpenAiConfig::new("sk-very-secret"));
        assert!(!rendered.contains("sk-very-secret"));
    }

    #[test]
    fn request_carries_prompt_and_phase_parameters() {
        let generator = generator("http://localhost");
        let body = serde_json::to_value(generator.to_openai_request(&request())).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Argue against the motion");
        assert_eq!(body["max_tokens"], 500);
    }

    #[tokio::test]
    async fn returns_first_choice_text() {
        let server = serve(vec![(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"  OPENING  "}}]}"#,
        )])
        .await;

        let text = generator(&server.base_url).generate(request()).await.unwrap();
        assert_eq!(text, "OPENING");

        let raw = &server.requests()[0];
        assert!(raw.starts_with("POST /chat/completions"));
        assert!(raw.contains("Bearer test-key"));
    }

    #[tokio::test]
    async fn empty_choices_is_format_error() {
        let server = serve(vec![(200, r#"{"choices":[]}"#)]).await;
        let err = generator(&server.base_url).generate(request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Format(_)));
    }

    #[tokio::test]
    async fn unauthorized_is_unavailable() {
        let server = serve(vec![(401, r#"{"error":{"message":"bad key"}}"#)]).await;
        let err = generator(&server.base_url).generate(request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn server_error_is_transport_with_status() {
        let server = serve(vec![(500, r#"{"error":"boom"}"#)]).await;
        let err = generator(&server.base_url).generate(request()).await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Transport {
                status: Some(500),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn retries_transient_failures() {
        let server = serve(vec![
            (503, r#"{"error":"busy"}"#),
            (200, r#"{"choices":[{"message":{"role":"assistant","content":"second try"}}]}"#),
        ])
        .await;
        let generator = OpenAiGenerator::new(
            OpenAiConfig::new("k")
                .with_base_url(&server.base_url)
                .with_max_retries(1),
        )
        .unwrap();

        assert_eq!(generator.generate(request()).await.unwrap(), "second try");
        assert_eq!(server.requests().len(), 2);
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let generator = generator("http://127.0.0.1:1");
        let err = generator.generate(request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport { status: None, .. }));
    }
}
