//! Gemini Generator - GenerationPort over the `generateContent` API.
//!
//! The API key travels as a query parameter, so request URLs are never logged.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http::{build_client, check_status, map_send_error, require_text, with_retries};
use crate::ports::{GenerationError, GenerationPort, GenerationRequest};

const BACKEND: &str = "gemini";

/// Configuration for the Gemini generator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1/models".to_string(),
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

pub struct GeminiGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn to_gemini_request(&self, request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        }
    }

    async fn send_once(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key())])
            .json(&self.to_gemini_request(request))
            .send()
            .await
            .map_err(|e| map_send_error(e.without_url()))?;

        let response = check_status(response).await?;
        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::format(format!("failed to parse response: {}", e.without_url())))?;

        require_text(extract_text(body), BACKEND)
    }
}

#[async_trait]
impl GenerationPort for GeminiGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let request = &request;
        with_retries(BACKEND, self.config.max_retries, || self.send_once(request)).await
    }

    fn backend_name(&self) -> &str {
        BACKEND
    }
}

fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::generation::http::test_server::serve;
    use crate::domain::debate::PromptPhase;

    fn generator(base_url: &str) -> GeminiGenerator {
        GeminiGenerator::new(
            GeminiConfig::new("gemini-key")
                .with_base_url(base_url)
                .with_max_retries(0),
        )
        .unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new(PromptPhase::Rebuttal, "Counter the latest point")
    }

    #[test]
    fn request_uses_generation_config() {
        let body =
            serde_json::to_value(generator("http://localhost").to_gemini_request(&request()))
                .unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Counter the latest point");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 600);
    }

    #[tokio::test]
    async fn returns_first_candidate_text() {
        let server = serve(vec![(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"COUNTER, however this fails"}]}}]}"#,
        )])
        .await;

        let text = generator(&server.base_url).generate(request()).await.unwrap();
        assert_eq!(text, "COUNTER, however this fails");

        let raw = &server.requests()[0];
        assert!(raw.starts_with("POST /gemini-2.5-flash:generateContent?key=gemini-key"));
    }

    #[tokio::test]
    async fn missing_candidates_is_format_error() {
        let server = serve(vec![(200, r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)]).await;
        let err = generator(&server.base_url).generate(request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Format(_)));
    }

    #[tokio::test]
    async fn bad_request_is_not_retryable_transport() {
        let server = serve(vec![(400, r#"{"error":{"message":"bad"}}"#)]).await;
        let err = generator(&server.base_url).generate(request()).await.unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(!err.is_retryable());
    }
}
