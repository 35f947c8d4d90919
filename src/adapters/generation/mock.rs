//! Mock generator for testing.
//!
//! Provides a scriptable implementation of the GenerationPort, so engine and
//! handler tests run without calling real backends.
//!
//! # Features
//!
//! - Queued responses, consumed in order
//! - Error injection for fallback testing
//! - Simulated latency
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockGenerator::new()
//!     .with_response("OPENING")
//!     .with_error(GenerationError::transport("down", Some(503)));
//!
//! assert_eq!(generator.generate(request).await?, "OPENING");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationError, GenerationPort, GenerationRequest};

/// Text returned once the queue is exhausted.
pub const DEFAULT_MOCK_RESPONSE: &str = "Mock response";

/// Mock generator for testing.
///
/// Clones share the same queue and call history.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
    delay: Duration,
    name: String,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error(GenerationError),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            name: "mock".to_string(),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Text(text.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: GenerationError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Overrides the name reported by `backend_name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Queues a response on an existing (possibly shared) mock.
    pub fn push_response(&self, text: impl Into<String>) {
        lock(&self.responses).push_back(MockResponse::Text(text.into()));
    }

    /// Queues a failure on an existing (possibly shared) mock.
    pub fn push_error(&self, error: GenerationError) {
        lock(&self.responses).push_back(MockResponse::Error(error));
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        lock(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Text(DEFAULT_MOCK_RESPONSE.to_string()))
    }
}

#[async_trait]
impl GenerationPort for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn backend_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::debate::PromptPhase;

    fn request() -> GenerationRequest {
        GenerationRequest::new(PromptPhase::Opening, "Hello")
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let generator = MockGenerator::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(generator.generate(request()).await.unwrap(), "first");
        assert_eq!(generator.generate(request()).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn falls_back_to_default_when_queue_empty() {
        let generator = MockGenerator::new();
        assert_eq!(
            generator.generate(request()).await.unwrap(),
            DEFAULT_MOCK_RESPONSE
        );
    }

    #[tokio::test]
    async fn returns_queued_errors() {
        let generator = MockGenerator::new().with_error(GenerationError::format("empty"));
        let err = generator.generate(request()).await.unwrap_err();
        assert_eq!(err, GenerationError::format("empty"));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let generator = MockGenerator::new();
        generator.generate(request()).await.unwrap();
        generator.generate(request()).await.unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.get_calls()[0].prompt, "Hello");

        generator.clear_calls();
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let generator = MockGenerator::new();
        let handle = generator.clone();
        handle.push_response("shared");

        assert_eq!(generator.generate(request()).await.unwrap(), "shared");
        assert_eq!(handle.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn applies_delay() {
        let generator = MockGenerator::new().with_delay(Duration::from_secs(5));
        let started = tokio::time::Instant::now();
        generator.generate(request()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
