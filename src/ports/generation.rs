//! Generation Port - Interface for text-generation backends.
//!
//! The debate engine asks for opponent text through this port without knowing
//! which vendor (or fake) answers. Adapters own their timeouts and retries;
//! the engine only distinguishes success from failure.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl GenerationPort for Echo {
//!     async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
//!         Ok(request.prompt)
//!     }
//!
//!     fn backend_name(&self) -> &str {
//!         "echo"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::debate::PromptPhase;
use crate::domain::foundation::SessionId;

/// Port for producing text from a prompt.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Generates text for the prompt carried by `request`.
    ///
    /// # Errors
    ///
    /// - `Unavailable` when no usable credential is configured
    /// - `Transport` on network or HTTP failure
    /// - `Format` when the backend answers without the expected text
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// Short identifier used in logs ("openai", "mock", ...).
    fn backend_name(&self) -> &str;
}

/// A prompt plus the context a backend may use to tune its call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub phase: PromptPhase,
    pub session_id: Option<SessionId>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    /// Creates a request with the phase's default token budget and temperature.
    pub fn new(phase: PromptPhase, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            phase,
            session_id: None,
            max_tokens: phase.max_tokens(),
            temperature: phase.temperature(),
        }
    }

    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Generation failures. The engine treats every variant as "generation failed".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// No credential configured, or the backend rejected it.
    #[error("generation unavailable: {message}")]
    Unavailable { message: String },

    /// Network error or non-success HTTP status.
    #[error("transport error{}: {message}", status.map(|s| format!(" (status {})", s)).unwrap_or_default())]
    Transport { message: String, status: Option<u16> },

    /// The backend answered but the text was missing or empty.
    #[error("unexpected response format: {0}")]
    Format(String),
}

impl GenerationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Transport {
            message: message.into(),
            status,
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Returns true if repeating the same call might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Transport { status: None, .. } => true,
            GenerationError::Transport {
                status: Some(code), ..
            } => *code == 429 || (500..600).contains(code),
            _ => false,
        }
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Unavailable { .. } => "unavailable",
            GenerationError::Transport { .. } => "transport",
            GenerationError::Format(_) => "format",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_follow_phase() {
        let request = GenerationRequest::new(PromptPhase::Rebuttal, "counter this");
        assert_eq!(request.prompt, "counter this");
        assert_eq!(request.max_tokens, 600);
        assert_eq!(request.temperature, 0.8);
        assert!(request.session_id.is_none());
    }

    #[test]
    fn request_builder_overrides() {
        let id = SessionId::new();
        let request = GenerationRequest::new(PromptPhase::Opening, "p")
            .with_session(id)
            .with_max_tokens(42)
            .with_temperature(0.1);
        assert_eq!(request.session_id, Some(id));
        assert_eq!(request.max_tokens, 42);
        assert_eq!(request.temperature, 0.1);
    }

    #[test]
    fn retryable_errors_are_transient_transport_failures() {
        assert!(GenerationError::transport("reset", None).is_retryable());
        assert!(GenerationError::transport("slow down", Some(429)).is_retryable());
        assert!(GenerationError::transport("bad gateway", Some(502)).is_retryable());
        assert!(!GenerationError::transport("bad request", Some(400)).is_retryable());
        assert!(!GenerationError::unavailable("no key").is_retryable());
        assert!(!GenerationError::format("no candidates").is_retryable());
    }

    #[test]
    fn transport_display_includes_status_when_known() {
        assert_eq!(
            GenerationError::transport("boom", Some(503)).to_string(),
            "transport error (status 503): boom"
        );
        assert_eq!(
            GenerationError::transport("boom", None).to_string(),
            "transport error: boom"
        );
    }

    #[test]
    fn generation_port_is_object_safe() {
        fn _accepts_dyn(_port: &dyn GenerationPort) {}
    }
}
