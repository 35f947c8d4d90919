//! Generation backend configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// Generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Backend used for opponent text
    #[serde(default)]
    pub provider: GenerationProvider,

    /// Backend tried when the primary fails
    pub fallback_provider: Option<GenerationProvider>,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// Generation backend type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    OpenAI,
    Anthropic,
    Gemini,
    /// No backend; every debate runs on fallback content.
    #[default]
    Demo,
}

impl fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationProvider::OpenAI => "openai",
            GenerationProvider::Anthropic => "anthropic",
            GenerationProvider::Gemini => "gemini",
            GenerationProvider::Demo => "demo",
        };
        write!(f, "{}", name)
    }
}

impl GenerationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the non-empty API key configured for `provider`.
    pub fn api_key(&self, provider: GenerationProvider) -> Option<&str> {
        let key = match provider {
            GenerationProvider::OpenAI => self.openai_api_key.as_deref(),
            GenerationProvider::Anthropic => self.anthropic_api_key.as_deref(),
            GenerationProvider::Gemini => self.gemini_api_key.as_deref(),
            GenerationProvider::Demo => None,
        };
        key.filter(|k| !k.trim().is_empty())
    }

    /// Returns the model configured for `provider`.
    pub fn model(&self, provider: GenerationProvider) -> &str {
        match provider {
            GenerationProvider::OpenAI => &self.openai_model,
            GenerationProvider::Anthropic => &self.anthropic_model,
            GenerationProvider::Gemini => &self.gemini_model,
            GenerationProvider::Demo => "demo",
        }
    }

    /// Validate generation configuration
    ///
    /// A missing key is not an error: that backend runs in demo mode.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > 5 {
            return Err(ValidationError::TooManyRetries(self.max_retries));
        }
        if self.fallback_provider == Some(self.provider) {
            return Err(ValidationError::FallbackSameAsPrimary);
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            fallback_provider: None,
            openai_api_key: None,
            anthropic_api_key: None,
            gemini_api_key: None,
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            gemini_model: default_gemini_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}
