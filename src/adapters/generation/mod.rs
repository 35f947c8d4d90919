//! Generation adapters - implementations of the GenerationPort.
//!
//! - `OpenAiGenerator`, `AnthropicGenerator`, `GeminiGenerator`: HTTP backends
//! - `UnavailableGenerator`: demo mode, always fails
//! - `FailoverGenerator`: primary then secondary
//! - `MockGenerator`: scripted responses for tests

mod anthropic;
mod failover;
mod gemini;
mod http;
mod mock;
mod openai;
mod unavailable;

pub use anthropic::{AnthropicConfig, AnthropicGenerator};
pub use failover::FailoverGenerator;
pub use gemini::{GeminiConfig, GeminiGenerator};
pub use mock::{MockGenerator, MockResponse, DEFAULT_MOCK_RESPONSE};
pub use openai::{OpenAiConfig, OpenAiGenerator};
pub use unavailable::UnavailableGenerator;

use std::sync::Arc;

use crate::config::{GenerationConfig, GenerationProvider};
use crate::ports::{GenerationError, GenerationPort};

/// Builds the generator described by `config`, wrapping it in failover when
/// a fallback provider is set.
///
/// A provider without a key becomes an `UnavailableGenerator`, so a missing
/// credential degrades to demo content instead of failing startup.
pub fn build_generator(
    config: &GenerationConfig,
) -> Result<Arc<dyn GenerationPort>, GenerationError> {
    let primary = build_single(config, config.provider)?;
    match config.fallback_provider {
        Some(fallback) if fallback != config.provider => {
            let secondary = build_single(config, fallback)?;
            Ok(Arc::new(FailoverGenerator::new(primary, secondary)))
        }
        _ => Ok(primary),
    }
}

fn build_single(
    config: &GenerationConfig,
    provider: GenerationProvider,
) -> Result<Arc<dyn GenerationPort>, GenerationError> {
    if provider == GenerationProvider::Demo {
        return Ok(Arc::new(UnavailableGenerator::default()));
    }

    let Some(key) = config.api_key(provider) else {
        tracing::warn!(
            provider = %provider,
            "No API key configured, falling back to demo content"
        );
        return Ok(Arc::new(UnavailableGenerator::new(format!(
            "{} API key not configured",
            provider
        ))));
    };

    let model = config.model(provider);
    let generator: Arc<dyn GenerationPort> = match provider {
        GenerationProvider::OpenAI => Arc::new(OpenAiGenerator::new(
            OpenAiConfig::new(key)
                .with_model(model)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries),
        )?),
        GenerationProvider::Anthropic => Arc::new(AnthropicGenerator::new(
            AnthropicConfig::new(key)
                .with_model(model)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries),
        )?),
        GenerationProvider::Gemini => Arc::new(GeminiGenerator::new(
            GeminiConfig::new(key)
                .with_model(model)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries),
        )?),
        GenerationProvider::Demo => Arc::new(UnavailableGenerator::default()),
    };

    tracing::info!(provider = %provider, model, "Generation backend configured");
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_provider_builds_unavailable_generator() {
        let generator = build_generator(&GenerationConfig::default()).unwrap();
        assert_eq!(generator.backend_name(), "demo");
    }

    #[test]
    fn missing_key_degrades_to_demo() {
        let config = GenerationConfig {
            provider: GenerationProvider::OpenAI,
            ..Default::default()
        };
        let generator = build_generator(&config).unwrap();
        assert_eq!(generator.backend_name(), "demo");
    }

    #[test]
    fn configured_key_builds_http_backend() {
        let config = GenerationConfig {
            provider: GenerationProvider::Gemini,
            gemini_api_key: Some("g-key".to_string()),
            ..Default::default()
        };
        let generator = build_generator(&config).unwrap();
        assert_eq!(generator.backend_name(), "gemini");
    }

    #[test]
    fn fallback_provider_wraps_in_failover() {
        let config = GenerationConfig {
            provider: GenerationProvider::Anthropic,
            fallback_provider: Some(GenerationProvider::OpenAI),
            anthropic_api_key: Some("a-key".to_string()),
            openai_api_key: Some("o-key".to_string()),
            ..Default::default()
        };
        let generator = build_generator(&config).unwrap();
        // Failover reports the primary's name.
        assert_eq!(generator.backend_name(), "anthropic");
    }
}
