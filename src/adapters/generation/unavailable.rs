//! Generator used when no backend credential is configured.
//!
//! Every call fails with `Unavailable`, which sends the engine straight to
//! its fallback content. This is what "demo mode" means at the port level.

use async_trait::async_trait;

use crate::ports::{GenerationError, GenerationPort, GenerationRequest};

#[derive(Debug, Clone)]
pub struct UnavailableGenerator {
    reason: String,
}

impl UnavailableGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableGenerator {
    fn default() -> Self {
        Self::new("no generation backend configured")
    }
}

#[async_trait]
impl GenerationPort for UnavailableGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, GenerationError> {
        Err(GenerationError::unavailable(self.reason.clone()))
    }

    fn backend_name(&self) -> &str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::debate::PromptPhase;

    #[tokio::test]
    async fn always_fails_with_unavailable() {
        let generator = UnavailableGenerator::new("OPENAI key missing");
        let err = generator
            .generate(GenerationRequest::new(PromptPhase::Opening, "prompt"))
            .await
            .unwrap_err();

        assert_eq!(err, GenerationError::unavailable("OPENAI key missing"));
        assert_eq!(generator.backend_name(), "demo");
    }
}
