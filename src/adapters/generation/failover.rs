//! Failover generator - tries a secondary backend when the primary fails.
//!
//! Unlike HTTP-level retries, failover happens on every error kind: a missing
//! key on the primary is as good a reason to switch as a 503.
//!
//! # Example
//!
//! ```ignore
//! let generator = FailoverGenerator::new(Arc::new(openai), Arc::new(gemini));
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{GenerationError, GenerationPort, GenerationRequest};

pub struct FailoverGenerator {
    primary: Arc<dyn GenerationPort>,
    secondary: Arc<dyn GenerationPort>,
}

impl FailoverGenerator {
    pub fn new(primary: Arc<dyn GenerationPort>, secondary: Arc<dyn GenerationPort>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl GenerationPort for FailoverGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        match self.primary.generate(request.clone()).await {
            Ok(text) => Ok(text),
            Err(err) => {
                tracing::warn!(
                    primary = self.primary.backend_name(),
                    secondary = self.secondary.backend_name(),
                    error_kind = err.kind(),
                    error = %err,
                    "Primary generation backend failed, trying secondary"
                );
                self.secondary.generate(request).await
            }
        }
    }

    fn backend_name(&self) -> &str {
        self.primary.backend_name()
    }
}
