//! EndDebateHandler - Command handler for closing a debate.

use std::sync::Arc;

use super::DebateHandlerError;
use crate::application::DebateSessionEngine;
use crate::domain::debate::{DebateSession, Scoreboard};
use crate::domain::foundation::SessionId;
use crate::ports::{GenerationError, SessionStore};

/// Command to end a debate.
#[derive(Debug, Clone)]
pub struct EndDebateCommand {
    pub session_id: SessionId,
}

/// Result of ending a debate.
#[derive(Debug, Clone)]
pub struct EndDebateResult {
    pub session: DebateSession,
    pub scoreboard: Scoreboard,
    /// Set when the analysis came from the fallback path.
    pub degraded: Option<GenerationError>,
}

impl EndDebateResult {
    pub fn analysis(&self) -> &str {
        self.session.closing_analysis().unwrap_or_default()
    }
}

/// Handler for ending debates.
pub struct EndDebateHandler {
    engine: Arc<DebateSessionEngine>,
    store: Arc<dyn SessionStore>,
}

impl EndDebateHandler {
    pub fn new(engine: Arc<DebateSessionEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self { engine, store }
    }

    pub async fn handle(&self, cmd: EndDebateCommand) -> Result<EndDebateResult, DebateHandlerError> {
        let session = self.store.load(&cmd.session_id).await?;
        let transition = self.engine.end(&session).await?;
        self.store.save(&transition.session).await?;

        Ok(EndDebateResult {
            scoreboard: Scoreboard::from_session(&transition.session),
            session: transition.session,
            degraded: transition.degraded,
        })
    }
}
