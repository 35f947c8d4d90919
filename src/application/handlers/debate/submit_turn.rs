//! SubmitTurnHandler - Command handler for the user's side of a round.

use std::sync::Arc;

use super::DebateHandlerError;
use crate::application::DebateSessionEngine;
use crate::domain::debate::DebateSession;
use crate::domain::foundation::SessionId;
use crate::ports::{GenerationError, SessionStore};

/// Command to submit a user turn.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    pub session_id: SessionId,
    pub text: String,
}

impl SubmitTurnCommand {
    pub fn new(session_id: SessionId, text: impl Into<String>) -> Self {
        Self {
            session_id,
            text: text.into(),
        }
    }
}

/// Result of a completed round.
#[derive(Debug, Clone)]
pub struct SubmitTurnResult {
    pub session: DebateSession,
    /// Score given to the submitted turn.
    pub user_score: f64,
    /// Score given to the opponent's rebuttal.
    pub opponent_score: f64,
    /// Set when the rebuttal came from the fallback path.
    pub degraded: Option<GenerationError>,
}

/// Handler for submitting user turns.
pub struct SubmitTurnHandler {
    engine: Arc<DebateSessionEngine>,
    store: Arc<dyn SessionStore>,
}

impl SubmitTurnHandler {
    pub fn new(engine: Arc<DebateSessionEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self { engine, store }
    }

    pub async fn handle(
        &self,
        cmd: SubmitTurnCommand,
    ) -> Result<SubmitTurnResult, DebateHandlerError> {
        let session = self.store.load(&cmd.session_id).await?;
        let transition = self.engine.submit_turn(&session, &cmd.text).await?;
        self.store.save(&transition.session).await?;

        // The round just appended a scored user turn and a scored rebuttal.
        let turns = transition.session.turns();
        let score_at = |offset: usize| {
            turns
                .len()
                .checked_sub(offset)
                .and_then(|i| turns[i].score())
                .unwrap_or_default()
        };
        let user_score = score_at(2);
        let opponent_score = score_at(1);

        Ok(SubmitTurnResult {
            user_score,
            opponent_score,
            session: transition.session,
            degraded: transition.degraded,
        })
    }
}
