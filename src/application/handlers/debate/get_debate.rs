//! GetDebateHandler - Query handler for a single debate.

use serde::Serialize;
use std::sync::Arc;

use super::DebateHandlerError;
use crate::domain::debate::{DebateSession, Scoreboard};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Query to get a debate by ID.
#[derive(Debug, Clone)]
pub struct GetDebateQuery {
    pub session_id: SessionId,
}

/// A session together with its derived scoreboard.
#[derive(Debug, Clone, Serialize)]
pub struct DebateView {
    pub session: DebateSession,
    pub scoreboard: Scoreboard,
}

/// Handler for retrieving a debate.
pub struct GetDebateHandler {
    store: Arc<dyn SessionStore>,
}

impl GetDebateHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetDebateQuery) -> Result<DebateView, DebateHandlerError> {
        let session = self.store.load(&query.session_id).await?;
        Ok(DebateView {
            scoreboard: Scoreboard::from_session(&session),
            session,
        })
    }
}
