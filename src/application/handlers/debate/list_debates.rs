//! ListDebatesHandler - Query handler for a user's debate history.

use serde::Serialize;
use std::sync::Arc;

use super::DebateHandlerError;
use crate::domain::debate::{
    DebateHistoryStats, DebateOutcome, DebatePhase, DebateSession, Difficulty, OutcomeFilter,
};
use crate::domain::foundation::{SessionId, SessionStatus, Timestamp, UserId};
use crate::ports::SessionStore;

/// Query to list a user's debates.
#[derive(Debug, Clone)]
pub struct ListDebatesQuery {
    pub user_id: UserId,
    pub filter: OutcomeFilter,
}

impl ListDebatesQuery {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            filter: OutcomeFilter::All,
        }
    }

    pub fn with_filter(mut self, filter: OutcomeFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// One row of debate history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebateSummary {
    pub session_id: SessionId,
    pub topic_title: String,
    pub category: String,
    pub difficulty: Difficulty,
    /// `None` until the debate is completed.
    pub result: Option<DebateOutcome>,
    pub phase: DebatePhase,
    pub status: SessionStatus,
    pub rounds: u32,
    pub user_score: f64,
    pub opponent_score: f64,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl From<&DebateSession> for DebateSummary {
    fn from(session: &DebateSession) -> Self {
        Self {
            session_id: *session.id(),
            topic_title: session.topic().title().to_string(),
            category: session.topic().category().to_string(),
            difficulty: session.topic().difficulty(),
            result: DebateOutcome::of(session),
            phase: session.phase(),
            status: session.status(),
            rounds: session.round_count(),
            user_score: session.cumulative_user_score(),
            opponent_score: session.cumulative_opponent_score(),
            started_at: *session.started_at(),
            completed_at: session.completed_at().copied(),
        }
    }
}

/// A user's debates, newest first, with stats over every completed one.
///
/// The stats ignore the query's filter.
#[derive(Debug, Clone, Serialize)]
pub struct DebateHistory {
    pub debates: Vec<DebateSummary>,
    pub stats: DebateHistoryStats,
}

/// Handler for listing debates, newest first.
pub struct ListDebatesHandler {
    store: Arc<dyn SessionStore>,
}

impl ListDebatesHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListDebatesQuery,
    ) -> Result<DebateHistory, DebateHandlerError> {
        let sessions = self.store.list_by_user(&query.user_id).await?;
        let debates = sessions
            .iter()
            .map(DebateSummary::from)
            .filter(|summary| query.filter.matches(summary.result))
            .collect();

        Ok(DebateHistory {
            debates,
            stats: DebateHistoryStats::from_sessions(&sessions),
        })
    }
}
