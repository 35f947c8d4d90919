//! Error type shared by the debate handlers.

use thiserror::Error;

use crate::domain::debate::DebateError;
use crate::domain::foundation::SessionId;
use crate::ports::StoreError;

/// Errors that can occur while handling a debate command or query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DebateHandlerError {
    /// No session with this id exists.
    #[error("Debate not found: {0}")]
    NotFound(SessionId),

    /// The requested catalog topic does not exist.
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    /// The debate rules rejected the operation.
    #[error(transparent)]
    Debate(#[from] DebateError),

    /// The session store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DebateHandlerError {
    /// Stable machine-readable code for callers that render errors.
    pub fn code(&self) -> &'static str {
        match self {
            DebateHandlerError::NotFound(_) => "NOT_FOUND",
            DebateHandlerError::TopicNotFound(_) => "TOPIC_NOT_FOUND",
            DebateHandlerError::Debate(err) => err.code(),
            DebateHandlerError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<StoreError> for DebateHandlerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => DebateHandlerError::NotFound(id),
            other => DebateHandlerError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_keeps_session_id() {
        let id = SessionId::new();
        assert_eq!(
            DebateHandlerError::from(StoreError::NotFound(id)),
            DebateHandlerError::NotFound(id)
        );
    }

    #[test]
    fn other_store_errors_become_storage() {
        let err = DebateHandlerError::from(StoreError::SerializationFailed("bad".to_string()));
        assert!(matches!(err, DebateHandlerError::Storage(_)));
        assert_eq!(err.code(), "STORAGE_ERROR");
    }

    #[test]
    fn debate_errors_keep_their_code() {
        let err = DebateHandlerError::from(DebateError::EmptyTurn);
        assert_eq!(err.code(), "EMPTY_TURN");
        assert_eq!(err.to_string(), DebateError::EmptyTurn.to_string());
    }
}
