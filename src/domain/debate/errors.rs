//! Debate-specific error types.

use thiserror::Error;

use super::DebatePhase;
use crate::domain::foundation::{SessionId, ValidationError};

/// Minimum number of turns (opening plus one full round) before a debate can end.
pub const MIN_TURNS_TO_END: usize = 3;

/// Caller-input and state errors raised by the debate domain.
///
/// These are surfaced to the caller and never retried. Generation failures
/// are not represented here; the engine absorbs them through its fallback path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DebateError {
    #[error("Turn text cannot be empty")]
    EmptyTurn,

    #[error("Unrecognized prompt phase: {0}")]
    InvalidPhase(String),

    #[error("Closing analysis requires final scores")]
    MissingScores,

    #[error("Debate needs at least {required} turns to end, has {actual}")]
    InsufficientRounds { required: usize, actual: usize },

    #[error("Debate session {0} is already completed")]
    SessionClosed(SessionId),

    #[error("Cannot {action} while debate is {phase}")]
    InvalidState { action: String, phase: DebatePhase },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DebateError {
    pub fn invalid_state(action: impl Into<String>, phase: DebatePhase) -> Self {
        DebateError::InvalidState {
            action: action.into(),
            phase,
        }
    }

    pub fn insufficient_rounds(actual: usize) -> Self {
        DebateError::InsufficientRounds {
            required: MIN_TURNS_TO_END,
            actual,
        }
    }

    /// Stable machine-readable code for API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            DebateError::EmptyTurn => "EMPTY_TURN",
            DebateError::InvalidPhase(_) => "INVALID_PHASE",
            DebateError::MissingScores => "MISSING_SCORES",
            DebateError::InsufficientRounds { .. } => "INSUFFICIENT_ROUNDS",
            DebateError::SessionClosed(_) => "SESSION_CLOSED",
            DebateError::InvalidState { .. } => "INVALID_STATE",
            DebateError::Validation(_) => "VALIDATION_FAILED",
        }
    }
}
