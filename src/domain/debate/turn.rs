//! A single contribution to a debate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DebateError;
use crate::domain::foundation::{Timestamp, TurnId, ValidationError};

/// Lowest score a turn may carry.
pub const MIN_SCORE: f64 = 0.0;
/// Highest score a turn may carry.
pub const MAX_SCORE: f64 = 10.0;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Opponent,
}

impl Speaker {
    pub fn opposite(&self) -> Speaker {
        match self {
            Speaker::User => Speaker::Opponent,
            Speaker::Opponent => Speaker::User,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Opponent => write!(f, "opponent"),
        }
    }
}

/// How a turn's text came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrigin {
    /// Typed by the user.
    Authored,
    /// Produced by a generation backend.
    Generated,
    /// Synthesized locally because generation failed.
    Fallback,
}

/// One participant's contribution. Append-only once part of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    speaker: Speaker,
    text: String,
    created_at: Timestamp,
    score: Option<f64>,
    origin: TurnOrigin,
}

impl Turn {
    /// Creates an unscored user turn from trimmed text.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTurn` if the text is empty after trimming.
    pub fn user(text: impl AsRef<str>) -> Result<Self, DebateError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DebateError::EmptyTurn);
        }
        Ok(Self {
            id: TurnId::new(),
            speaker: Speaker::User,
            text: trimmed.to_string(),
            created_at: Timestamp::now(),
            score: None,
            origin: TurnOrigin::Authored,
        })
    }

    /// Creates an opponent turn, optionally scored.
    pub fn opponent(
        text: impl Into<String>,
        origin: TurnOrigin,
        score: Option<f64>,
    ) -> Result<Self, ValidationError> {
        if let Some(value) = score {
            validate_score(value)?;
        }
        Ok(Self {
            id: TurnId::new(),
            speaker: Speaker::Opponent,
            text: text.into(),
            created_at: Timestamp::now(),
            score,
            origin,
        })
    }

    pub fn id(&self) -> &TurnId {
        &self.id
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn origin(&self) -> TurnOrigin {
        self.origin
    }

    /// Assigns a score to a turn that was appended unscored.
    ///
    /// A turn is scored at most once; later calls are rejected.
    pub(crate) fn assign_score(&mut self, score: f64) -> Result<(), ValidationError> {
        if self.score.is_some() {
            return Err(ValidationError::invalid_format(
                "score",
                "turn has already been scored",
            ));
        }
        validate_score(score)?;
        self.score = Some(score);
        Ok(())
    }
}

fn validate_score(score: f64) -> Result<(), ValidationError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ValidationError::out_of_range(
            "score", MIN_SCORE, MAX_SCORE, score,
        ));
    }
    Ok(())
}
