//! DebateSession aggregate - the stateful record of one debate.

use serde::{Deserialize, Serialize};

use super::scoring::round_tenth;
use super::{
    DebateError, DebatePhase, FinalScores, Speaker, Topic, Turn, TurnOrigin, MIN_TURNS_TO_END,
};
use crate::domain::foundation::{SessionId, SessionStatus, StateMachine, Timestamp, UserId};

/// One debate on one topic.
///
/// Turns alternate strictly, starting with the opponent's opening. Every
/// mutation goes through a method that checks the current phase first, so a
/// rejected call leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateSession {
    id: SessionId,
    user_id: Option<UserId>,
    topic: Topic,
    turns: Vec<Turn>,
    cumulative_user_score: f64,
    cumulative_opponent_score: f64,
    round_count: u32,
    phase: DebatePhase,
    status: SessionStatus,
    closing_analysis: Option<String>,
    started_at: Timestamp,
    updated_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl DebateSession {
    /// Creates a session in the `Created` phase with no turns.
    pub fn new(topic: Topic, user_id: Option<UserId>) -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            user_id,
            topic,
            turns: Vec::new(),
            cumulative_user_score: 0.0,
            cumulative_opponent_score: 0.0,
            round_count: 0,
            phase: DebatePhase::Created,
            status: SessionStatus::Active,
            closing_analysis: None,
            started_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn cumulative_user_score(&self) -> f64 {
        self.cumulative_user_score
    }

    pub fn cumulative_opponent_score(&self) -> f64 {
        self.cumulative_opponent_score
    }

    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn closing_analysis(&self) -> Option<&str> {
        self.closing_analysis.as_deref()
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    /// Returns true if the session has been completed.
    pub fn is_completed(&self) -> bool {
        !self.status.is_active()
    }

    /// Returns the last `n` turns (or all of them if fewer exist).
    pub fn recent_turns(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Returns the most recent user turn.
    pub fn last_user_turn(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.speaker() == Speaker::User)
    }

    /// Snapshot of the cumulative scores for the closing analysis.
    pub fn final_scores(&self) -> FinalScores {
        FinalScores {
            user: self.cumulative_user_score,
            opponent: self.cumulative_opponent_score,
            rounds: self.round_count,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// Moves a freshly created session to `AwaitingOpponentOpening`.
    pub fn begin_opening(&mut self) -> Result<(), DebateError> {
        self.ensure_open()?;
        self.advance(DebatePhase::AwaitingOpponentOpening, "begin the opening")
    }

    /// Appends the unscored opening statement and hands the floor to the user.
    pub fn record_opening(
        &mut self,
        text: impl Into<String>,
        origin: TurnOrigin,
    ) -> Result<(), DebateError> {
        self.ensure_open()?;
        self.ensure_phase(DebatePhase::AwaitingOpponentOpening, "record the opening")?;
        let turn = Turn::opponent(text, origin, None)?;
        self.turns.push(turn);
        self.advance(DebatePhase::AwaitingUserTurn, "record the opening")
    }

    /// Checks that a user turn with `text` would be accepted, without mutating.
    pub fn ensure_can_accept(&self, text: &str) -> Result<(), DebateError> {
        self.ensure_open()?;
        self.ensure_phase(DebatePhase::AwaitingUserTurn, "submit a turn")?;
        if text.trim().is_empty() {
            return Err(DebateError::EmptyTurn);
        }
        Ok(())
    }

    /// Appends an unscored user turn and waits for the opponent.
    pub fn accept_user_turn(&mut self, text: &str) -> Result<&Turn, DebateError> {
        self.ensure_can_accept(text)?;
        let turn = Turn::user(text)?;
        self.turns.push(turn);
        self.advance(DebatePhase::AwaitingOpponentTurn, "submit a turn")?;
        Ok(&self.turns[self.turns.len() - 1])
    }

    /// Completes the round: scores the pending user turn, appends the scored
    /// opponent turn, and adds both scores to the running totals.
    pub fn record_rebuttal(
        &mut self,
        user_score: f64,
        text: impl Into<String>,
        opponent_score: f64,
        origin: TurnOrigin,
    ) -> Result<(), DebateError> {
        self.ensure_open()?;
        self.ensure_phase(DebatePhase::AwaitingOpponentTurn, "record a rebuttal")?;

        let opponent_turn = Turn::opponent(text, origin, Some(opponent_score))?;
        let pending = self
            .turns
            .last_mut()
            .filter(|t| t.speaker() == Speaker::User)
            .ok_or_else(|| {
                DebateError::invalid_state("record a rebuttal", DebatePhase::AwaitingOpponentTurn)
            })?;
        pending.assign_score(user_score)?;
        self.turns.push(opponent_turn);

        self.cumulative_user_score = round_tenth(self.cumulative_user_score + user_score);
        self.cumulative_opponent_score =
            round_tenth(self.cumulative_opponent_score + opponent_score);
        self.round_count += 1;
        self.advance(DebatePhase::AwaitingUserTurn, "record a rebuttal")
    }

    /// Checks that the debate may be ended, without mutating.
    pub fn ensure_can_complete(&self) -> Result<(), DebateError> {
        self.ensure_open()?;
        if !self.phase.can_end() {
            return Err(DebateError::invalid_state("end the debate", self.phase));
        }
        if self.turns.len() < MIN_TURNS_TO_END {
            return Err(DebateError::insufficient_rounds(self.turns.len()));
        }
        Ok(())
    }

    /// Stores the closing analysis and marks the session completed.
    pub fn complete(&mut self, analysis: impl Into<String>) -> Result<(), DebateError> {
        self.ensure_can_complete()?;
        let status = self.status.transition_to(SessionStatus::Completed)?;
        self.advance(DebatePhase::Completed, "end the debate")?;
        self.status = status;
        self.closing_analysis = Some(analysis.into());
        self.completed_at = Some(self.updated_at);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Internal helpers
    // ───────────────────────────────────────────────────────────────

    fn ensure_open(&self) -> Result<(), DebateError> {
        if self.is_completed() {
            return Err(DebateError::SessionClosed(self.id));
        }
        Ok(())
    }

    fn ensure_phase(&self, expected: DebatePhase, action: &str) -> Result<(), DebateError> {
        if self.phase != expected {
            return Err(DebateError::invalid_state(action, self.phase));
        }
        Ok(())
    }

    fn advance(&mut self, target: DebatePhase, action: &str) -> Result<(), DebateError> {
        self.phase = self
            .phase
            .transition_to(target)
            .map_err(|_| DebateError::invalid_state(action, self.phase))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
