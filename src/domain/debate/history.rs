//! Read-side history of a user's debates: outcomes, filters and aggregate stats.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::scoring::round_tenth;
use super::{DebateSession, Leader, Scoreboard};
use crate::domain::foundation::ValidationError;

/// Result of a completed debate from the user's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebateOutcome {
    Won,
    Lost,
    Tied,
}

impl DebateOutcome {
    /// Outcome of a finished debate; `None` while it is still running.
    pub fn of(session: &DebateSession) -> Option<Self> {
        if !session.is_completed() {
            return None;
        }
        Some(match Scoreboard::from_session(session).leader {
            Leader::User => DebateOutcome::Won,
            Leader::Opponent => DebateOutcome::Lost,
            Leader::Tie => DebateOutcome::Tied,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebateOutcome::Won => "won",
            DebateOutcome::Lost => "lost",
            DebateOutcome::Tied => "tied",
        }
    }
}

impl fmt::Display for DebateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which debates a history listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeFilter {
    #[default]
    All,
    Won,
    Lost,
}

impl OutcomeFilter {
    pub fn matches(&self, outcome: Option<DebateOutcome>) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::Won => outcome == Some(DebateOutcome::Won),
            OutcomeFilter::Lost => outcome == Some(DebateOutcome::Lost),
        }
    }
}

impl FromStr for OutcomeFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(OutcomeFilter::All),
            "won" => Ok(OutcomeFilter::Won),
            "lost" => Ok(OutcomeFilter::Lost),
            other => Err(ValidationError::invalid_format(
                "filter",
                format!("expected all, won or lost, got '{}'", other),
            )),
        }
    }
}

/// Aggregate statistics over a user's completed debates.
///
/// Running debates are ignored so that a half-finished session never counts
/// as a loss.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebateHistoryStats {
    pub total_debates: u32,
    /// Share of completed debates won, as a whole percentage.
    pub win_rate: u32,
    /// Mean of each debate's per-round user score.
    pub avg_score: f64,
    pub total_rounds: u32,
    /// Most debated category; ties go to the alphabetically first.
    pub favorite_category: Option<String>,
    /// Most rounds in a single debate.
    pub longest_debate: u32,
}

impl DebateHistoryStats {
    pub fn from_sessions<'a>(sessions: impl IntoIterator<Item = &'a DebateSession>) -> Self {
        let mut total_debates = 0u32;
        let mut wins = 0u32;
        let mut average_sum = 0.0;
        let mut total_rounds = 0u32;
        let mut longest_debate = 0u32;
        let mut categories: BTreeMap<&str, u32> = BTreeMap::new();

        for session in sessions.into_iter().filter(|s| s.is_completed()) {
            let board = Scoreboard::from_session(session);
            total_debates += 1;
            if board.leader == Leader::User {
                wins += 1;
            }
            average_sum += board.user_average;
            total_rounds += board.rounds;
            longest_debate = longest_debate.max(board.rounds);
            *categories.entry(session.topic().category()).or_default() += 1;
        }

        if total_debates == 0 {
            return Self::empty();
        }

        let mut favorite: Option<(&str, u32)> = None;
        for (category, count) in categories {
            if favorite.map_or(true, |(_, best)| count > best) {
                favorite = Some((category, count));
            }
        }

        Self {
            total_debates,
            win_rate: (f64::from(wins) * 100.0 / f64::from(total_debates)).round() as u32,
            avg_score: round_tenth(average_sum / f64::from(total_debates)),
            total_rounds,
            favorite_category: favorite.map(|(category, _)| category.to_string()),
            longest_debate,
        }
    }

    fn empty() -> Self {
        Self {
            total_debates: 0,
            win_rate: 0,
            avg_score: 0.0,
            total_rounds: 0,
            favorite_category: None,
            longest_debate: 0,
        }
    }
}
