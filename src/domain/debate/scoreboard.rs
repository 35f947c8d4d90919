//! Read-side score summary for a debate session.

use serde::{Deserialize, Serialize};

use super::scoring::round_tenth;
use super::DebateSession;

/// Which side is ahead on cumulative score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leader {
    User,
    Opponent,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub user_score: f64,
    pub opponent_score: f64,
    pub rounds: u32,
    pub leader: Leader,
    /// User's share of all points awarded, as a percentage.
    pub user_share_percent: f64,
    pub user_average: f64,
    pub opponent_average: f64,
}

impl Scoreboard {
    pub fn from_session(session: &DebateSession) -> Self {
        let user = session.cumulative_user_score();
        let opponent = session.cumulative_opponent_score();
        let rounds = session.round_count();

        let leader = if user > opponent {
            Leader::User
        } else if opponent > user {
            Leader::Opponent
        } else {
            Leader::Tie
        };

        let total = user + opponent;
        let user_share_percent = if total > 0.0 {
            round_tenth(user / total * 100.0)
        } else {
            50.0
        };

        let average = |score: f64| {
            if rounds == 0 {
                0.0
            } else {
                round_tenth(score / f64::from(rounds))
            }
        };

        Self {
            user_score: user,
            opponent_score: opponent,
            rounds,
            leader,
            user_share_percent,
            user_average: average(user),
            opponent_average: average(opponent),
        }
    }
}
