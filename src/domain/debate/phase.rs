//! Turn-taking phases of a debate session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a debate session sits in the turn-taking cycle.
///
/// ```text
/// Created -> AwaitingOpponentOpening -> AwaitingUserTurn <-> AwaitingOpponentTurn
///                                              |                    |
///                                              +----> Completed <---+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    /// Topic selected, no turns yet.
    #[default]
    Created,
    /// Waiting for the opponent's opening statement.
    AwaitingOpponentOpening,
    AwaitingUserTurn,
    AwaitingOpponentTurn,
    Completed,
}

impl DebatePhase {
    /// Returns true if a user turn may be submitted in this phase.
    pub fn accepts_user_turn(&self) -> bool {
        matches!(self, DebatePhase::AwaitingUserTurn)
    }

    /// Returns true if the debate may be ended from this phase.
    pub fn can_end(&self) -> bool {
        matches!(
            self,
            DebatePhase::AwaitingUserTurn | DebatePhase::AwaitingOpponentTurn
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            DebatePhase::Created => "created",
            DebatePhase::AwaitingOpponentOpening => "awaiting opponent opening",
            DebatePhase::AwaitingUserTurn => "awaiting user turn",
            DebatePhase::AwaitingOpponentTurn => "awaiting opponent turn",
            DebatePhase::Completed => "completed",
        }
    }
}

impl StateMachine for DebatePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DebatePhase::*;
        matches!(
            (self, target),
            (Created, AwaitingOpponentOpening)
                | (AwaitingOpponentOpening, AwaitingUserTurn)
                | (AwaitingUserTurn, AwaitingOpponentTurn)
                | (AwaitingOpponentTurn, AwaitingUserTurn)
                | (AwaitingUserTurn, Completed)
                | (AwaitingOpponentTurn, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DebatePhase::*;
        match self {
            Created => vec![AwaitingOpponentOpening],
            AwaitingOpponentOpening => vec![AwaitingUserTurn],
            AwaitingUserTurn => vec![AwaitingOpponentTurn, Completed],
            AwaitingOpponentTurn => vec![AwaitingUserTurn, Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DebatePhase; 5] = [
        DebatePhase::Created,
        DebatePhase::AwaitingOpponentOpening,
        DebatePhase::AwaitingUserTurn,
        DebatePhase::AwaitingOpponentTurn,
        DebatePhase::Completed,
    ];

    #[test]
    fn valid_transitions_agree_with_can_transition_to() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn opening_path_is_linear() {
        let phase = DebatePhase::Created
            .transition_to(DebatePhase::AwaitingOpponentOpening)
            .and_then(|p| p.transition_to(DebatePhase::AwaitingUserTurn));
        assert_eq!(phase, Ok(DebatePhase::AwaitingUserTurn));
    }

    #[test]
    fn cannot_skip_opening() {
        assert!(DebatePhase::Created
            .transition_to(DebatePhase::AwaitingUserTurn)
            .is_err());
        assert!(!DebatePhase::AwaitingOpponentOpening.can_transition_to(&DebatePhase::Completed));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(DebatePhase::Completed.is_terminal());
        assert!(!DebatePhase::AwaitingUserTurn.is_terminal());
    }

    #[test]
    fn only_awaiting_user_turn_accepts_turns() {
        let accepting: Vec<_> = ALL.iter().filter(|p| p.accepts_user_turn()).collect();
        assert_eq!(accepting, vec![&DebatePhase::AwaitingUserTurn]);
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DebatePhase::AwaitingOpponentTurn).unwrap(),
            "\"awaiting_opponent_turn\""
        );
    }
}
