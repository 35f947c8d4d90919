//! SessionStatus enum for tracking the lifecycle of debate sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a debate session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
}

impl SessionStatus {
    /// Returns true if the session still accepts turns.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Active, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SessionStatus::Active => vec![SessionStatus::Completed],
            SessionStatus::Completed => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Active => "Active",
            SessionStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(SessionStatus::default(), SessionStatus::Active);
    }

    #[test]
    fn active_can_complete() {
        assert!(SessionStatus::Active.can_transition_to(&SessionStatus::Completed));
        assert_eq!(
            SessionStatus::Active.transition_to(SessionStatus::Completed),
            Ok(SessionStatus::Completed)
        );
    }

    #[test]
    fn completed_never_reverts() {
        assert!(!SessionStatus::Completed.can_transition_to(&SessionStatus::Active));
        assert!(SessionStatus::Completed.transition_to(SessionStatus::Active).is_err());
        assert!(SessionStatus::Completed.is_terminal());
    }

    #[test]
    fn active_cannot_transition_to_itself() {
        assert!(!SessionStatus::Active.can_transition_to(&SessionStatus::Active));
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(SessionStatus::Active.to_string(), "Active");
        assert_eq!(SessionStatus::Completed.to_string(), "Completed");
    }
}
