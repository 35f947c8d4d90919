//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, lifecycle enums, and error types
//! that form the vocabulary of the debate domain.

mod errors;
mod ids;
mod session_status;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{SessionId, TopicId, TurnId, UserId};
pub use session_status::SessionStatus;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
