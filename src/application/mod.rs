//! Application layer - the debate engine and its command/query handlers.
//!
//! The engine applies debate rules and the fallback policy to session
//! values. Handlers wrap it with loading and saving through the
//! `SessionStore` port.

mod engine;
pub mod handlers;

pub use engine::{DebateSessionEngine, Transition};
pub use handlers::{
    DebateHandlerError, DebateHistory, DebateSummary, DebateView, EndDebateCommand,
    EndDebateHandler, EndDebateResult, GetDebateHandler, GetDebateQuery, ListDebatesHandler,
    ListDebatesQuery, StartDebateCommand, StartDebateHandler, StartDebateResult,
    SubmitTurnCommand, SubmitTurnHandler, SubmitTurnResult, TopicChoice,
};
