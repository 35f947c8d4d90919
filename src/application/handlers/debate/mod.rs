//! Debate command and query handlers.
//!
//! Command handlers load a session, run one engine operation and save the
//! returned snapshot. Nothing is saved when the engine rejects the call.

mod end_debate;
mod errors;
mod get_debate;
mod list_debates;
mod start_debate;
mod submit_turn;

pub use end_debate::{EndDebateCommand, EndDebateHandler, EndDebateResult};
pub use errors::DebateHandlerError;
pub use get_debate::{DebateView, GetDebateHandler, GetDebateQuery};
pub use list_debates::{DebateHistory, DebateSummary, ListDebatesHandler, ListDebatesQuery};
pub use start_debate::{StartDebateCommand, StartDebateHandler, StartDebateResult, TopicChoice};
pub use submit_turn::{SubmitTurnCommand, SubmitTurnHandler, SubmitTurnResult};
