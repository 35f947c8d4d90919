//! Command and query handlers.

pub mod debate;

pub use debate::{
    DebateHandlerError, DebateHistory, DebateSummary, DebateView, EndDebateCommand,
    EndDebateHandler, EndDebateResult, GetDebateHandler, GetDebateQuery, ListDebatesHandler,
    ListDebatesQuery, StartDebateCommand, StartDebateHandler, StartDebateResult,
    SubmitTurnCommand, SubmitTurnHandler, SubmitTurnResult, TopicChoice,
};
