//! Debate domain - topics, turns, scoring, prompts and the session aggregate.
//!
//! Everything in this module is synchronous and free of I/O. The engine in
//! `application` drives a [`DebateSession`] through its phases and supplies
//! generated (or fallback) opponent text.

mod errors;
pub mod fallback;
mod history;
mod phase;
mod prompts;
mod scoreboard;
pub mod scoring;
mod session;
mod topic;
mod turn;

pub use errors::{DebateError, MIN_TURNS_TO_END};
pub use history::{DebateHistoryStats, DebateOutcome, OutcomeFilter};
pub use phase::DebatePhase;
pub use prompts::{build_prompt, FinalScores, PromptPhase, REBUTTAL_WINDOW};
pub use scoreboard::{Leader, Scoreboard};
pub use scoring::{evaluate, score, ScoreBreakdown};
pub use session::DebateSession;
pub use topic::{catalog, find_topic, Difficulty, Topic, MAX_TOPIC_TITLE_LENGTH};
pub use turn::{Speaker, Turn, TurnOrigin, MAX_SCORE, MIN_SCORE};
