//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `debate` - Topics, turns, scoring, prompt construction and the debate session aggregate

pub mod debate;
pub mod foundation;
