//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `generation` - Text-generation backends (OpenAI, Anthropic, Gemini, demo, mock)
//! - `storage` - Session stores (in-memory, YAML files)

pub mod generation;
pub mod storage;

pub use generation::{build_generator, FailoverGenerator, MockGenerator, UnavailableGenerator};
pub use storage::{build_store, FileSessionStore, InMemorySessionStore};
