//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerationPort` - Text generation from a prompt (LLM backends, fakes)
//! - `SessionStore` - Persistence of debate sessions

mod generation;
mod session_store;

pub use generation::{GenerationError, GenerationPort, GenerationRequest};
pub use session_store::{SessionStore, StoreError};
