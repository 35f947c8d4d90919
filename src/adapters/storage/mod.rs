//! Storage Adapters
//!
//! Implementations of the SessionStore port for persisting debate sessions.
//!
//! ## Available Adapters
//!
//! - **FileSessionStore** - Stores each session as a YAML file on disk
//! - **InMemorySessionStore** - Stores sessions in memory (default, testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionStore, InMemorySessionStore};
//!
//! let store = FileSessionStore::new("./data/sessions");
//! let store = InMemorySessionStore::new();
//! ```

mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::ports::SessionStore;

/// Builds the session store selected by `config`.
pub fn build_store(config: &StorageConfig) -> Arc<dyn SessionStore> {
    match config.backend {
        StorageBackend::Memory => Arc::new(InMemorySessionStore::new()),
        StorageBackend::File => Arc::new(FileSessionStore::new(&config.data_dir)),
    }
}
