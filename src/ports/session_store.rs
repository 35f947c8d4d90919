//! Session store port.
//!
//! Defines the contract for persisting and retrieving debate sessions. The
//! engine never calls this directly; command handlers load a session, hand
//! it to the engine, and save the snapshot it returns.

use async_trait::async_trait;

use crate::domain::debate::DebateSession;
use crate::domain::foundation::{SessionId, UserId};

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for debate session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session with this id was saved
    async fn load(&self, id: &SessionId) -> Result<DebateSession, StoreError>;

    /// Inserts or replaces a session.
    async fn save(&self, session: &DebateSession) -> Result<(), StoreError>;

    /// Lists a user's sessions, most recently started first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<DebateSession>, StoreError>;

    /// Removes a session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;
}
