//! In-Memory Session Store Adapter
//!
//! Keeps debate sessions in a shared map. Used by the CLI by default and by
//! tests that don't care about persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::debate::DebateSession;
use crate::domain::foundation::{SessionId, UserId};
use crate::ports::{SessionStore, StoreError};

/// In-memory storage for debate sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, DebateSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<DebateSession, StoreError> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned().ok_or(StoreError::NotFound(*id))
    }

    async fn save(&self, session: &DebateSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<DebateSession>, StoreError> {
        let sessions = self.sessions.read().await;
        let mut owned: Vec<DebateSession> = sessions
            .values()
            .filter(|s| s.user_id() == Some(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.started_at().cmp(a.started_at()));
        Ok(owned)
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::debate::find_topic;
    use std::time::Duration;

    fn session_for(user: Option<&str>) -> DebateSession {
        let topic = find_topic("1").unwrap().clone();
        let user_id = user.map(|u| UserId::new(u).unwrap());
        DebateSession::new(topic, user_id)
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = InMemorySessionStore::new();
        let session = session_for(Some("alice"));

        store.save(&session).await.unwrap();
        let loaded = store.load(session.id()).await.unwrap();

        assert_eq!(loaded.id(), session.id());
        assert_eq!(loaded.topic().title(), session.topic().title());
    }

    #[tokio::test]
    async fn test_load_missing_session() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let result = store.load(&id).await;

        assert!(matches!(result, Err(StoreError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let store = InMemorySessionStore::new();
        let mut session = session_for(None);
        store.save(&session).await.unwrap();

        session.begin_opening().unwrap();
        store.save(&session).await.unwrap();

        assert_eq!(store.session_count().await, 1);
        assert_eq!(store.load(session.id()).await.unwrap().phase(), session.phase());
    }

    #[tokio::test]
    async fn test_list_by_user_filters_and_orders() {
        let store = InMemorySessionStore::new();
        let older = session_for(Some("alice"));
        tokio::time::sleep(Duration::from_millis(5)).await;
        let newer = session_for(Some("alice"));
        let other = session_for(Some("bob"));
        let anonymous = session_for(None);

        for s in [&older, &newer, &other, &anonymous] {
            store.save(s).await.unwrap();
        }

        let listed = store
            .list_by_user(&UserId::new("alice").unwrap())
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), newer.id());
        assert_eq!(listed[1].id(), older.id());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemorySessionStore::new();
        let session = session_for(None);
        store.save(&session).await.unwrap();

        store.delete(session.id()).await.unwrap();

        assert_eq!(store.session_count().await, 0);
        assert!(matches!(
            store.delete(session.id()).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemorySessionStore::new();
        store.save(&session_for(None)).await.unwrap();
        store.save(&session_for(None)).await.unwrap();

        store.clear().await;

        assert_eq!(store.session_count().await, 0);
    }
}
