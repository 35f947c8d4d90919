//! File-based Session Store Adapter
//!
//! Stores each debate session as a YAML file named after its id:
//! `{base_path}/{session_id}.yaml`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::debate::DebateSession;
use crate::domain::foundation::{SessionId, UserId};
use crate::ports::{SessionStore, StoreError};

const EXTENSION: &str = "yaml";

/// File-based storage for debate sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created on first save.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_path(&self, id: &SessionId) -> PathBuf {
        self.base_path.join(format!("{}.{}", id, EXTENSION))
    }

    async fn read_session(path: &Path) -> Result<DebateSession, StoreError> {
        let yaml = fs::read_to_string(path).await?;
        serde_yaml::from_str(&yaml).map_err(|e| StoreError::DeserializationFailed(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, id: &SessionId) -> Result<DebateSession, StoreError> {
        let path = self.session_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(*id));
        }
        Self::read_session(&path).await
    }

    async fn save(&self, session: &DebateSession) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path).await?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        // Write then rename so readers never see a half-written file
        let path = self.session_path(session.id());
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml).await?;
        fs::rename(&temp_path, &path).await?;

        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<DebateSession>, StoreError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read_session(&path).await {
                Ok(session) if session.user_id() == Some(user_id) => sessions.push(session),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable session file");
                }
            }
        }

        sessions.sort_by(|a, b| b.started_at().cmp(a.started_at()));
        Ok(sessions)
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let path = self.session_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(*id));
        }
        fs::remove_file(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::debate::{find_topic, TurnOrigin};
    use std::time::Duration;
    use tempfile::TempDir;

    fn session_for(user: Option<&str>) -> DebateSession {
        let topic = find_topic("2").unwrap().clone();
        DebateSession::new(topic, user.map(|u| UserId::new(u).unwrap()))
    }

    #[tokio::test]
    async fn test_file_store_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let mut session = session_for(Some("alice"));
        session.begin_opening().unwrap();
        session
            .record_opening("Social media connects people.", TurnOrigin::Generated)
            .unwrap();
        session.accept_user_turn("It also isolates them.").unwrap();

        store.save(&session).await.unwrap();
        let loaded = store.load(session.id()).await.unwrap();

        assert_eq!(loaded.id(), session.id());
        assert_eq!(loaded.phase(), session.phase());
        assert_eq!(loaded.turns().len(), 2);
        assert_eq!(loaded.turns()[1].text(), "It also isolates them.");
        assert_eq!(loaded.user_id(), session.user_id());
    }

    #[tokio::test]
    async fn test_file_store_writes_one_yaml_per_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("nested"));
        let session = session_for(None);

        store.save(&session).await.unwrap();

        let expected = temp_dir
            .path()
            .join("nested")
            .join(format!("{}.yaml", session.id()));
        assert!(expected.exists());
        assert!(!expected.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let result = store.load(&SessionId::new()).await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_fails_to_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let id = SessionId::new();
        std::fs::write(temp_dir.path().join(format!("{}.yaml", id)), "not: [a session").unwrap();

        let result = store.load(&id).await;

        assert!(matches!(result, Err(StoreError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn test_file_store_list_by_user() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let older = session_for(Some("alice"));
        tokio::time::sleep(Duration::from_millis(5)).await;
        let newer = session_for(Some("alice"));
        let other = session_for(Some("bob"));
        for s in [&older, &newer, &other] {
            store.save(s).await.unwrap();
        }
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let listed = store
            .list_by_user(&UserId::new("alice").unwrap())
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), newer.id());
        assert_eq!(listed[1].id(), older.id());
    }

    #[tokio::test]
    async fn test_file_store_list_without_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("missing"));

        let listed = store
            .list_by_user(&UserId::new("alice").unwrap())
            .await
            .unwrap();

        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let session = session_for(None);
        store.save(&session).await.unwrap();

        store.delete(session.id()).await.unwrap();

        assert!(matches!(
            store.load(session.id()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(session.id()).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
