//! StartDebateHandler - Command handler for opening a new debate.

use std::sync::Arc;

use super::DebateHandlerError;
use crate::application::DebateSessionEngine;
use crate::domain::debate::{find_topic, DebateError, DebateSession, Difficulty, Topic};
use crate::domain::foundation::UserId;
use crate::ports::{GenerationError, SessionStore};

/// Which topic to debate.
#[derive(Debug, Clone)]
pub enum TopicChoice {
    /// A built-in topic by id.
    Catalog(String),
    /// A user-supplied proposition.
    Custom {
        title: String,
        description: String,
        difficulty: Difficulty,
        category: String,
    },
}

/// Command to start a debate.
#[derive(Debug, Clone)]
pub struct StartDebateCommand {
    pub topic: TopicChoice,
    pub user_id: Option<UserId>,
}

impl StartDebateCommand {
    /// Starts an anonymous debate on a built-in topic.
    pub fn catalog(topic_id: impl Into<String>) -> Self {
        Self {
            topic: TopicChoice::Catalog(topic_id.into()),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Result of starting a debate.
#[derive(Debug, Clone)]
pub struct StartDebateResult {
    pub session: DebateSession,
    /// Set when the opening came from the fallback path.
    pub degraded: Option<GenerationError>,
}

/// Handler for starting debates.
pub struct StartDebateHandler {
    engine: Arc<DebateSessionEngine>,
    store: Arc<dyn SessionStore>,
}

impl StartDebateHandler {
    pub fn new(engine: Arc<DebateSessionEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self { engine, store }
    }

    pub async fn handle(
        &self,
        cmd: StartDebateCommand,
    ) -> Result<StartDebateResult, DebateHandlerError> {
        // 1. Resolve the topic
        let topic = match cmd.topic {
            TopicChoice::Catalog(id) => find_topic(&id)
                .cloned()
                .ok_or(DebateHandlerError::TopicNotFound(id))?,
            TopicChoice::Custom {
                title,
                description,
                difficulty,
                category,
            } => Topic::custom(title, description, difficulty, category)
                .map_err(DebateError::from)?,
        };

        // 2. Open the debate
        let transition = self.engine.start(topic, cmd.user_id).await?;

        // 3. Persist
        self.store.save(&transition.session).await?;

        Ok(StartDebateResult {
            session: transition.session,
            degraded: transition.degraded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::generation::{MockGenerator, UnavailableGenerator};
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::debate::DebatePhase;

    fn handler_with(
        generator: Arc<dyn crate::ports::GenerationPort>,
    ) -> (StartDebateHandler, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let engine = Arc::new(DebateSessionEngine::with_seed(generator, 1));
        (StartDebateHandler::new(engine, store.clone()), store)
    }

    #[tokio::test]
    async fn starts_catalog_debate_and_saves_it() {
        let (handler, store) = handler_with(Arc::new(MockGenerator::new().with_response("OPENING")));

        let result = handler
            .handle(StartDebateCommand::catalog("1").with_user(UserId::new("alice").unwrap()))
            .await
            .unwrap();

        assert!(result.degraded.is_none());
        assert_eq!(result.session.phase(), DebatePhase::AwaitingUserTurn);
        let saved = store.load(result.session.id()).await.unwrap();
        assert_eq!(saved.turns()[0].text(), "OPENING");
        assert_eq!(saved.user_id().map(|u| u.as_str()), Some("alice"));
    }

    #[tokio::test]
    async fn unknown_topic_is_rejected() {
        let (handler, store) = handler_with(Arc::new(MockGenerator::new()));

        let err = handler
            .handle(StartDebateCommand::catalog("99"))
            .await
            .unwrap_err();

        assert_eq!(err, DebateHandlerError::TopicNotFound("99".to_string()));
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn custom_topic_with_blank_title_is_rejected() {
        let (handler, _) = handler_with(Arc::new(MockGenerator::new()));
        let cmd = StartDebateCommand {
            topic: TopicChoice::Custom {
                title: "   ".to_string(),
                description: String::new(),
                difficulty: Difficulty::Medium,
                category: String::new(),
            },
            user_id: None,
        };

        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(
            err,
            DebateHandlerError::Debate(DebateError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn demo_mode_still_saves_session() {
        let (handler, store) = handler_with(Arc::new(UnavailableGenerator::default()));

        let result = handler.handle(StartDebateCommand::catalog("2")).await.unwrap();

        assert!(result.degraded.is_some());
        assert_eq!(store.session_count().await, 1);
    }
}
