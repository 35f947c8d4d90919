//! DebateSessionEngine - drives a debate session through its phases.
//!
//! The engine owns no sessions. Each operation takes the current snapshot,
//! works on a copy, and returns the next snapshot inside a [`Transition`].
//! Callers persist the result; a call that fails (or is dropped mid-await)
//! leaves their snapshot untouched.
//!
//! Generation failures never surface as errors. The engine logs them, swaps
//! in fallback content, and reports the failure through
//! [`Transition::degraded`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

use crate::domain::debate::{
    build_prompt, fallback, score, DebateError, DebateSession, PromptPhase, Topic, TurnOrigin,
};
use crate::domain::foundation::UserId;
use crate::ports::{GenerationError, GenerationPort, GenerationRequest};

/// Outcome of one engine operation.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The session after the operation. Hand this to the store.
    pub session: DebateSession,
    /// Set when the opponent content came from the fallback path.
    pub degraded: Option<GenerationError>,
}

impl Transition {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

pub struct DebateSessionEngine {
    generator: Arc<dyn GenerationPort>,
    rng: Mutex<StdRng>,
}

impl DebateSessionEngine {
    pub fn new(generator: Arc<dyn GenerationPort>) -> Self {
        Self {
            generator,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates an engine whose demo scores are reproducible.
    pub fn with_seed(generator: Arc<dyn GenerationPort>, seed: u64) -> Self {
        Self {
            generator,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.generator.backend_name()
    }

    /// Opens a debate on `topic`. The opponent speaks first.
    pub async fn start(
        &self,
        topic: Topic,
        user_id: Option<UserId>,
    ) -> Result<Transition, DebateError> {
        let mut session = DebateSession::new(topic, user_id);
        session.begin_opening()?;

        let prompt = build_prompt(PromptPhase::Opening, session.topic(), &[], None)?;
        let (text, origin, degraded) =
            match self.generate(&session, PromptPhase::Opening, prompt).await {
                Ok(text) => (text, TurnOrigin::Generated, None),
                Err(err) => (
                    fallback::opening(session.topic()),
                    TurnOrigin::Fallback,
                    Some(err),
                ),
            };
        session.record_opening(text, origin)?;

        tracing::info!(
            session_id = %session.id(),
            topic = session.topic().title(),
            degraded = degraded.is_some(),
            "Debate started"
        );
        Ok(Transition { session, degraded })
    }

    /// Adds the user's turn and the opponent's rebuttal, scoring both.
    ///
    /// # Errors
    ///
    /// - `SessionClosed` if the debate has ended
    /// - `InvalidState` if the session is not waiting for the user
    /// - `EmptyTurn` if `text` is blank after trimming
    pub async fn submit_turn(
        &self,
        session: &DebateSession,
        text: &str,
    ) -> Result<Transition, DebateError> {
        session.ensure_can_accept(text)?;

        let mut next = session.clone();
        let user_text = next.accept_user_turn(text)?.text().to_string();
        let prompt = build_prompt(PromptPhase::Rebuttal, next.topic(), next.turns(), None)?;

        let degraded = match self.generate(&next, PromptPhase::Rebuttal, prompt).await {
            Ok(reply) => {
                let user_score = score(&user_text);
                let opponent_score = score(&reply);
                next.record_rebuttal(user_score, reply, opponent_score, TurnOrigin::Generated)?;
                None
            }
            Err(err) => {
                let reply = fallback::rebuttal(&user_text, next.round_count());
                let (user_score, opponent_score) = self.demo_scores();
                next.record_rebuttal(user_score, reply, opponent_score, TurnOrigin::Fallback)?;
                Some(err)
            }
        };

        tracing::info!(
            session_id = %next.id(),
            round = next.round_count(),
            user_total = next.cumulative_user_score(),
            opponent_total = next.cumulative_opponent_score(),
            degraded = degraded.is_some(),
            "Round recorded"
        );
        Ok(Transition {
            session: next,
            degraded,
        })
    }

    /// Ends the debate and attaches the closing analysis.
    ///
    /// # Errors
    ///
    /// - `SessionClosed` if the debate has already ended
    /// - `InsufficientRounds` with fewer than three turns
    pub async fn end(&self, session: &DebateSession) -> Result<Transition, DebateError> {
        session.ensure_can_complete()?;

        let scores = session.final_scores();
        let prompt = build_prompt(
            PromptPhase::ClosingAnalysis,
            session.topic(),
            session.turns(),
            Some(&scores),
        )?;

        let (analysis, degraded) = match self
            .generate(session, PromptPhase::ClosingAnalysis, prompt)
            .await
        {
            Ok(text) => (text, None),
            Err(err) => (fallback::analysis(session.topic(), &scores), Some(err)),
        };

        let mut next = session.clone();
        next.complete(analysis)?;

        tracing::info!(
            session_id = %next.id(),
            rounds = scores.rounds,
            user_total = scores.user,
            opponent_total = scores.opponent,
            degraded = degraded.is_some(),
            "Debate completed"
        );
        Ok(Transition {
            session: next,
            degraded,
        })
    }

    async fn generate(
        &self,
        session: &DebateSession,
        phase: PromptPhase,
        prompt: String,
    ) -> Result<String, GenerationError> {
        let request = GenerationRequest::new(phase, prompt).with_session(*session.id());
        let result = self
            .generator
            .generate(request)
            .await
            .and_then(|text| {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Err(GenerationError::format("generated text was empty"))
                } else {
                    Ok(trimmed.to_string())
                }
            });

        if let Err(err) = &result {
            tracing::warn!(
                session_id = %session.id(),
                backend = self.generator.backend_name(),
                phase = %phase,
                error_kind = err.kind(),
                error = %err,
                "Generation failed, using fallback content"
            );
        }
        result
    }

    fn demo_scores(&self) -> (f64, f64) {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        (fallback::demo_score(&mut *rng), fallback::demo_score(&mut *rng))
    }
}
