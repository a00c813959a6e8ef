//! In-memory session store: a mapping from opaque session identifiers to quiz
//! attempts. Handed to the state machine explicitly instead of living in
//! ambient framework state; the HTTP layer keeps the identifier in a private
//! cookie.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::quiz::{AnswerOutcome, Progress, Quiz, QuizError, QuizSession};

/// Server-side store of active quiz sessions.
///
/// A single lock over the whole map; mutations are serialized, and two
/// requests racing the same identifier resolve last-write-wins.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<Uuid, QuizSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh attempt at `quiz` and return its new identifier.
    ///
    /// Any prior session the caller held (identified by `prior`) is dropped:
    /// a caller has at most one active attempt.
    pub async fn start(&self, prior: Option<Uuid>, quiz: Quiz) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.inner.write().await;
        if let Some(old) = prior {
            sessions.remove(&old);
        }
        sessions.insert(id, QuizSession::start(quiz));
        id
    }

    /// Snapshot of a session, if it exists.
    pub async fn get(&self, id: Uuid) -> Option<QuizSession> {
        self.inner.read().await.get(&id).cloned()
    }

    /// What the session identified by `id` currently presents.
    pub async fn progress(&self, id: Uuid) -> Option<Progress> {
        self.inner
            .read()
            .await
            .get(&id)
            .map(|session| session.current_question())
    }

    /// Check an answer against the session's current question.
    ///
    /// Returns the outcome together with the post-submission progress so the
    /// caller can render the next question or the summary without a second
    /// lookup. Fails closed with `InvalidState` when the identifier is
    /// unknown or the attempt is already complete.
    pub async fn check_answer(
        &self,
        id: Uuid,
        user_answer: &str,
    ) -> Result<(AnswerOutcome, Progress), QuizError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(QuizError::InvalidState("no active session"))?;

        let outcome = session.submit_answer(user_answer)?;
        Ok((outcome, session.current_question()))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
