//! Chat service - session registry over dialogue managers.
//!
//! Each session owns one `DialogueManager` behind its own mutex. Utterances
//! for a session are handled one at a time; a message that arrives while
//! another is still being handled is rejected with `SessionBusy` instead of
//! being interleaved with it.
//!
//! A turn runs on its own task that owns the session lock, so it always
//! finishes (store call, state change and bot reply together) even if the
//! caller stops waiting. Sessions idle longer than the configured timeout
//! are evicted when new ones open, and the registry is capped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use super::dialogue_manager::{DialogueManager, DialogueServices, DialogueSettings};
use crate::domain::dialogue::{DialoguePhase, Message};
use crate::domain::foundation::{EmployeeIdentity, SessionId, ValidationError};

/// Errors surfaced to the chat transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    /// Message content is empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyContent,

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Another message for this session is still being handled.
    #[error("Session {0} is busy handling another message")]
    SessionBusy(SessionId),

    /// The registry is full of active sessions.
    #[error("Session limit of {0} reached")]
    SessionLimitReached(usize),

    /// The task running the turn panicked.
    #[error("Session {0} failed while handling a message")]
    TurnFailed(SessionId),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Sessions kept open by default.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Idle time after which a session may be evicted, by default.
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Bounds on the session registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub max_sessions: usize,
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
        }
    }
}

/// Read-only view of a session for display.
#[derive(Debug, Clone)]
pub struct SessionTranscript {
    pub session_id: SessionId,
    pub identity: EmployeeIdentity,
    pub phase: DialoguePhase,
    pub messages: Vec<Message>,
}

/// Registry of live chat sessions.
pub struct ChatService {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<DialogueManager>>>>,
    services: DialogueServices,
    settings: DialogueSettings,
    limits: SessionLimits,
}

impl ChatService {
    pub fn new(services: DialogueServices, settings: DialogueSettings) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            services,
            settings,
            limits: SessionLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SessionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Opens a session for an employee.
    ///
    /// Idle sessions are evicted first; if the registry is still full the
    /// session is refused.
    pub async fn start_session(&self, identity: &str) -> Result<SessionId, ChatError> {
        let identity = EmployeeIdentity::new(identity)?;
        let mut sessions = self.sessions.write().await;

        evict_idle(&mut sessions, self.limits.idle_timeout);
        if sessions.len() >= self.limits.max_sessions {
            tracing::warn!(max_sessions = self.limits.max_sessions, "Session limit reached");
            return Err(ChatError::SessionLimitReached(self.limits.max_sessions));
        }

        let session_id = SessionId::new();
        let manager = DialogueManager::new(identity.clone(), self.services.clone(), self.settings);
        sessions.insert(session_id, Arc::new(Mutex::new(manager)));

        tracing::info!(session_id = %session_id, identity = %identity, "Chat session started");
        Ok(session_id)
    }

    /// Closes a session. A turn still in flight finishes first.
    pub async fn close_session(&self, session_id: SessionId) -> Result<(), ChatError> {
        if self.sessions.write().await.remove(&session_id).is_none() {
            return Err(ChatError::SessionNotFound(session_id));
        }
        tracing::info!(session_id = %session_id, "Chat session closed");
        Ok(())
    }

    /// Handles one user message and returns the bot replies.
    pub async fn send_message(
        &self,
        session_id: SessionId,
        content: &str,
    ) -> Result<Vec<Message>, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::EmptyContent);
        }

        let session = self.session(session_id).await?;
        let mut manager = session
            .try_lock_owned()
            .map_err(|_| ChatError::SessionBusy(session_id))?;

        let content = content.to_string();
        tokio::spawn(async move { manager.handle(&content).await })
            .await
            .map_err(|e| {
                tracing::error!(session_id = %session_id, error = %e, "Turn task failed");
                ChatError::TurnFailed(session_id)
            })
    }

    /// Returns the session's transcript, waiting for any in-flight message.
    pub async fn transcript(&self, session_id: SessionId) -> Result<SessionTranscript, ChatError> {
        let session = self.session(session_id).await?;
        let manager = session.lock().await;

        Ok(SessionTranscript {
            session_id,
            identity: manager.identity().clone(),
            phase: manager.phase(),
            messages: manager.transcript().messages().to_vec(),
        })
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn session(&self, session_id: SessionId) -> Result<Arc<Mutex<DialogueManager>>, ChatError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(ChatError::SessionNotFound(session_id))
    }
}

/// Drops sessions idle for at least `idle_timeout`. Busy sessions stay.
fn evict_idle(
    sessions: &mut HashMap<SessionId, Arc<Mutex<DialogueManager>>>,
    idle_timeout: Duration,
) {
    let before = sessions.len();
    sessions.retain(|_, session| match session.try_lock() {
        Ok(manager) => manager.idle_for() < idle_timeout,
        Err(_) => true,
    });

    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle chat sessions");
    }
}
