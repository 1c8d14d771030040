//! In-memory chat session store.
//!
//! Backed by a `DashMap` so concurrent sessions never contend on a global lock.
//! Guards are never held across `.await`; every method clones what it returns.
//! Sessions with no activity for the idle TTL are dropped by a background sweep.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::assistant::rules::WELCOME_MESSAGE;
use crate::chat::models::{ChatSession, ChatSessionView, ChatTurn};
use crate::errors::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Chat session {0} not found")]
    NotFound(Uuid),

    #[error("Chat session {0} is still waiting for a reply")]
    ReplyPending(Uuid),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => AppError::NotFound(err.to_string()),
            SessionError::ReplyPending(_) => AppError::Conflict(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, ChatSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session seeded with the assistant's welcome turn.
    pub fn create(&self) -> ChatSessionView {
        let session = ChatSession {
            id: Uuid::new_v4(),
            turns: vec![ChatTurn::assistant(WELCOME_MESSAGE, None)],
            pending: false,
            created_at: Utc::now(),
            last_active: Instant::now(),
        };
        let view = ChatSessionView::from(&session);
        self.sessions.insert(session.id, session);
        view
    }

    pub fn get(&self, id: Uuid) -> Option<ChatSessionView> {
        self.sessions.get(&id).map(|s| ChatSessionView::from(s.value()))
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Appends the user's turn and marks the session as awaiting a reply.
    ///
    /// Rejects the submission if an earlier one has not been answered yet, which keeps
    /// replies in submission order within a session.
    pub fn begin_submission(&self, id: Uuid, text: &str) -> Result<ChatTurn, SessionError> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound(id))?;

        if session.pending {
            return Err(SessionError::ReplyPending(id));
        }

        let turn = ChatTurn::user(text);
        session.turns.push(turn.clone());
        session.pending = true;
        session.last_active = Instant::now();
        Ok(turn)
    }

    /// Appends the assistant's reply and clears the pending flag.
    /// Returns `NotFound` if the session was deleted while the reply was being prepared.
    pub fn complete_submission(&self, id: Uuid, reply: ChatTurn) -> Result<ChatTurn, SessionError> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound(id))?;

        session.turns.push(reply.clone());
        session.pending = false;
        session.last_active = Instant::now();
        Ok(reply)
    }

    /// Drops sessions idle for at least `ttl`. Sessions awaiting a reply are kept.
    /// Returns how many were removed.
    pub fn purge_idle(&self, ttl: Duration) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, session| {
            let keep = session.pending || session.last_active.elapsed() < ttl;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Runs `purge_idle` every `every` until the returned handle is aborted.
    /// `every` must be non-zero.
    pub fn spawn_idle_sweeper(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = time::interval(every);
            loop {
                interval.tick().await;
                let removed = store.purge_idle(ttl);
                if removed > 0 {
                    debug!(removed, remaining = store.len(), "expired idle chat sessions");
                }
            }
        })
    }
}
