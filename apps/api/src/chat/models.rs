use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::assistant::rules::Topic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in a transcript. Transcripts are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Matched rule for assistant turns; absent for user turns and fallback replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            timestamp: Utc::now(),
            topic: None,
        }
    }

    pub fn assistant(text: impl Into<String>, topic: Option<Topic>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            topic,
        }
    }
}

/// Live session record held by the store.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub turns: Vec<ChatTurn>,
    /// True between accepting a user turn and appending its reply.
    pub pending: bool,
    pub created_at: DateTime<Utc>,
    /// Last submission or reply; drives idle expiry.
    pub last_active: Instant,
}

/// Read-only snapshot returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSessionView {
    pub id: Uuid,
    pub turns: Vec<ChatTurn>,
    pub pending: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatSession> for ChatSessionView {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id,
            turns: session.turns.clone(),
            pending: session.pending,
            created_at: session.created_at,
        }
    }
}
