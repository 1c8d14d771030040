//! One user-to-assistant exchange within a chat session.
//!
//! The reply is produced on a spawned task so that a client disconnecting during the
//! typing delay cannot leave the session stuck in the pending state.

use anyhow::anyhow;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::assistant::IntentMatcher;
use crate::chat::models::ChatTurn;
use crate::chat::sessions::SessionStore;
use crate::chat::typing::TypingDelay;
use crate::errors::AppError;

/// Both halves of a completed exchange.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Exchange {
    pub user: ChatTurn,
    pub reply: ChatTurn,
}

/// Rejects blank text and text longer than the matcher inspects.
pub fn validate_message(text: &str, max_chars: usize) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    if text.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "text exceeds {max_chars} characters"
        )));
    }
    Ok(())
}

/// Records the user's message, waits out the typing delay, then appends exactly one reply.
pub async fn submit_message(
    store: &SessionStore,
    matcher: IntentMatcher,
    typing: TypingDelay,
    session_id: Uuid,
    text: String,
) -> Result<Exchange, AppError> {
    validate_message(&text, matcher.max_input_chars())?;

    let user = store.begin_submission(session_id, &text)?;

    let store = store.clone();
    let delay = typing.sample();
    let task = tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let reply = matcher.respond(&text);
        debug!(
            %session_id,
            topic = reply.topic.map(|t| t.as_str()).unwrap_or("fallback"),
            delay_ms = delay.as_millis() as u64,
            "assistant reply ready"
        );
        store.complete_submission(session_id, ChatTurn::assistant(reply.text, reply.topic))
    });

    let reply = task
        .await
        .map_err(|e| AppError::Internal(anyhow!("reply task failed: {e}")))?
        .map_err(|e| {
            warn!("Session {session_id} closed before its reply was delivered");
            AppError::from(e)
        })?;

    Ok(Exchange { user, reply })
}
