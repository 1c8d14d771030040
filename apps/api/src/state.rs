use std::sync::Arc;

use sqlx::PgPool;

use crate::assistant::IntentMatcher;
use crate::chat::sessions::SessionStore;
use crate::chat::typing::TypingDelay;
use crate::interview::coach::InterviewCoach;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Read-only rule table; copied into every exchange.
    pub matcher: IntentMatcher,
    pub sessions: SessionStore,
    pub typing: TypingDelay,
    /// Pluggable interview coach. Default: LlmInterviewCoach.
    pub coach: Arc<dyn InterviewCoach>,
}
