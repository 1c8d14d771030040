//! Axum route handlers for the Chat API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::chat::exchange::{submit_message, Exchange};
use crate::chat::models::ChatSessionView;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitMessageRequest {
    pub text: String,
}

/// POST /api/v1/chat/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ChatSessionView>) {
    let view = state.sessions.create();
    info!(
        "Opened chat session {} ({} active)",
        view.id,
        state.sessions.len()
    );
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/chat/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSessionView>, AppError> {
    state
        .sessions
        .get(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Chat session {id} not found")))
}

/// DELETE /api/v1/chat/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Chat session {id} not found")))
    }
}

/// POST /api/v1/chat/sessions/:id/messages
///
/// Responds after the configured typing delay. A second submission while the first is
/// still pending gets 409.
pub async fn handle_submit_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitMessageRequest>,
) -> Result<Json<Exchange>, AppError> {
    let exchange =
        submit_message(&state.sessions, state.matcher, state.typing, id, request.text).await?;
    Ok(Json(exchange))
}
