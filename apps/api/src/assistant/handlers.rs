//! Axum route handler for one-shot assistant replies.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::assistant::rules::Topic;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub text: &'static str,
    pub topic: Option<Topic>,
    pub fallback: bool,
}

/// POST /api/v1/chat/respond
///
/// Runs the matcher once with no session and no typing delay.
pub async fn handle_respond(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, AppError> {
    let limit = state.matcher.max_input_chars();
    if request.text.chars().count() > limit {
        return Err(AppError::Validation(format!(
            "text exceeds {limit} characters"
        )));
    }

    let reply = state.matcher.respond(&request.text);
    tracing::debug!(
        topic = reply.topic.map(|t| t.as_str()).unwrap_or("fallback"),
        "assistant reply selected"
    );

    Ok(Json(RespondResponse {
        text: reply.text,
        topic: reply.topic,
        fallback: reply.is_fallback(),
    }))
}
