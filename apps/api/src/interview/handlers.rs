//! Axum route handlers for the Interview Prep API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::chat::exchange::validate_message;
use crate::errors::AppError;
use crate::interview::coach::{InterviewContext, InterviewQuestion, ResponseAnalysis};
use crate::interview::history::{clamp_limit, list_history, record_analysis, RecordParams};
use crate::models::interview::InterviewSessionRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(flatten)]
    pub context: InterviewContext,
    pub question: String,
    pub response: String,
    /// When present, the analysis is kept in the user's practice history.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: ResponseAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Where an `/ask` answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Llm,
    Assistant,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
    pub source: AnswerSource,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(ctx): Json<InterviewContext>,
) -> Result<Json<QuestionsResponse>, AppError> {
    ctx.validate()?;
    let questions = state.coach.generate_questions(&ctx).await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/v1/interview/analyze
///
/// History writes are best-effort: a failed insert is logged and the analysis is
/// still returned.
pub async fn handle_analyze_response(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    request.context.validate()?;
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    if request.response.trim().is_empty() {
        return Err(AppError::Validation("response cannot be empty".to_string()));
    }

    let analysis = state
        .coach
        .analyze_response(&request.context, &request.question, &request.response)
        .await?;

    let session_id = match request.user_id {
        Some(user_id) => {
            let params = RecordParams {
                user_id,
                ctx: &request.context,
                question: &request.question,
                response: &request.response,
                analysis: &analysis,
            };
            match record_analysis(&state.db, params).await {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!("Failed to record interview practice for user {user_id}: {e:#}");
                    None
                }
            }
        }
        None => None,
    };

    Ok(Json(AnalyzeResponse {
        analysis,
        session_id,
    }))
}

/// POST /api/v1/interview/insights
pub async fn handle_company_insights(
    State(state): State<AppState>,
    Json(ctx): Json<InterviewContext>,
) -> Result<Json<AdviceResponse>, AppError> {
    ctx.validate()?;
    let response = state.coach.company_insights(&ctx).await?;
    Ok(Json(AdviceResponse { response }))
}

/// POST /api/v1/interview/body-language
pub async fn handle_body_language_tips(
    State(state): State<AppState>,
    Json(ctx): Json<InterviewContext>,
) -> Result<Json<AdviceResponse>, AppError> {
    ctx.validate()?;
    let response = state.coach.body_language_tips(&ctx).await?;
    Ok(Json(AdviceResponse { response }))
}

/// POST /api/v1/interview/ask
///
/// Answers a question about the platform through the LLM. If the LLM call fails the
/// keyword assistant answers instead, so the user always gets a reply.
pub async fn handle_platform_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    validate_message(&request.question, state.matcher.max_input_chars())?;

    match state.coach.answer_platform_question(&request.question).await {
        Ok(response) => Ok(Json(AskResponse {
            response,
            source: AnswerSource::Llm,
        })),
        Err(e) => {
            warn!("Platform question fell back to keyword assistant: {e}");
            let reply = state.matcher.respond(&request.question);
            Ok(Json(AskResponse {
                response: reply.text.to_string(),
                source: AnswerSource::Assistant,
            }))
        }
    }
}

/// GET /api/v1/interview/history?user_id=&limit=
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<InterviewSessionRow>>, AppError> {
    let rows = list_history(&state.db, params.user_id, clamp_limit(params.limit)).await?;
    Ok(Json(rows))
}
