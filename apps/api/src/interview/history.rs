//! Practice history: an append-only record of analysed interview answers.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::interview::coach::{InterviewContext, ResponseAnalysis};
use crate::models::interview::InterviewSessionRow;

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Parameters for recording one analysed answer.
pub struct RecordParams<'a> {
    pub user_id: Uuid,
    pub ctx: &'a InterviewContext,
    pub question: &'a str,
    pub response: &'a str,
    pub analysis: &'a ResponseAnalysis,
}

/// Inserts a new history row. Never updates existing rows.
pub async fn record_analysis(pool: &PgPool, params: RecordParams<'_>) -> Result<Uuid> {
    let RecordParams {
        user_id,
        ctx,
        question,
        response,
        analysis,
    } = params;

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO interview_sessions
            (id, user_id, job_title, company, question, response, analysis)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&ctx.job_title)
    .bind(&ctx.company)
    .bind(question)
    .bind(response)
    .bind(serde_json::to_value(analysis)?)
    .execute(pool)
    .await?;

    info!("Recorded interview practice {id} for user {user_id}");
    Ok(id)
}

/// Most recent analyses for a user, newest first. `limit` is expected to come from
/// `clamp_limit`.
pub async fn list_history(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<InterviewSessionRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewSessionRow>(
        "SELECT * FROM interview_sessions WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Applies the default and upper bound to a caller-supplied page size.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_HISTORY_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(10_000)), MAX_HISTORY_LIMIT);
    }
}
