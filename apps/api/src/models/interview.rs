use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One analysed practice answer, kept for progress tracking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewSessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub question: String,
    pub response: String,
    pub analysis: Value,
    pub created_at: DateTime<Utc>,
}
