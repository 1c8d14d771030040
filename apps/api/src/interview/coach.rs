//! Interview coach: trait-based access to LLM interview preparation.
//!
//! Default: `LlmInterviewCoach` (hosted model via `LlmClient`).
//! `AppState` holds an `Arc<dyn InterviewCoach>` so handlers can be exercised with stubs.

use async_trait::async_trait;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::interview::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, BODY_LANGUAGE_PROMPT_TEMPLATE,
    BODY_LANGUAGE_SYSTEM, INSIGHTS_PROMPT_TEMPLATE, INSIGHTS_SYSTEM, PLATFORM_PROMPT_TEMPLATE,
    PLATFORM_SYSTEM, QUESTIONS_PROMPT_TEMPLATE, QUESTIONS_SYSTEM,
};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, STUDENT_AUDIENCE};
use crate::llm_client::LlmClient;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Mixed,
    Technical,
    Behavioral,
    Cultural,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mixed => "mixed",
            QuestionType::Technical => "technical",
            QuestionType::Behavioral => "behavioral",
            QuestionType::Cultural => "cultural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Technical,
    Behavioral,
    Cultural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Job details the coach tailors its output to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewContext {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub question_type: QuestionType,
}

impl InterviewContext {
    /// Title and company are required for every coach call that takes a context.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_title.trim().is_empty() {
            return Err(AppError::Validation("job_title cannot be empty".to_string()));
        }
        if self.company.trim().is_empty() {
            return Err(AppError::Validation("company cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub category: QuestionCategory,
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
struct QuestionSet {
    questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseAnalysis {
    pub content_feedback: String,
    /// 1 to 10. Models sometimes answer with floats, strings or out-of-range numbers.
    #[serde(deserialize_with = "lenient_confidence")]
    pub confidence: u8,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub improvements: Vec<String>,
    pub suggested_structure: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait InterviewCoach: Send + Sync {
    async fn generate_questions(
        &self,
        ctx: &InterviewContext,
    ) -> Result<Vec<InterviewQuestion>, AppError>;

    async fn analyze_response(
        &self,
        ctx: &InterviewContext,
        question: &str,
        response: &str,
    ) -> Result<ResponseAnalysis, AppError>;

    async fn company_insights(&self, ctx: &InterviewContext) -> Result<String, AppError>;

    async fn body_language_tips(&self, ctx: &InterviewContext) -> Result<String, AppError>;

    /// Free-form question about the job board itself.
    async fn answer_platform_question(&self, question: &str) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmInterviewCoach
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmInterviewCoach(pub LlmClient);

#[async_trait]
impl InterviewCoach for LlmInterviewCoach {
    async fn generate_questions(
        &self,
        ctx: &InterviewContext,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        let system = json_system(QUESTIONS_SYSTEM);
        let set: QuestionSet = self
            .0
            .call_json(&build_questions_prompt(ctx), &system)
            .await
            .map_err(|e| AppError::Llm(format!("question generation failed: {e}")))?;

        let questions: Vec<InterviewQuestion> = set
            .questions
            .into_iter()
            .filter(|q| !q.question.trim().is_empty())
            .collect();
        if questions.is_empty() {
            return Err(AppError::Llm(
                "question generation returned no questions".to_string(),
            ));
        }
        Ok(questions)
    }

    async fn analyze_response(
        &self,
        ctx: &InterviewContext,
        question: &str,
        response: &str,
    ) -> Result<ResponseAnalysis, AppError> {
        let system = json_system(ANALYSIS_SYSTEM);
        let analysis: ResponseAnalysis = self
            .0
            .call_json(&build_analysis_prompt(ctx, question, response), &system)
            .await
            .map_err(|e| AppError::Llm(format!("response analysis failed: {e}")))?;
        Ok(normalize_analysis(analysis))
    }

    async fn company_insights(&self, ctx: &InterviewContext) -> Result<String, AppError> {
        let prompt = INSIGHTS_PROMPT_TEMPLATE
            .replace("{company}", &ctx.company)
            .replace("{industry}", or_unspecified(&ctx.industry))
            .replace("{job_title}", &ctx.job_title);
        self.0
            .call_text(&prompt, &text_system(INSIGHTS_SYSTEM))
            .await
            .map_err(|e| AppError::Llm(format!("company insights failed: {e}")))
    }

    async fn body_language_tips(&self, ctx: &InterviewContext) -> Result<String, AppError> {
        let prompt = BODY_LANGUAGE_PROMPT_TEMPLATE
            .replace("{job_title}", &ctx.job_title)
            .replace("{company}", &ctx.company);
        self.0
            .call_text(&prompt, &text_system(BODY_LANGUAGE_SYSTEM))
            .await
            .map_err(|e| AppError::Llm(format!("body language tips failed: {e}")))
    }

    async fn answer_platform_question(&self, question: &str) -> Result<String, AppError> {
        let prompt = PLATFORM_PROMPT_TEMPLATE.replace("{question}", question);
        self.0
            .call_text(&prompt, &text_system(PLATFORM_SYSTEM))
            .await
            .map_err(|e| AppError::Llm(format!("platform question failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt builders
// ────────────────────────────────────────────────────────────────────────────

fn json_system(base: &str) -> String {
    format!("{base} {STUDENT_AUDIENCE} {JSON_ONLY_INSTRUCTION}")
}

fn text_system(base: &str) -> String {
    format!("{base} {STUDENT_AUDIENCE}")
}

fn or_unspecified(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("not specified")
}

pub(crate) fn build_questions_prompt(ctx: &InterviewContext) -> String {
    QUESTIONS_PROMPT_TEMPLATE
        .replace("{job_title}", &ctx.job_title)
        .replace("{company}", &ctx.company)
        .replace("{industry}", or_unspecified(&ctx.industry))
        .replace("{experience}", or_unspecified(&ctx.experience))
        .replace("{job_description}", or_unspecified(&ctx.job_description))
        .replace("{question_type}", ctx.question_type.as_str())
}

pub(crate) fn build_analysis_prompt(
    ctx: &InterviewContext,
    question: &str,
    response: &str,
) -> String {
    // Candidate text last, so braces in it are never treated as placeholders.
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_title}", &ctx.job_title)
        .replace("{company}", &ctx.company)
        .replace("{question}", question)
        .replace("{response}", response)
}

/// Accepts any finite number or numeric string, rounded and clamped into 1..=10.
fn lenient_confidence<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let score = raw
        .filter(|v| v.is_finite())
        .ok_or_else(|| de::Error::custom("confidence must be a number"))?;
    Ok(score.round().clamp(1.0, 10.0) as u8)
}

/// Clamps model-reported confidence into 1..=10.
pub(crate) fn normalize_analysis(mut analysis: ResponseAnalysis) -> ResponseAnalysis {
    analysis.confidence = analysis.confidence.clamp(1, 10);
    analysis
}
