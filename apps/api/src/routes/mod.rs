pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::chat::handlers as chat;
use crate::interview::handlers as interview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat API
        .route("/api/v1/chat/respond", post(assistant::handle_respond))
        .route("/api/v1/chat/sessions", post(chat::handle_create_session))
        .route(
            "/api/v1/chat/sessions/:id",
            get(chat::handle_get_session).delete(chat::handle_delete_session),
        )
        .route(
            "/api/v1/chat/sessions/:id/messages",
            post(chat::handle_submit_message),
        )
        // Interview Prep API
        .route(
            "/api/v1/interview/questions",
            post(interview::handle_generate_questions),
        )
        .route(
            "/api/v1/interview/analyze",
            post(interview::handle_analyze_response),
        )
        .route(
            "/api/v1/interview/insights",
            post(interview::handle_company_insights),
        )
        .route(
            "/api/v1/interview/body-language",
            post(interview::handle_body_language_tips),
        )
        .route(
            "/api/v1/interview/ask",
            post(interview::handle_platform_question),
        )
        .route("/api/v1/interview/history", get(interview::handle_history))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::assistant::IntentMatcher;
    use crate::chat::sessions::SessionStore;
    use crate::chat::typing::TypingDelay;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::interview::coach::{
        Difficulty, InterviewCoach, InterviewContext, InterviewQuestion, QuestionCategory,
        ResponseAnalysis, Sentiment,
    };

    /// Canned coach; `fail` makes every call return an LLM error.
    struct StubCoach {
        fail: bool,
    }

    impl StubCoach {
        fn check(&self) -> Result<(), AppError> {
            if self.fail {
                Err(AppError::Llm("stub outage".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl InterviewCoach for StubCoach {
        async fn generate_questions(
            &self,
            ctx: &InterviewContext,
        ) -> Result<Vec<InterviewQuestion>, AppError> {
            self.check()?;
            Ok(vec![InterviewQuestion {
                question: format!("Why do you want to work at {}?", ctx.company),
                category: QuestionCategory::Cultural,
                difficulty: Difficulty::Easy,
            }])
        }

        async fn analyze_response(
            &self,
            _ctx: &InterviewContext,
            _question: &str,
            _response: &str,
        ) -> Result<ResponseAnalysis, AppError> {
            self.check()?;
            Ok(ResponseAnalysis {
                content_feedback: "Clear and relevant.".to_string(),
                confidence: 8,
                sentiment: Sentiment::Positive,
                improvements: vec!["Add a metric".to_string()],
                suggested_structure: "STAR".to_string(),
            })
        }

        async fn company_insights(&self, ctx: &InterviewContext) -> Result<String, AppError> {
            self.check()?;
            Ok(format!("{} values curiosity.", ctx.company))
        }

        async fn body_language_tips(&self, _ctx: &InterviewContext) -> Result<String, AppError> {
            self.check()?;
            Ok("Sit up straight.".to_string())
        }

        async fn answer_platform_question(&self, _question: &str) -> Result<String, AppError> {
            self.check()?;
            Ok("From the model.".to_string())
        }
    }

    fn test_state(coach_fails: bool) -> AppState {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/studentjobs_test".to_string()),
            "ANTHROPIC_API_KEY" => Some("test-key".to_string()),
            _ => None,
        })
        .unwrap();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();

        AppState {
            db,
            matcher: IntentMatcher::default().with_max_input_chars(config.chat_max_input_chars),
            sessions: SessionStore::new(),
            typing: TypingDelay::none(),
            coach: Arc::new(StubCoach { fail: coach_fails }),
        }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(false));
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "studentjobs-api");
    }

    #[tokio::test]
    async fn test_respond_endpoint_matches_rule() {
        let app = build_router(test_state(false));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/chat/respond",
            Some(json!({"text": "How do I apply for this job?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["topic"], "applying");
        assert_eq!(body["fallback"], false);
    }

    #[tokio::test]
    async fn test_respond_endpoint_reports_fallback() {
        let app = build_router(test_state(false));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/chat/respond",
            Some(json!({"text": "asdkjasdlk"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], true);
        assert!(body["topic"].is_null());
    }

    #[tokio::test]
    async fn test_respond_endpoint_rejects_overlong_text() {
        let app = build_router(test_state(false));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/chat/respond",
            Some(json!({"text": "a".repeat(4_001)})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chat_session_lifecycle() {
        let app = build_router(test_state(false));

        let (status, created) = send(&app, "POST", "/api/v1/chat/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["turns"].as_array().unwrap().len(), 1);

        let (status, exchange) = send(
            &app,
            "POST",
            &format!("/api/v1/chat/sessions/{id}/messages"),
            Some(json!({"text": "Is remote work possible?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exchange["user"]["speaker"], "user");
        assert_eq!(exchange["reply"]["speaker"], "assistant");
        assert_eq!(exchange["reply"]["topic"], "remote_work");

        let (status, transcript) =
            send(&app, "GET", &format!("/api/v1/chat/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(transcript["turns"].as_array().unwrap().len(), 3);
        assert_eq!(transcript["pending"], false);

        let (status, _) = send(&app, "DELETE", &format!("/api/v1/chat/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/api/v1/chat/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_blank_chat_message_rejected() {
        let app = build_router(test_state(false));
        let (_, created) = send(&app, "POST", "/api/v1/chat/sessions", None).await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/chat/sessions/{id}/messages"),
            Some(json!({"text": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_message_to_unknown_session() {
        let app = build_router(test_state(false));
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/chat/sessions/{}/messages", uuid::Uuid::new_v4()),
            Some(json!({"text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_questions() {
        let app = build_router(test_state(false));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/interview/questions",
            Some(json!({"job_title": "Marketing Intern", "company": "Globex"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["questions"][0]["category"], "cultural");
        assert!(body["questions"][0]["question"]
            .as_str()
            .unwrap()
            .contains("Globex"));
    }

    #[tokio::test]
    async fn test_generate_questions_requires_title() {
        let app = build_router(test_state(false));
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/interview/questions",
            Some(json!({"job_title": "", "company": "Globex"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_without_user_skips_history() {
        let app = build_router(test_state(false));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/interview/analyze",
            Some(json!({
                "job_title": "Barista",
                "company": "Bean There",
                "question": "How do you handle a rush?",
                "response": "I prioritise orders and keep calm."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["confidence"], 8);
        assert_eq!(body["analysis"]["sentiment"], "positive");
        assert!(body.get("session_id").is_none());
    }

    #[tokio::test]
    async fn test_analyze_requires_response_text() {
        let app = build_router(test_state(false));
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/interview/analyze",
            Some(json!({
                "job_title": "Barista",
                "company": "Bean There",
                "question": "How do you handle a rush?",
                "response": ""
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_llm_failure_surfaces_as_500() {
        let app = build_router(test_state(true));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/interview/insights",
            Some(json!({"job_title": "Analyst", "company": "Initech"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_ask_uses_llm_when_available() {
        let app = build_router(test_state(false));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/interview/ask",
            Some(json!({"question": "How do I reset my password?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "llm");
        assert_eq!(body["response"], "From the model.");
    }

    #[tokio::test]
    async fn test_ask_falls_back_to_assistant_when_llm_fails() {
        let app = build_router(test_state(true));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/interview/ask",
            Some(json!({"question": "How do I reset my password?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "assistant");
        assert!(body["response"]
            .as_str()
            .unwrap()
            .contains("Forgot Password"));
    }

    #[tokio::test]
    async fn test_ask_reports_the_specific_validation_error() {
        let app = build_router(test_state(false));

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/interview/ask",
            Some(json!({"question": "?".repeat(4_001)})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "text exceeds 4000 characters");

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/interview/ask",
            Some(json!({"question": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "text cannot be empty");
    }

    #[tokio::test]
    async fn test_body_language_tips() {
        let app = build_router(test_state(false));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/interview/body-language",
            Some(json!({"job_title": "Tutor", "company": "Learnly"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Sit up straight.");
    }
}
