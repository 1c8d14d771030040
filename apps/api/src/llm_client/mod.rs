//! LLM client: the only path from the service to the hosted language model.
//!
//! Interview prep reaches the model exclusively through `LlmClient`; the chat assistant
//! never does. Model is fixed so that prompt behaviour does not drift between deploys.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.7;
const MAX_RETRIES: u32 = 3;

/// Failure modes of a model call. Coach code flattens these into `AppError::Llm`.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to model API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API responded {status}: {message}")]
    Api { status: u16, message: String },

    #[error("model output is not the expected JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model API still failing after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("model returned no text")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Shared handle to the hosted model. Cheap to clone.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { client, api_key })
    }

    /// One user-turn Messages request. Transient failures are retried up to
    /// `MAX_RETRIES` times; the last failure is returned.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if let Some(delay) = backoff_delay(attempt) {
                warn!(attempt, delay_ms = delay.as_millis() as u64, "retrying LLM call");
                tokio::time::sleep(delay).await;
            }

            let response = match self.send(&request_body).await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status().as_u16();
            if response.status().is_success() {
                let llm_response: LlmResponse = response.json().await?;
                debug!(
                    input_tokens = llm_response.usage.input_tokens,
                    output_tokens = llm_response.usage.output_tokens,
                    "LLM call succeeded"
                );
                return Ok(llm_response);
            }

            let body = response.text().await.unwrap_or_default();
            if is_retryable(status) {
                warn!(status, "LLM API returned a transient error");
                last_error = Some(LlmError::Api {
                    status,
                    message: body,
                });
                continue;
            }
            return Err(LlmError::Api {
                status,
                message: api_error_message(body),
            });
        }

        Err(last_error.unwrap_or(LlmError::RetriesExhausted {
            attempts: MAX_RETRIES,
        }))
    }

    async fn send(&self, body: &AnthropicRequest<'_>) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
    }

    /// Calls the LLM and returns the trimmed text of the first text block.
    pub async fn call_text(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }

    /// Like `call_text`, but parses the reply as `T`. The system prompt has to ask for JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;

        let text = strip_json_fences(text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// `None` for the first attempt, then 1s, 2s, 4s.
fn backoff_delay(attempt: u32) -> Option<Duration> {
    attempt
        .checked_sub(1)
        .map(|n| Duration::from_millis(1000 << n))
}

/// Rate limits and upstream failures are worth another attempt; other 4xx are not.
fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

fn api_error_message(body: String) -> String {
    match serde_json::from_str::<AnthropicError>(&body) {
        Ok(e) => e.error.message,
        Err(_) => body,
    }
}

/// Removes a surrounding markdown code fence, with or without a `json` tag.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let inner = inner.trim_start();
    inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_after_first_attempt() {
        assert_eq!(backoff_delay(0), None);
        assert_eq!(backoff_delay(1), Some(Duration::from_secs(1)));
        assert_eq!(backoff_delay(2), Some(Duration::from_secs(2)));
        assert_eq!(backoff_delay(3), Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_only_rate_limit_and_server_errors_retry() {
        assert!(is_retryable(429));
        assert!(is_retryable(500));
        assert!(is_retryable(529));
        assert!(!is_retryable(400));
        assert!(!is_retryable(401));
    }

    #[test]
    fn test_api_error_message_prefers_structured_body() {
        let body = r#"{"error":{"message":"invalid x-api-key"}}"#.to_string();
        assert_eq!(api_error_message(body), "invalid x-api-key");
        assert_eq!(api_error_message("Bad Gateway".into()), "Bad Gateway");
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let json = r#"{
            "content": [
                {"type": "tool_use", "text": null},
                {"type": "text", "text": "Tell me about yourself."}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 7}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("Tell me about yourself."));
    }

    #[test]
    fn test_request_body_shape() {
        let body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: "sys",
            messages: vec![AnthropicMessage {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], MODEL);
        assert_eq!(json["system"], "sys");
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
