//! LLM client — the single point of entry for all model calls in the API.
//!
//! ARCHITECTURAL RULE: No other module may call OpenRouter directly.
//! All LLM interactions MUST go through this module.
//!
//! Model: google/gemini-2.0-flash-001 (hardcoded — do not make configurable
//! to prevent drift between the prompts and the model they were tuned for)

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// The model used for all LLM calls.
pub const MODEL: &str = "google/gemini-2.0-flash-001";
/// One timeout per call, zero automatic retries. Parse failures are never
/// retryable; transport failures surface to the caller immediately.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("AI returned empty content")]
    EmptyContent,

    #[error("could not parse AI response as JSON")]
    Unparseable,

    #[error("AI response did not match the expected shape: {0}")]
    Schema(serde_json::Error),
}

/// A single role-tagged chat message. Roles are "system" or "user".
#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn system(content: &'a str) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage<'a>],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// The single LLM client used by all orchestrator tasks. Explicitly
/// constructed at startup and passed by reference; holds the endpoint
/// credential and the two OpenRouter attribution headers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    referer: String,
    app_title: String,
}

impl LlmClient {
    pub fn new(api_key: String, referer: String, app_title: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            referer,
            app_title,
        }
    }

    /// Makes exactly one call to the chat-completions endpoint and returns
    /// the raw text content of the first choice. Never retried.
    pub async fn call(
        &self,
        messages: &[ChatMessage<'_>],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: MODEL,
            messages,
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(LlmError::Http)?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!("LLM call succeeded ({} chars of content)", content.len());

        Ok(content)
    }

    /// Calls the model and normalizes the reply into the caller's contract
    /// type. The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        messages: &[ChatMessage<'_>],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<T, LlmError> {
        let content = self.call(messages, temperature, max_tokens).await?;
        normalize(&content)
    }
}

/// Extracts the provider's error message from a non-2xx body, falling back
/// to the raw body when it is not the usual `{"error":{"message":...}}`.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Normalizes a raw model reply into a typed value. Ordered, first success
/// wins: direct parse, then fenced-block recovery. Textual failures map to
/// `Unparseable`; a reply that is valid JSON but does not deserialize into
/// `T` maps to the distinct `Schema` error.
pub fn normalize<T: DeserializeOwned>(raw: &str) -> Result<T, LlmError> {
    let value = parse_json_value(raw)?;
    serde_json::from_value(value).map_err(|e| {
        error!("AI response failed schema validation: {e}");
        LlmError::Schema(e)
    })
}

fn parse_json_value(raw: &str) -> Result<serde_json::Value, LlmError> {
    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Ok(value);
    }

    if let Some(inner) = extract_fenced_block(raw) {
        if let Ok(value) = serde_json::from_str(inner.trim()) {
            return Ok(value);
        }
    }

    // Raw content is logged for diagnosis but never surfaced to the caller.
    error!("AI response could not be parsed as JSON. Content: {raw}");
    Err(LlmError::Unparseable)
}

/// Finds the first triple-backtick fenced block (optionally tagged `json`)
/// anywhere in the text and returns its inner content.
fn extract_fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_open = &text[start + 3..];
    let inner = after_open.strip_prefix("json").unwrap_or(after_open);
    let end = inner.find("```")?;
    Some(&inner[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn normalize_direct_json_round_trips_without_loss() {
        let raw = r#"{"overallScore": 82, "keywords": [{"word": "Rust", "found": true}]}"#;
        let value: Value = normalize(raw).unwrap();
        assert_eq!(value["overallScore"], json!(82));
        assert_eq!(value["keywords"][0]["word"], json!("Rust"));
    }

    #[test]
    fn normalize_recovers_fenced_block_with_json_tag() {
        let raw = "Here is the result:\n```json\n{\"atsScore\": 71}\n```\nHope this helps!";
        let value: Value = normalize(raw).unwrap();
        assert_eq!(value["atsScore"], json!(71));
    }

    #[test]
    fn normalize_recovers_fenced_block_without_tag() {
        let raw = "```\n{\"summary\": \"ok\"}\n```";
        let value: Value = normalize(raw).unwrap();
        assert_eq!(value["summary"], json!("ok"));
    }

    #[test]
    fn normalize_rejects_plain_prose() {
        let result: Result<Value, _> = normalize("I'm sorry, I can't produce JSON for that.");
        assert!(matches!(result, Err(LlmError::Unparseable)));
    }

    #[test]
    fn normalize_rejects_unparseable_fenced_block() {
        let result: Result<Value, _> = normalize("```json\nnot json either\n```");
        assert!(matches!(result, Err(LlmError::Unparseable)));
    }

    #[test]
    fn normalize_distinguishes_schema_mismatch_from_unparseable() {
        #[derive(serde::Deserialize)]
        struct Expected {
            #[allow(dead_code)]
            score: i32,
        }
        let result: Result<Expected, _> = normalize(r#"{"score": "not a number"}"#);
        assert!(matches!(result, Err(LlmError::Schema(_))));
    }

    #[test]
    fn extract_fenced_block_ignores_text_outside_fences() {
        let text = "prose before ```json\n{\"a\":1}\n``` prose after";
        assert_eq!(extract_fenced_block(text).unwrap().trim(), "{\"a\":1}");
    }

    #[test]
    fn extract_fenced_block_requires_closing_fence() {
        assert!(extract_fenced_block("```json\n{\"a\":1}").is_none());
    }

    #[test]
    fn api_error_message_extracts_provider_message() {
        let body = r#"{"error":{"message":"rate limited"}}"#;
        assert_eq!(api_error_message(body), "rate limited");

        let err = LlmError::Api {
            status: 429,
            message: api_error_message(body),
        };
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn request_body_matches_wire_contract() {
        let messages = [
            ChatMessage::system("system prompt"),
            ChatMessage::user("user prompt"),
        ];
        let body = ChatCompletionRequest {
            model: MODEL,
            messages: &messages,
            temperature: 0.3,
            max_tokens: 4000,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], json!(MODEL));
        assert_eq!(value["messages"][0]["role"], json!("system"));
        assert_eq!(value["messages"][1]["content"], json!("user prompt"));
        assert_eq!(value["max_tokens"], json!(4000));
    }
}
