/// LLM Client — the single point of entry for all language-model calls in Tailor.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Analyzers and the synthesizer receive an `Option<Arc<dyn LanguageModel>>` at
/// construction; `None` means the deterministic rule-based paths are used throughout.
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in Tailor.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM reply contained no JSON object")]
    NoJsonObject,

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),
}

/// Opaque text-in/text-out language model service.
///
/// Implementations may fail for any transport or quota reason; callers treat every
/// failure the same way and fall back to their rule-based path.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short identifier reported by the health endpoint.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// Shared handle type threaded through analyzers and the synthesizer.
pub type SharedModel = Arc<dyn LanguageModel>;

/// Runs `generate` under a hard deadline so a stalled upstream can never hold a request.
pub async fn generate_within(
    model: &dyn LanguageModel,
    prompt: &str,
    system: &str,
    limit: Duration,
) -> Result<String, LlmError> {
    match tokio::time::timeout(limit, model.generate(prompt, system)).await {
        Ok(result) => result,
        Err(_) => Err(LlmError::Timeout(limit)),
    }
}

/// Parses the first `{` .. last `}` span of a model reply as JSON.
///
/// Models frequently wrap JSON in prose or code fences; slicing on braces tolerates both.
pub fn parse_json_reply<T: DeserializeOwned>(reply: &str) -> Result<T, LlmError> {
    let json = extract_json_object(reply).ok_or(LlmError::NoJsonObject)?;
    serde_json::from_str(json).map_err(LlmError::Parse)
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
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

/// Anthropic Messages API client with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, request_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(request_timeout)
                .build()
                .context("Failed to build HTTP client for the LLM")?,
            api_key,
        })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Scripted models for exercising the AI paths without network access.
#[cfg(test)]
pub mod testing {
    use super::*;

    pub enum StubModel {
        /// Replies with the given text.
        Reply(String),
        /// Fails as if the upstream returned a 503.
        Fail,
        /// Never answers within any reasonable deadline.
        Hang,
    }

    impl StubModel {
        pub fn shared(self) -> SharedModel {
            Arc::new(self)
        }
    }

    #[async_trait]
    impl LanguageModel for StubModel {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            match self {
                StubModel::Reply(text) => Ok(text.clone()),
                StubModel::Fail => Err(LlmError::Api {
                    status: 503,
                    message: "upstream unavailable".to_string(),
                }),
                StubModel::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(LlmError::EmptyContent)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubModel;
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        key: String,
    }

    #[test]
    fn test_parse_json_reply_with_fences() {
        let reply = "```json\n{\"key\": \"value\"}\n```";
        let probe: Probe = parse_json_reply(reply).unwrap();
        assert_eq!(probe.key, "value");
    }

    #[test]
    fn test_parse_json_reply_with_surrounding_prose() {
        let reply = "Here is the analysis you asked for:\n{\"key\": \"v\"}\nLet me know!";
        let probe: Probe = parse_json_reply(reply).unwrap();
        assert_eq!(probe.key, "v");
    }

    #[test]
    fn test_parse_json_reply_without_braces() {
        let result: Result<Probe, _> = parse_json_reply("I cannot help with that.");
        assert!(matches!(result, Err(LlmError::NoJsonObject)));
    }

    #[test]
    fn test_parse_json_reply_malformed() {
        let result: Result<Probe, _> = parse_json_reply("{\"key\": }");
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_extract_json_object_reversed_braces() {
        assert_eq!(extract_json_object("} nothing {"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_within_times_out() {
        let model = StubModel::Hang;
        let result = generate_within(&model, "p", "s", Duration::from_secs(5)).await;
        assert!(matches!(result, Err(LlmError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_generate_within_passes_reply_through() {
        let model = StubModel::Reply("ok".to_string());
        let result = generate_within(&model, "p", "s", Duration::from_secs(5)).await;
        assert_eq!(result.unwrap(), "ok");
    }
}
