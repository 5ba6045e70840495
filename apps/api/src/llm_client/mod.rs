/// LLM Client: the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the LLM provider directly.
/// All LLM interactions MUST go through this module.
///
/// Provider errors are classified and surfaced on the first failure; this
/// client never retries. Callers decide whether an unusable *response*
/// (see `LlmError::is_retryable`) is worth a second call.
use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::LlmConfig;

pub mod prompts;

const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("The AI provider quota has been exceeded. Check the account's plan and billing details.")]
    QuotaExceeded,

    #[error("The AI provider rejected the API key. Check the configured key.")]
    InvalidApiKey,

    #[error("The AI provider is rate limiting requests. Try again in a moment.")]
    RateLimited,

    #[error("The AI provider had a server error (status {status}). Try again later.")]
    ServerError { status: u16 },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM JSON did not match the expected shape: {0}")]
    Schema(String),
}

impl LlmError {
    /// True for errors caused by an unusable model response rather than by
    /// the provider. A fresh call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::Parse(_) | LlmError::Schema(_))
    }
}

/// Structural checks applied to every JSON payload parsed from the model.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), String> {
        self.iter()
            .enumerate()
            .try_for_each(|(i, item)| item.validate().map_err(|e| format!("[{i}]: {e}")))
    }
}

/// Sampling parameters for a single call.
#[derive(Debug, Clone, Copy)]
pub struct CallOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl LlmResponse {
    /// Extracts the non-blank text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
}

/// The single LLM client used by all services.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build LLM HTTP client")?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw chat-completion call, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        options: CallOptions,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("LLM request failed to send: {e}");
                LlmError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_error(status.as_u16(), &body);
            error!("LLM API returned {status}: {err}");
            return Err(err);
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(llm_response)
    }

    /// Calls the LLM and deserializes + validates the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T>(
        &self,
        prompt: &str,
        system: &str,
        options: CallOptions,
    ) -> Result<T, LlmError>
    where
        T: DeserializeOwned + Validate,
    {
        let response = self.call(prompt, system, options).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        parse_structured(text)
    }

    /// `call_json`, repeated up to `retries` more times when the model's
    /// output was unusable (`LlmError::is_retryable`). Provider errors are
    /// returned immediately.
    pub async fn call_json_retrying<T>(
        &self,
        prompt: &str,
        system: &str,
        options: CallOptions,
        retries: u32,
    ) -> Result<T, LlmError>
    where
        T: DeserializeOwned + Validate,
    {
        retry_unusable_output(retries, || self.call_json(prompt, system, options)).await
    }
}

/// Runs `call`, repeating it up to `retries` more times while the error is
/// `LlmError::is_retryable`.
pub async fn retry_unusable_output<T, F, Fut>(retries: u32, mut call: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Err(e) if e.is_retryable() && attempt < retries => {
                attempt += 1;
                warn!("LLM output unusable ({e}), retrying ({attempt}/{retries})");
            }
            result => return result,
        }
    }
}

/// Strips fences, parses and validates a model reply.
pub fn parse_structured<T>(text: &str) -> Result<T, LlmError>
where
    T: DeserializeOwned + Validate,
{
    let cleaned = strip_json_fences(text);
    if cleaned.is_empty() {
        return Err(LlmError::EmptyContent);
    }

    let value: T = serde_json::from_str(cleaned).map_err(|e| {
        warn!("Failed to parse LLM JSON: {e}\nraw: {text}\ncleaned: {cleaned}");
        LlmError::Parse(e)
    })?;

    value.validate().map_err(|reason| {
        warn!("LLM JSON failed validation: {reason}");
        LlmError::Schema(reason)
    })?;

    Ok(value)
}

/// Maps a non-success provider response to a specific error kind.
fn classify_error(status: u16, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<ProviderError>(body).ok();
    let is_quota = parsed.as_ref().is_some_and(|e| {
        e.error.code.as_deref() == Some("insufficient_quota")
            || e.error.error_type.as_deref() == Some("insufficient_quota")
    });

    match status {
        429 if is_quota => LlmError::QuotaExceeded,
        429 => LlmError::RateLimited,
        401 => LlmError::InvalidApiKey,
        s if s >= 500 => LlmError::ServerError { status: s },
        s => LlmError::Api {
            status: s,
            message: parsed.map(|e| e.error.message).unwrap_or_else(|| body.to_string()),
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
