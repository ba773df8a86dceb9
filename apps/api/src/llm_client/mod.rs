/// LLM Client: the single point of entry for all text-generation calls in Ascendra.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through this module.
///
/// Providers: Gemini (`generateContent`) and the OpenAI-compatible chat
/// completion endpoints of Groq and xAI.
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

mod gemini;
mod openai_compat;
pub mod prompts;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} API key is not configured")]
    NotConfigured(&'static str),

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
}

/// The hosted model families Ascendra talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    Groq,
    Xai,
}

impl Provider {
    pub fn label(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Groq => "groq",
            Provider::Xai => "xai",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash",
            Provider::Groq => "llama-3.3-70b-versatile",
            Provider::Xai => "grok-beta",
        }
    }

    fn base_url(self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::Xai => "https://api.x.ai/v1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Provider-neutral completion request.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub max_tokens: Option<u32>,
    /// Ask the provider for a JSON-only response body.
    pub json_mode: bool,
}

impl CompletionRequest {
    /// A single-turn request with one user message.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(text)],
            ..Default::default()
        }
    }

    pub fn conversation(system: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            system: Some(system.into()),
            messages,
            ..Default::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_sampling(mut self, top_p: f32, top_k: u32) -> Self {
        self.top_p = Some(top_p);
        self.top_k = Some(top_k);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// One client per provider, cheap to clone. Wraps the provider HTTP API with
/// retry logic and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    provider: Provider,
    model: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(provider: Provider, api_key: Option<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            provider,
            model: provider.default_model().to_string(),
            api_key,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a call to the provider and returns the generated text.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::NotConfigured(self.provider.label()))?;

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "{} call attempt {} failed, retrying after {}ms...",
                    self.provider.label(),
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.send(api_key, request).await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("{} API returned {}: {}", self.provider.label(), status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return self.read_text(response).await;
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the LLM and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        request: &CompletionRequest,
    ) -> Result<T, LlmError> {
        let text = self.call(request).await?;
        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }

    async fn send(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<reqwest::Response, reqwest::Error> {
        match self.provider {
            Provider::Gemini => {
                let url = format!(
                    "{}/models/{}:generateContent",
                    self.provider.base_url(),
                    self.model
                );
                self.client
                    .post(url)
                    .header("x-goog-api-key", api_key)
                    .json(&gemini::GenerateContentRequest::from_request(request))
                    .send()
                    .await
            }
            Provider::Groq | Provider::Xai => {
                let url = format!("{}/chat/completions", self.provider.base_url());
                self.client
                    .post(url)
                    .bearer_auth(api_key)
                    .json(&openai_compat::ChatCompletionRequest::from_request(
                        &self.model,
                        request,
                    ))
                    .send()
                    .await
            }
        }
    }

    async fn read_text(&self, response: reqwest::Response) -> Result<String, LlmError> {
        let (text, input_tokens, output_tokens) = match self.provider {
            Provider::Gemini => {
                let body: gemini::GenerateContentResponse = response.json().await?;
                let (input, output) = body.token_counts();
                (body.text(), input, output)
            }
            Provider::Groq | Provider::Xai => {
                let body: openai_compat::ChatCompletionResponse = response.json().await?;
                let (input, output) = body.token_counts();
                (body.text(), input, output)
            }
        };

        debug!(
            "{} call succeeded: model={}, input_tokens={}, output_tokens={}",
            self.provider.label(),
            self.model,
            input_tokens,
            output_tokens
        );

        text.filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
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

/// Returns the span from the first `[` to the last `]`, if both exist in order.
pub fn extract_json_array(text: &str) -> Option<&str> {
    slice_between(text, '[', ']')
}

/// Returns the span from the first `{` to the last `}`, if both exist in order.
pub fn extract_json_object(text: &str) -> Option<&str> {
    slice_between(text, '{', '}')
}

fn slice_between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_array_from_prose() {
        let input = "Sure! Here are your questions:\n[{\"a\": 1}, {\"b\": [2]}]\nGood luck.";
        assert_eq!(
            extract_json_array(input),
            Some("[{\"a\": 1}, {\"b\": [2]}]")
        );
    }

    #[test]
    fn test_extract_json_array_missing_brackets() {
        assert_eq!(extract_json_array("no json here"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }

    #[test]
    fn test_extract_json_object_from_prose() {
        let input = "Result: {\"radarData\": []} -- end";
        assert_eq!(extract_json_object(input), Some("{\"radarData\": []}"));
    }

    #[test]
    fn test_completion_request_builder() {
        let req = CompletionRequest::prompt("hello")
            .with_system("sys")
            .with_temperature(0.7)
            .with_sampling(0.8, 40)
            .with_max_tokens(300)
            .json();
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.system.as_deref(), Some("sys"));
        assert_eq!(req.top_k, Some(40));
        assert_eq!(req.max_tokens, Some(300));
        assert!(req.json_mode);
    }

    #[tokio::test]
    async fn test_call_without_key_is_not_configured() {
        let client = LlmClient::new(Provider::Groq, None).unwrap();
        assert!(!client.is_configured());
        let err = client
            .call(&CompletionRequest::prompt("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured("groq")));
    }

    #[test]
    fn test_default_models() {
        assert_eq!(Provider::Gemini.default_model(), "gemini-2.5-flash");
        assert_eq!(Provider::Groq.default_model(), "llama-3.3-70b-versatile");
        assert_eq!(Provider::Xai.default_model(), "grok-beta");
    }
}
