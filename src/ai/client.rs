//! Chat-completion API client.
//!
//! One synchronous-in-spirit request per invocation: no retries, no backoff.
//! Transport and API errors are reported with their diagnostics and resolved
//! at the caller as "no result".

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::error::CompletionError;
use crate::ai::prompt::PromptDocument;

/// Model used when neither `--model` nor `OPENAI_MODEL` is given.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default API endpoint base.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Output budget: commit messages are short.
const MAX_COMPLETION_TOKENS: i32 = 150;

/// Near-deterministic sampling for consistent output.
const TEMPERATURE: f32 = 0.1;

/// Chat-completion request message.
#[derive(Serialize, Debug)]
struct Message {
    role: String,
    content: String,
}

/// Chat-completion request body.
#[derive(Serialize, Debug)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: i32,
    temperature: f32,
    stream: bool,
}

/// Chat-completion response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

/// Chat-completion response message.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: String,
}

/// Chat-completion response body.
#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

/// Client for a hosted chat-completion API.
#[derive(Debug)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CompletionClient {
    /// Creates a client with explicit credentials and endpoint.
    pub fn new(model: impl Into<String>, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client from the process environment (with settings-file
    /// fallback). Fails before any network activity when no credential is
    /// present.
    pub fn from_env(model_override: Option<&str>) -> Result<Self, CompletionError> {
        let settings = crate::utils::settings::Settings::load();
        let api_key = settings.api_key().ok_or(CompletionError::ApiKeyNotFound)?;

        Ok(Self::new(settings.model(model_override), api_key, DEFAULT_BASE_URL))
    }

    /// Returns the model this client will request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds the full API URL.
    fn api_url(&self) -> String {
        let mut base = self.base_url.clone();

        // Ensure base URL doesn't end with a slash
        if base.ends_with('/') {
            base.pop();
        }

        format!("{base}/v1/chat/completions")
    }

    /// Sends the assembled prompt and returns the trimmed text of the first
    /// response choice. Exactly one request; no retries.
    pub async fn complete(&self, prompt: &PromptDocument) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
        };

        let url = self.api_url();
        info!(url = %url, model = %self.model, "sending completion request");
        debug!(
            system_len = prompt.system.len(),
            user_len = prompt.user.len(),
            "request payload sizes"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::RequestFailed { status, body });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let text = completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| CompletionError::InvalidResponse("no choices in response".to_string()))?;

        debug!(response_len = text.len(), "received completion");

        Ok(text)
    }
}
