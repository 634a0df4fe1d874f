//! Completion-API specific error handling.

use thiserror::Error;

/// Errors from the chat-completion client.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// API key not found in environment variables or settings.
    #[error("OpenAI API key not found. Set OPENAI_API_KEY or OPENAI_AUTH_TOKEN environment variable")]
    ApiKeyNotFound,

    /// The API returned a non-success HTTP status.
    #[error("completion request failed: HTTP {status}: {body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the API.
        body: String,
    },

    /// The response body could not be interpreted.
    #[error("invalid response from completion API: {0}")]
    InvalidResponse(String),

    /// Network connectivity error.
    #[error("network error: {0}")]
    Network(String),
}
