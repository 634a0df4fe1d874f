//! Prompt assembly and the chat-completion API client.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::CompletionClient;
pub use error::CompletionError;
pub use prompt::{PromptDocument, INSUFFICIENT_CONTEXT_SENTINEL};
