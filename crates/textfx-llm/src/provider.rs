use async_trait::async_trait;
use textfx_core::CompletionResponse;
use thiserror::Error;

/// Errors raised while building a client. Requests themselves never fail
/// with these; they report through `CompletionResponse::Error`.
#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No API key configured. Set API_KEY or add api_key to the config file.")]
    MissingApiKey,

    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
}

pub type Result<T> = std::result::Result<T, LLMError>;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Requests candidate completions for `prompt`.
    async fn predict(&self, prompt: &str, temperature: f32) -> CompletionResponse;
}
