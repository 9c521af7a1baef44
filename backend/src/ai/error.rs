//! AI assistant error types.

use thiserror::Error;

/// Errors from the assistant and its completion provider.
#[derive(Debug, Error)]
pub enum AiError {
    /// The GEMINI_API_KEY environment variable is not set.
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,

    /// Transport or HTTP-level failure talking to the provider.
    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered without any candidate text.
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// A send was attempted while another one is still in flight.
    #[error("A message is already being processed")]
    Busy,
}
