use thiserror::Error;

use crate::extract::ExtractError;

/// Errors returned by the text-generation layer.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("OpenAI API key not configured")]
    MissingApiKey,

    /// Network, TLS or body-decoding failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion endpoint returned a non-2xx status.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("completion reply had no content")]
    EmptyReply,

    /// The reply was not the JSON document the prompt asked for.
    #[error(transparent)]
    Parse(#[from] ExtractError),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
