//! Best-effort decoding of JSON embedded in a model reply.

use serde::de::DeserializeOwned;
use thiserror::Error;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// The reply could not be decoded, directly or after fence stripping.
#[derive(Debug, Error)]
#[error("reply is not valid JSON: {source}")]
pub struct ExtractError {
    #[source]
    pub source: serde_json::Error,
}

/// Decode `reply` as `T`.
///
/// First parses the trimmed reply as-is. If that fails, takes the body of the
/// first ```` ```json ```` fence (or bare ```` ``` ```` fence when there is
/// no tagged one), up to the closing fence, and parses that instead.
///
/// # Errors
///
/// Returns [`ExtractError`] carrying the last parse error when neither
/// attempt yields a `T`.
pub fn extract_json<T: DeserializeOwned>(reply: &str) -> Result<T, ExtractError> {
    let direct = match serde_json::from_str(reply.trim()) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let Some(fenced) = fenced_body(reply) else {
        return Err(ExtractError { source: direct });
    };

    serde_json::from_str(fenced.trim()).map_err(|source| ExtractError { source })
}

fn fenced_body(reply: &str) -> Option<&str> {
    let start = if let Some(idx) = reply.find(JSON_FENCE) {
        idx + JSON_FENCE.len()
    } else {
        reply.find(FENCE)? + FENCE.len()
    };
    let rest = &reply[start..];
    Some(rest.find(FENCE).map_or(rest, |end| &rest[..end]))
}
