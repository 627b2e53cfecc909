//! Chat-completion client for OpenAI-compatible endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use trendly_core::AppConfig;

use crate::error::AiError;

const TEMPERATURE: f32 = 0.7;
const DEFAULT_UPSTREAM_MESSAGE: &str = "OpenAI API error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single-shot text completion backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete the conversation, returning the reply text.
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String, AiError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct UpstreamError {
    error: Option<UpstreamErrorBody>,
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

/// Client for `POST {base}/v1/chat/completions`.
///
/// Constructed without an API key it never touches the network and every
/// call fails with [`AiError::MissingApiKey`].
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: Url,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`AiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`AiError::InvalidBaseUrl`] if `base_url` is not a
    /// valid URL.
    pub fn new(
        api_key: Option<&str>,
        model: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("v1/chat/completions"))
            .map_err(|e| AiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            model: model.to_owned(),
            endpoint,
        })
    }

    /// # Errors
    ///
    /// See [`OpenAiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, AiError> {
        Self::new(
            config.openai_api_key.as_deref(),
            &config.openai_model,
            &config.openai_base_url,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String, AiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AiError::MissingApiKey);
        };

        let request = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UpstreamError>(&body)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| DEFAULT_UPSTREAM_MESSAGE.to_string());
            tracing::warn!(status = status.as_u16(), %message, "completion request rejected");
            return Err(AiError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: CompletionResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AiError::EmptyReply)?;

        tracing::debug!(model = %self.model, max_tokens, chars = content.len(), "completion received");
        Ok(content)
    }
}
