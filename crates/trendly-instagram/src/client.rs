//! HTTP client for the RapidAPI Instagram provider.
//!
//! Wraps `reqwest` with the RapidAPI key/host headers and typed response
//! decoding. The client is strict: every failure is an error. Soft-failure
//! policy lives in [`crate::InstagramProvider`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::InstagramError;
use crate::types::{Envelope, RawItems, RawPost, RawProfile, RawSearchUser};

const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";
const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// Client for the RapidAPI Instagram endpoints.
///
/// Use [`InstagramClient::new`] for production or
/// [`InstagramClient::with_base_url`] to point at a mock server in tests.
pub struct InstagramClient {
    client: Client,
    api_key: String,
    host: String,
    base_url: Url,
}

impl InstagramClient {
    /// Creates a client that talks to `https://{host}/`.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InstagramError::InvalidBaseUrl`] if `host`
    /// does not form a valid URL.
    pub fn new(
        api_key: &str,
        host: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, InstagramError> {
        Self::with_base_url(api_key, host, timeout_secs, user_agent, &format!("https://{host}"))
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// `host` is still sent as the `x-rapidapi-host` header.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InstagramError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        host: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, InstagramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends to the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| InstagramError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            host: host.to_owned(),
            base_url,
        })
    }

    /// Fetches profile counters for a username.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Http`] on network failure or non-2xx HTTP status.
    /// - [`InstagramError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_profile(&self, username: &str) -> Result<RawProfile, InstagramError> {
        let url = self.build_url("v1/info", &[("username_or_id_or_url", username)])?;
        let envelope: Envelope<RawProfile> = self
            .request(&url, &format!("info(username={username})"))
            .await?;
        Ok(envelope.data)
    }

    /// Fetches the most recent feed items for a username, newest first.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Http`] on network failure or non-2xx HTTP status.
    /// - [`InstagramError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_posts(&self, username: &str) -> Result<Vec<RawPost>, InstagramError> {
        let url = self.build_url("v1.2/posts", &[("username_or_id_or_url", username)])?;
        let envelope: Envelope<RawItems<RawPost>> = self
            .request(&url, &format!("posts(username={username})"))
            .await?;
        Ok(envelope.data.items)
    }

    /// Searches accounts by keyword.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Http`] on network failure or non-2xx HTTP status.
    /// - [`InstagramError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_users(&self, query: &str) -> Result<Vec<RawSearchUser>, InstagramError> {
        let url = self.build_url("v1/search_users", &[("search_query", query)])?;
        let envelope: Envelope<RawItems<RawSearchUser>> = self
            .request(&url, &format!("search_users(query={query})"))
            .await?;
        Ok(envelope.data.items)
    }

    /// Joins `path` onto the base URL and appends percent-encoded query
    /// parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, InstagramError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| InstagramError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends an authenticated GET, asserts a 2xx status, and decodes the
    /// body as `T`.
    async fn request<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, InstagramError> {
        let response = self
            .client
            .get(url.clone())
            .header(RAPIDAPI_KEY_HEADER, &self.api_key)
            .header(RAPIDAPI_HOST_HEADER, &self.host)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| InstagramError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
