//! Soft-failing facade over [`InstagramClient`].
//!
//! A missing API key, a transport failure or a non-2xx status is logged and
//! turned into "no data". A 2xx body that cannot be decoded is still an error.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use trendly_core::{enrich, AppConfig, Competitor, Post};

use crate::client::InstagramClient;
use crate::error::InstagramError;
use crate::normalize::{normalize_post, normalize_profile, normalize_search_user};
use crate::types::ProfileSearchResult;

/// A profile with metrics derived from its recent posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProfile {
    pub profile: Competitor,
    pub posts: Vec<Post>,
}

pub struct InstagramProvider {
    client: Option<InstagramClient>,
    posts_limit: usize,
}

impl InstagramProvider {
    #[must_use]
    pub fn new(client: Option<InstagramClient>, posts_limit: usize) -> Self {
        Self {
            client,
            posts_limit,
        }
    }

    /// Builds a provider from configuration. Without `RAPIDAPI_KEY` every
    /// lookup returns no data.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, InstagramError> {
        let client = match &config.rapidapi_key {
            Some(key) => Some(InstagramClient::new(
                key,
                &config.rapidapi_host,
                config.http_timeout_secs,
                &config.user_agent,
            )?),
            None => None,
        };
        Ok(Self::new(client, config.posts_per_profile))
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    #[must_use]
    pub fn posts_limit(&self) -> usize {
        self.posts_limit
    }

    /// Looks up a profile. `Ok(None)` when no data is available.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Deserialize`] if a 2xx response is malformed.
    pub async fn fetch_profile(&self, username: &str) -> Result<Option<Competitor>, InstagramError> {
        let Some(client) = self.client("fetch_profile") else {
            return Ok(None);
        };
        let username = username.trim_start_matches('@');
        soften(
            client
                .get_profile(username)
                .await
                .map(|raw| Some(normalize_profile(raw, Utc::now()))),
            "fetch_profile",
            username,
        )
    }

    /// Fetches up to `limit` recent posts. Empty when no data is available.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Deserialize`] if a 2xx response is malformed.
    pub async fn fetch_posts(&self, username: &str, limit: usize) -> Result<Vec<Post>, InstagramError> {
        let Some(client) = self.client("fetch_posts") else {
            return Ok(Vec::new());
        };
        let username = username.trim_start_matches('@');
        soften(
            client.get_posts(username).await.map(|items| {
                items
                    .into_iter()
                    .take(limit)
                    .map(normalize_post)
                    .collect::<Vec<_>>()
            }),
            "fetch_posts",
            username,
        )
    }

    /// Searches accounts. Empty when no data is available.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Deserialize`] if a 2xx response is malformed.
    pub async fn search_users(
        &self,
        query: &str,
    ) -> Result<Vec<ProfileSearchResult>, InstagramError> {
        let Some(client) = self.client("search_users") else {
            return Ok(Vec::new());
        };
        soften(
            client
                .search_users(query)
                .await
                .map(|items| items.into_iter().map(normalize_search_user).collect::<Vec<_>>()),
            "search_users",
            query,
        )
    }

    /// Profile plus its recent posts, with derived metrics filled in.
    ///
    /// `Ok(None)` when the profile itself is unavailable. A profile whose
    /// posts are unavailable is returned with its estimated metrics.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Deserialize`] if a 2xx response is malformed.
    pub async fn fetch_enriched_profile(
        &self,
        username: &str,
    ) -> Result<Option<EnrichedProfile>, InstagramError> {
        let Some(profile) = self.fetch_profile(username).await? else {
            return Ok(None);
        };
        let mut posts = self.fetch_posts(username, self.posts_limit).await?;
        let profile = enrich(profile, &mut posts);
        tracing::info!(
            username = %profile.username,
            followers = profile.followers,
            posts = posts.len(),
            engagement_rate = profile.engagement_rate,
            "fetched instagram profile"
        );
        Ok(Some(EnrichedProfile { profile, posts }))
    }

    fn client(&self, op: &str) -> Option<&InstagramClient> {
        if self.client.is_none() {
            tracing::warn!(op, "RAPIDAPI_KEY is not set; returning no data");
        }
        self.client.as_ref()
    }
}

/// Turn transport and status failures into the empty value.
fn soften<T: Default>(
    result: Result<T, InstagramError>,
    op: &str,
    subject: &str,
) -> Result<T, InstagramError> {
    match result {
        Ok(value) => Ok(value),
        Err(InstagramError::Http(e)) => {
            tracing::warn!(op, subject, status = ?e.status(), error = %e, "instagram request failed");
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}
