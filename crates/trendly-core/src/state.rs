//! Dashboard state: the user's profile, competitors and their posts.
//!
//! The state is an explicit value owned by the caller and persisted as a
//! JSON snapshot between runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accounts::{Competitor, UserProfile};
use crate::aggregate::enrich;
use crate::analytics;
use crate::posts::Post;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse state file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("competitor @{0} is already on the dashboard")]
    DuplicateCompetitor(String),

    #[error("no competitor with id {0}")]
    UnknownCompetitor(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardState {
    pub user_profile: Option<UserProfile>,
    pub user_posts: Vec<Post>,
    pub is_onboarded: bool,
    pub competitors: Vec<Competitor>,
    /// Posts of every competitor, keyed by `competitor_id`.
    pub posts: Vec<Post>,
}

impl DashboardState {
    /// Load a snapshot. A missing file yields the empty state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] when the file exists but cannot be read and
    /// [`StateError::Parse`] when it is not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no state snapshot; starting empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StateError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| StateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a pretty-printed snapshot, replacing `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] when the directory, temp file or rename
    /// fails.
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let io_err = |source| StateError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body = serde_json::to_string_pretty(self).map_err(|source| StateError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, body).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)?;

        tracing::debug!(
            path = %path.display(),
            competitors = self.competitors.len(),
            posts = self.posts.len(),
            "state snapshot saved"
        );
        Ok(())
    }

    /// Connect the user's own account. Marks the dashboard onboarded.
    pub fn set_user_profile(&mut self, profile: UserProfile) {
        self.user_profile = Some(profile);
        self.is_onboarded = true;
    }

    pub fn set_user_posts(&mut self, posts: Vec<Post>) {
        self.user_posts = posts;
    }

    /// Disconnect the user's account.
    pub fn clear_user_profile(&mut self) {
        self.user_profile = None;
        self.user_posts.clear();
        self.is_onboarded = false;
    }

    /// Add a competitor, assigning an id when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DuplicateCompetitor`] when a competitor with the
    /// same username (case-insensitive) is already present.
    pub fn add_competitor(&mut self, mut competitor: Competitor) -> Result<&Competitor, StateError> {
        if self
            .competitors
            .iter()
            .any(|c| c.username.eq_ignore_ascii_case(&competitor.username))
        {
            return Err(StateError::DuplicateCompetitor(competitor.username));
        }
        if competitor.id.is_empty() {
            competitor.id = uuid::Uuid::new_v4().to_string();
        }
        tracing::info!(username = %competitor.username, id = %competitor.id, "competitor added");
        self.competitors.push(competitor);
        let idx = self.competitors.len() - 1;
        Ok(&self.competitors[idx])
    }

    /// Remove a competitor and every post it owns.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownCompetitor`] when `id` is not present.
    pub fn remove_competitor(&mut self, id: &str) -> Result<Competitor, StateError> {
        let idx = self.position(id)?;
        let removed = self.competitors.remove(idx);
        self.posts.retain(|p| p.competitor_id != id);
        tracing::info!(username = %removed.username, id, "competitor removed");
        Ok(removed)
    }

    /// Flip `is_tracked`, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownCompetitor`] when `id` is not present.
    pub fn toggle_tracked(&mut self, id: &str) -> Result<bool, StateError> {
        let idx = self.position(id)?;
        let competitor = &mut self.competitors[idx];
        competitor.is_tracked = !competitor.is_tracked;
        Ok(competitor.is_tracked)
    }

    /// Replace a competitor's posts and refresh its derived metrics.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownCompetitor`] when `competitor_id` is not
    /// present.
    pub fn replace_posts(
        &mut self,
        competitor_id: &str,
        mut posts: Vec<Post>,
    ) -> Result<&Competitor, StateError> {
        let idx = self.position(competitor_id)?;
        let enriched = enrich(self.competitors[idx].clone(), &mut posts);
        self.competitors[idx] = enriched;
        self.posts.retain(|p| p.competitor_id != competitor_id);
        self.posts.extend(posts);
        Ok(&self.competitors[idx])
    }

    /// Overwrite a competitor's profile from a fresh lookup, keeping its id,
    /// tracking flag and `added_at`, then replace its posts.
    ///
    /// With no posts only the identity and audience fields are refreshed; the
    /// stored post-derived metrics, growth rate and posts are kept.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownCompetitor`] when `id` is not present.
    pub fn refresh_competitor(
        &mut self,
        id: &str,
        fresh: Competitor,
        posts: Vec<Post>,
    ) -> Result<&Competitor, StateError> {
        let idx = self.position(id)?;
        let current = &self.competitors[idx];
        let mut refreshed = Competitor {
            id: current.id.clone(),
            is_tracked: current.is_tracked,
            added_at: current.added_at,
            ..fresh
        };

        if posts.is_empty() {
            refreshed.engagement_rate = current.engagement_rate;
            refreshed.average_likes = current.average_likes;
            refreshed.average_comments = current.average_comments;
            refreshed.posting_frequency = current.posting_frequency;
            refreshed.growth_rate = current.growth_rate;
            tracing::debug!(id, "refresh without posts; keeping stored metrics");
            self.competitors[idx] = refreshed;
            return Ok(&self.competitors[idx]);
        }

        self.competitors[idx] = refreshed;
        self.replace_posts(id, posts)
    }

    #[must_use]
    pub fn tracked_competitors(&self) -> Vec<Competitor> {
        self.competitors
            .iter()
            .filter(|c| c.is_tracked)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn posts_by_competitor(&self, competitor_id: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.competitor_id == competitor_id)
            .collect()
    }

    /// Highest-engagement competitor posts across the dashboard.
    #[must_use]
    pub fn top_posts(&self, limit: usize) -> Vec<Post> {
        analytics::top_posts(&self.posts, limit)
    }

    /// Look up a competitor by username, ignoring case and a leading `@`.
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<&Competitor> {
        let username = username.trim_start_matches('@');
        self.competitors
            .iter()
            .find(|c| c.username.eq_ignore_ascii_case(username))
    }

    fn position(&self, id: &str) -> Result<usize, StateError> {
        self.competitors
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StateError::UnknownCompetitor(id.to_string()))
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
