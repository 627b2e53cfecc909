use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked external Instagram account.
///
/// `engagement_rate`, `average_likes`, `average_comments` and
/// `posting_frequency` are derived from the account's posts; refresh them
/// through [`crate::enrich`] rather than assigning them directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Competitor {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
    pub posts_count: u64,
    /// Percent.
    pub engagement_rate: f64,
    pub average_likes: f64,
    pub average_comments: f64,
    /// Posts per week.
    pub posting_frequency: f64,
    /// Follower growth, percent.
    pub growth_rate: f64,
    pub niche: Vec<String>,
    pub location: String,
    pub is_tracked: bool,
    pub added_at: DateTime<Utc>,
}

/// The creator using the dashboard. Same metrics as [`Competitor`] without
/// tracking state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
    pub posts_count: u64,
    pub engagement_rate: f64,
    pub average_likes: f64,
    pub average_comments: f64,
    pub posting_frequency: f64,
    pub growth_rate: f64,
    pub niche: Vec<String>,
    pub location: String,
    pub connected_at: DateTime<Utc>,
}

impl UserProfile {
    /// Build a user profile from a looked-up account, stamping `connected_at`.
    #[must_use]
    pub fn from_competitor(account: Competitor, connected_at: DateTime<Utc>) -> Self {
        Self {
            id: account.id,
            username: account.username,
            display_name: account.display_name,
            avatar: account.avatar,
            bio: account.bio,
            followers: account.followers,
            following: account.following,
            posts_count: account.posts_count,
            engagement_rate: account.engagement_rate,
            average_likes: account.average_likes,
            average_comments: account.average_comments,
            posting_frequency: account.posting_frequency,
            growth_rate: account.growth_rate,
            niche: account.niche,
            location: account.location,
            connected_at,
        }
    }
}

/// The six account-level metrics compared between the user and competitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Followers,
    EngagementRate,
    AverageLikes,
    AverageComments,
    PostingFrequency,
    GrowthRate,
}

impl Metric {
    /// Display order used by the comparison table.
    pub const ALL: [Metric; 6] = [
        Metric::Followers,
        Metric::EngagementRate,
        Metric::AverageLikes,
        Metric::AverageComments,
        Metric::PostingFrequency,
        Metric::GrowthRate,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::Followers => "Followers",
            Metric::EngagementRate => "Engagement Rate",
            Metric::AverageLikes => "Avg Likes",
            Metric::AverageComments => "Avg Comments",
            Metric::PostingFrequency => "Posts/Week",
            Metric::GrowthRate => "Growth Rate",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Read access to the comparable metrics of an account.
pub trait AccountMetrics {
    fn metric(&self, metric: Metric) -> f64;
}

impl AccountMetrics for Competitor {
    #[allow(clippy::cast_precision_loss)]
    fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Followers => self.followers as f64,
            Metric::EngagementRate => self.engagement_rate,
            Metric::AverageLikes => self.average_likes,
            Metric::AverageComments => self.average_comments,
            Metric::PostingFrequency => self.posting_frequency,
            Metric::GrowthRate => self.growth_rate,
        }
    }
}

impl AccountMetrics for UserProfile {
    #[allow(clippy::cast_precision_loss)]
    fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Followers => self.followers as f64,
            Metric::EngagementRate => self.engagement_rate,
            Metric::AverageLikes => self.average_likes,
            Metric::AverageComments => self.average_comments,
            Metric::PostingFrequency => self.posting_frequency,
            Metric::GrowthRate => self.growth_rate,
        }
    }
}
