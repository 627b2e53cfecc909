//! Domain model and metric computations for Trendly.
//!
//! Everything in this crate is synchronous and free of I/O except for the
//! configuration loader, the watchlist loader, and dashboard snapshots.

pub mod accounts;
pub mod aggregate;
pub mod analytics;
pub mod app_config;
pub mod compare;
pub mod config;
pub mod gaps;
pub mod insights;
pub mod posts;
pub mod state;
pub mod thresholds;
pub mod watchlist;

use thiserror::Error;

pub use accounts::{AccountMetrics, Competitor, Metric, UserProfile};
pub use aggregate::{aggregate, enrich, round2, PostAggregate};
pub use analytics::{
    best_posting_times, content_type_metrics, dashboard_stats, hashtag_metrics, timing_metrics,
    top_posts, ContentTypeMetrics, DashboardStats, HashtagMetrics, TimingMetrics,
};
pub use app_config::{AppConfig, Environment};
pub use compare::{classify_status, compare, ComparisonMetric, ComparisonStatus};
pub use config::{load_app_config, load_app_config_from_env};
pub use gaps::{analyze_gaps, GapAnalysis, GapPriority, GapValue};
pub use insights::{
    ActionableSuggestion, CaptionAnalysis, CaptionReview, ContentIdea, IdeaFormat, Impact,
    InsightType, PerformanceRating, PostPerformance, StrategyDay, SuggestionCategory,
    SuggestionPriority, TrendInsight, WeeklyStrategy,
};
pub use posts::{extract_hashtags, Post, PostType};
pub use state::{DashboardState, StateError};
pub use watchlist::{load_watchlist, WatchlistEntry, WatchlistFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read watchlist file {path}: {source}")]
    WatchlistIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse watchlist file: {0}")]
    WatchlistParse(#[from] serde_yaml::Error),

    #[error("watchlist validation failed: {0}")]
    Validation(String),
}
