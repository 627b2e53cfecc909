//! Tunable thresholds for the comparison engine and gap analyzer.

/// Percentage band around the competitor average treated as "on par".
pub const STATUS_DEAD_BAND_PCT: f64 = 10.0;

/// Engagement gap fires below this fraction of the best competitor.
pub const ENGAGEMENT_GAP_RATIO: f64 = 0.8;
/// Engagement gap is high priority below this fraction.
pub const ENGAGEMENT_HIGH_PRIORITY_RATIO: f64 = 0.5;

/// Posting-frequency gap fires below this fraction of the best competitor.
pub const POSTING_GAP_RATIO: f64 = 0.7;
/// Posting-frequency gap is high priority below this fraction.
pub const POSTING_HIGH_PRIORITY_RATIO: f64 = 0.5;

/// Growth gap fires below this fraction of the best competitor.
pub const GROWTH_GAP_RATIO: f64 = 0.7;

/// Comment gap fires below this fraction of the best competitor.
pub const COMMENTS_GAP_RATIO: f64 = 0.6;
