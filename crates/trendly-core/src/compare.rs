//! Comparison of the user's profile against tracked competitors.

use serde::{Deserialize, Serialize};

use crate::accounts::{AccountMetrics, Competitor, Metric, UserProfile};
use crate::thresholds::STATUS_DEAD_BAND_PCT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonStatus {
    Ahead,
    Behind,
    OnPar,
}

impl std::fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonStatus::Ahead => write!(f, "ahead"),
            ComparisonStatus::Behind => write!(f, "behind"),
            ComparisonStatus::OnPar => write!(f, "on-par"),
        }
    }
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetric {
    pub metric: String,
    pub user: f64,
    pub competitor_avg: f64,
    pub top_competitor: f64,
    /// Percent difference from the competitor average.
    pub difference: f64,
    pub status: ComparisonStatus,
}

/// Classify a percent difference against the dead band.
///
/// Strictly above `+10` is ahead, strictly below `-10` is behind.
#[must_use]
pub fn classify_status(difference: f64) -> ComparisonStatus {
    if difference > STATUS_DEAD_BAND_PCT {
        ComparisonStatus::Ahead
    } else if difference < -STATUS_DEAD_BAND_PCT {
        ComparisonStatus::Behind
    } else {
        ComparisonStatus::OnPar
    }
}

/// Compare `user` against `tracked`, one row per [`Metric::ALL`] entry.
///
/// `tracked` should already be filtered to tracked competitors. With an empty
/// list every row has zero average, zero top value, zero difference and
/// status on-par.
#[must_use]
pub fn compare(user: &UserProfile, tracked: &[Competitor]) -> Vec<ComparisonMetric> {
    Metric::ALL
        .iter()
        .map(|&metric| compare_metric(metric, user, tracked))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn compare_metric(metric: Metric, user: &UserProfile, tracked: &[Competitor]) -> ComparisonMetric {
    let user_value = user.metric(metric);

    let (competitor_avg, top_competitor) = if tracked.is_empty() {
        (0.0, 0.0)
    } else {
        let values = tracked.iter().map(|c| c.metric(metric));
        let sum: f64 = values.clone().sum();
        let top = values.fold(f64::NEG_INFINITY, f64::max);
        (sum / tracked.len() as f64, top)
    };

    let difference = if competitor_avg == 0.0 {
        0.0
    } else {
        (user_value - competitor_avg) / competitor_avg * 100.0
    };

    ComparisonMetric {
        metric: metric.label().to_string(),
        user: user_value,
        competitor_avg,
        top_competitor,
        difference,
        status: classify_status(difference),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            username: "me".to_string(),
            followers: 12_000,
            engagement_rate: 4.0,
            average_likes: 400.0,
            average_comments: 20.0,
            posting_frequency: 3.0,
            growth_rate: 1.0,
            ..UserProfile::default()
        }
    }

    fn rival(followers: u64, engagement_rate: f64, posting_frequency: f64) -> Competitor {
        Competitor {
            followers,
            engagement_rate,
            average_likes: 500.0,
            average_comments: 20.0,
            posting_frequency,
            growth_rate: 2.0,
            is_tracked: true,
            ..Competitor::default()
        }
    }

    #[test]
    fn empty_competitors_yield_six_neutral_rows() {
        let rows = compare(&user(), &[]);
        assert_eq!(rows.len(), 6);
        for row in &rows {
            assert!(row.competitor_avg.abs() < f64::EPSILON);
            assert!(row.top_competitor.abs() < f64::EPSILON);
            assert!(row.difference.abs() < f64::EPSILON);
            assert_eq!(row.status, ComparisonStatus::OnPar);
        }
        let names: Vec<&str> = rows.iter().map(|r| r.metric.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Followers",
                "Engagement Rate",
                "Avg Likes",
                "Avg Comments",
                "Posts/Week",
                "Growth Rate"
            ]
        );
    }

    #[test]
    fn averages_maxima_and_statuses() {
        let rivals = vec![rival(8_000, 2.0, 5.0), rival(12_000, 6.0, 7.0)];
        let rows = compare(&user(), &rivals);

        let followers = &rows[0];
        assert!((followers.competitor_avg - 10_000.0).abs() < 1e-9);
        assert!((followers.top_competitor - 12_000.0).abs() < 1e-9);
        assert!((followers.difference - 20.0).abs() < 1e-9);
        assert_eq!(followers.status, ComparisonStatus::Ahead);

        let engagement = &rows[1];
        assert!((engagement.competitor_avg - 4.0).abs() < 1e-9);
        assert_eq!(engagement.status, ComparisonStatus::OnPar);

        let likes = &rows[2];
        assert!((likes.difference + 20.0).abs() < 1e-9);
        assert_eq!(likes.status, ComparisonStatus::Behind);

        let posting = &rows[4];
        assert!((posting.competitor_avg - 6.0).abs() < 1e-9);
        assert!((posting.top_competitor - 7.0).abs() < 1e-9);
        assert!((posting.difference + 50.0).abs() < 1e-9);
        assert_eq!(posting.status, ComparisonStatus::Behind);
    }

    #[test]
    fn zero_average_gives_zero_difference() {
        let mut zero = rival(0, 0.0, 0.0);
        zero.growth_rate = 0.0;
        let rows = compare(&user(), &[zero]);
        let growth = &rows[5];
        assert!(growth.difference.abs() < f64::EPSILON);
        assert_eq!(growth.status, ComparisonStatus::OnPar);
    }

    #[test]
    fn compare_is_idempotent() {
        let rivals = vec![rival(8_000, 2.0, 5.0), rival(12_000, 6.0, 7.0)];
        let u = user();
        assert_eq!(compare(&u, &rivals), compare(&u, &rivals));
    }

    #[test]
    fn dead_band_boundaries() {
        assert_eq!(classify_status(10.0001), ComparisonStatus::Ahead);
        assert_eq!(classify_status(10.0), ComparisonStatus::OnPar);
        assert_eq!(classify_status(-10.0), ComparisonStatus::OnPar);
        assert_eq!(classify_status(-10.0001), ComparisonStatus::Behind);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&ComparisonStatus::OnPar).unwrap();
        assert_eq!(json, "\"on-par\"");
    }
}
