//! Gap analysis: where the user trails the best tracked competitor.

use serde::{Deserialize, Serialize};

use crate::accounts::{Competitor, UserProfile};
use crate::thresholds::{
    COMMENTS_GAP_RATIO, ENGAGEMENT_GAP_RATIO, ENGAGEMENT_HIGH_PRIORITY_RATIO, GROWTH_GAP_RATIO,
    POSTING_GAP_RATIO, POSTING_HIGH_PRIORITY_RATIO,
};

const ENGAGEMENT_RECOMMENDATION: &str = "Focus on creating more interactive content like polls, questions, and carousels to boost engagement.";
const POSTING_RECOMMENDATION: &str = "Top competitors post more frequently. Consider batching content creation to maintain consistency.";
const GROWTH_RECOMMENDATION: &str = "Boost growth by collaborating with similar creators, using trending audio in Reels, and optimizing hashtags.";
const COMMENTS_RECOMMENDATION: &str = "End your captions with questions or CTAs. Respond to every comment within the first hour to boost engagement.";
const OVERALL_RECOMMENDATION: &str = "You're performing well against competitors! Focus on maintaining consistency and testing new content formats.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPriority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for GapPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapPriority::High => write!(f, "high"),
            GapPriority::Medium => write!(f, "medium"),
            GapPriority::Low => write!(f, "low"),
        }
    }
}

/// A gap value is either a raw number or a display string such as `"3/week"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GapValue {
    Number(f64),
    Text(String),
}

impl From<f64> for GapValue {
    fn from(value: f64) -> Self {
        GapValue::Number(value)
    }
}

impl From<String> for GapValue {
    fn from(value: String) -> Self {
        GapValue::Text(value)
    }
}

impl From<&str> for GapValue {
    fn from(value: &str) -> Self {
        GapValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysis {
    pub category: String,
    pub user_value: GapValue,
    pub competitor_best: GapValue,
    pub recommendation: String,
    pub priority: GapPriority,
}

impl GapAnalysis {
    fn new(
        category: &str,
        user_value: impl Into<GapValue>,
        competitor_best: impl Into<GapValue>,
        recommendation: &str,
        priority: GapPriority,
    ) -> Self {
        Self {
            category: category.to_string(),
            user_value: user_value.into(),
            competitor_best: competitor_best.into(),
            recommendation: recommendation.to_string(),
            priority,
        }
    }
}

/// Find the metrics where `user` falls short of the best tracked competitor.
///
/// Returns `None` when `tracked` is empty. Otherwise returns at least one
/// record: either the gaps that fired, in rule order, or a single
/// "Overall Performance" record.
#[must_use]
pub fn analyze_gaps(user: &UserProfile, tracked: &[Competitor]) -> Option<Vec<GapAnalysis>> {
    if tracked.is_empty() {
        return None;
    }

    let top = |f: fn(&Competitor) -> f64| tracked.iter().map(f).fold(f64::NEG_INFINITY, f64::max);
    let top_engagement = top(|c| c.engagement_rate);
    let top_posting = top(|c| c.posting_frequency);
    let top_growth = top(|c| c.growth_rate);
    let top_comments = top(|c| c.average_comments);

    let mut gaps = Vec::new();

    if user.engagement_rate < top_engagement * ENGAGEMENT_GAP_RATIO {
        let priority = if user.engagement_rate < top_engagement * ENGAGEMENT_HIGH_PRIORITY_RATIO {
            GapPriority::High
        } else {
            GapPriority::Medium
        };
        gaps.push(GapAnalysis::new(
            "Engagement Rate",
            user.engagement_rate,
            top_engagement,
            ENGAGEMENT_RECOMMENDATION,
            priority,
        ));
    }

    if user.posting_frequency < top_posting * POSTING_GAP_RATIO {
        let priority = if user.posting_frequency < top_posting * POSTING_HIGH_PRIORITY_RATIO {
            GapPriority::High
        } else {
            GapPriority::Medium
        };
        gaps.push(GapAnalysis::new(
            "Posting Frequency",
            format!("{}/week", user.posting_frequency),
            format!("{top_posting}/week"),
            POSTING_RECOMMENDATION,
            priority,
        ));
    }

    if user.growth_rate < top_growth * GROWTH_GAP_RATIO {
        gaps.push(GapAnalysis::new(
            "Growth Rate",
            format!("{}%", user.growth_rate),
            format!("{top_growth}%"),
            GROWTH_RECOMMENDATION,
            GapPriority::High,
        ));
    }

    if user.average_comments < top_comments * COMMENTS_GAP_RATIO {
        gaps.push(GapAnalysis::new(
            "Comment Engagement",
            user.average_comments,
            top_comments,
            COMMENTS_RECOMMENDATION,
            GapPriority::Medium,
        ));
    }

    if gaps.is_empty() {
        gaps.push(GapAnalysis::new(
            "Overall Performance",
            "Excellent",
            "Competitive",
            OVERALL_RECOMMENDATION,
            GapPriority::Low,
        ));
    }

    tracing::debug!(
        tracked = tracked.len(),
        gaps = gaps.len(),
        "gap analysis complete"
    );
    Some(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(engagement: f64, posting: f64, growth: f64, comments: f64) -> UserProfile {
        UserProfile {
            engagement_rate: engagement,
            posting_frequency: posting,
            growth_rate: growth,
            average_comments: comments,
            ..UserProfile::default()
        }
    }

    fn rival(engagement: f64, posting: f64, growth: f64, comments: f64) -> Competitor {
        Competitor {
            engagement_rate: engagement,
            posting_frequency: posting,
            growth_rate: growth,
            average_comments: comments,
            is_tracked: true,
            ..Competitor::default()
        }
    }

    #[test]
    fn no_tracked_competitors_is_no_data() {
        assert!(analyze_gaps(&user(1.0, 1.0, 1.0, 1.0), &[]).is_none());
    }

    #[test]
    fn engagement_gap_is_high_below_half() {
        let gaps = analyze_gaps(&user(2.0, 5.0, 3.0, 50.0), &[rival(5.0, 5.0, 3.0, 50.0)])
            .expect("tracked competitors present");
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].category, "Engagement Rate");
        assert_eq!(gaps[0].priority, GapPriority::High);
        assert_eq!(gaps[0].user_value, GapValue::Number(2.0));
        assert_eq!(gaps[0].competitor_best, GapValue::Number(5.0));
        assert_eq!(gaps[0].recommendation, ENGAGEMENT_RECOMMENDATION);
    }

    #[test]
    fn engagement_gap_is_medium_between_half_and_eighty_percent() {
        let gaps = analyze_gaps(&user(3.0, 5.0, 3.0, 50.0), &[rival(5.0, 5.0, 3.0, 50.0)])
            .expect("tracked competitors present");
        assert_eq!(gaps[0].priority, GapPriority::Medium);
    }

    #[test]
    fn engagement_two_against_ten_is_high() {
        let gaps = analyze_gaps(&user(2.0, 5.0, 3.0, 50.0), &[rival(10.0, 5.0, 3.0, 50.0)])
            .expect("tracked competitors present");
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].category, "Engagement Rate");
        assert_eq!(gaps[0].priority, GapPriority::High);
        assert_eq!(gaps[0].competitor_best, GapValue::Number(10.0));
    }

    #[test]
    fn engagement_six_against_ten_is_medium() {
        let gaps = analyze_gaps(&user(6.0, 5.0, 3.0, 50.0), &[rival(10.0, 5.0, 3.0, 50.0)])
            .expect("tracked competitors present");
        assert_eq!(gaps[0].category, "Engagement Rate");
        assert_eq!(gaps[0].priority, GapPriority::Medium);
    }

    #[test]
    fn engagement_at_exactly_half_of_top_is_medium() {
        let gaps = analyze_gaps(&user(5.0, 5.0, 3.0, 50.0), &[rival(10.0, 5.0, 3.0, 50.0)])
            .expect("tracked competitors present");
        assert_eq!(gaps[0].category, "Engagement Rate");
        assert_eq!(gaps[0].priority, GapPriority::Medium);
    }

    #[test]
    fn engagement_at_exactly_eighty_percent_has_no_gap() {
        let gaps = analyze_gaps(&user(8.0, 5.0, 3.0, 50.0), &[rival(10.0, 5.0, 3.0, 50.0)])
            .expect("tracked competitors present");
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].category, "Overall Performance");
    }

    #[test]
    fn posting_gap_uses_week_strings() {
        let gaps = analyze_gaps(&user(5.0, 3.0, 3.0, 50.0), &[rival(5.0, 7.0, 3.0, 50.0)])
            .expect("tracked competitors present");
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].category, "Posting Frequency");
        assert_eq!(gaps[0].user_value, GapValue::Text("3/week".to_string()));
        assert_eq!(gaps[0].competitor_best, GapValue::Text("7/week".to_string()));
        assert_eq!(gaps[0].priority, GapPriority::High);
    }

    #[test]
    fn growth_and_comment_gaps_have_fixed_priorities() {
        let gaps = analyze_gaps(&user(5.0, 7.0, 1.0, 10.0), &[rival(5.0, 7.0, 4.5, 40.0)])
            .expect("tracked competitors present");
        let categories: Vec<&str> = gaps.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["Growth Rate", "Comment Engagement"]);
        assert_eq!(gaps[0].priority, GapPriority::High);
        assert_eq!(gaps[0].user_value, GapValue::Text("1%".to_string()));
        assert_eq!(gaps[0].competitor_best, GapValue::Text("4.5%".to_string()));
        assert_eq!(gaps[1].priority, GapPriority::Medium);
    }

    #[test]
    fn maxima_are_taken_across_all_tracked() {
        let rivals = vec![rival(2.0, 7.0, 1.0, 10.0), rival(6.0, 2.0, 1.0, 10.0)];
        let gaps = analyze_gaps(&user(4.0, 4.0, 1.0, 10.0), &rivals)
            .expect("tracked competitors present");
        let categories: Vec<&str> = gaps.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["Engagement Rate", "Posting Frequency"]);
    }

    #[test]
    fn no_gap_yields_single_overall_record() {
        let gaps = analyze_gaps(&user(5.0, 7.0, 3.0, 50.0), &[rival(5.0, 7.0, 3.0, 50.0)])
            .expect("tracked competitors present");
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].category, "Overall Performance");
        assert_eq!(gaps[0].user_value, GapValue::Text("Excellent".to_string()));
        assert_eq!(gaps[0].competitor_best, GapValue::Text("Competitive".to_string()));
        assert_eq!(gaps[0].priority, GapPriority::Low);
    }

    #[test]
    fn gap_values_serialize_untagged() {
        let gap = GapAnalysis::new("X", 2.5, "3/week", "r", GapPriority::Medium);
        let json = serde_json::to_value(&gap).unwrap();
        assert_eq!(json["userValue"], 2.5);
        assert_eq!(json["competitorBest"], "3/week");
        assert_eq!(json["priority"], "medium");
    }
}
