//! Records produced by the text-generation layer.
//!
//! These live in core so the server and CLI can carry them without depending
//! on the generation client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    ContentType,
    Timing,
    Hashtag,
    Caption,
    Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// An observed pattern across competitor content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendInsight {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    /// 0-100.
    pub confidence: f64,
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Competitor ids the insight was derived from.
    #[serde(default)]
    pub competitors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    Urgent,
    Recommended,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Content,
    Timing,
    Engagement,
    Hashtags,
    Format,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionableSuggestion {
    #[serde(default)]
    pub id: String,
    pub priority: SuggestionPriority,
    pub category: SuggestionCategory,
    pub title: String,
    pub description: String,
    pub expected_impact: String,
    /// Usernames of the competitors behind the suggestion.
    #[serde(default)]
    pub based_on: Vec<String>,
    #[serde(default)]
    pub action_steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaFormat {
    Reel,
    Carousel,
    Image,
    Story,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIdea {
    pub title: String,
    #[serde(rename = "type")]
    pub format: IdeaFormat,
    pub description: String,
    pub hook: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub best_time: String,
    pub expected_engagement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDay {
    pub day: String,
    /// Free text, e.g. `"Reel"` or `"Story"`.
    pub content_type: String,
    pub topic: String,
    pub best_time: String,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStrategy {
    pub strategy: Vec<StrategyDay>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Average,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPerformance {
    pub performance_rating: PerformanceRating,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    pub replicate_strategy: String,
}

/// Review of one caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionReview {
    pub caption: String,
    /// 0 to 100.
    pub score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionAnalysis {
    pub analysis: Vec<CaptionReview>,
    /// Patterns that work across the reviewed captions.
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_analysis_defaults_missing_lists() {
        let json = serde_json::json!({
            "analysis": [{"caption": "Glow up", "score": 72}]
        });
        let parsed: CaptionAnalysis = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed.analysis[0].score, 72);
        assert!(parsed.analysis[0].strengths.is_empty());
        assert!(parsed.patterns.is_empty());
    }

    #[test]
    fn insight_without_id_or_data_deserializes() {
        let json = serde_json::json!({
            "type": "content_type",
            "title": "Reels lead",
            "description": "Reels outperform static posts",
            "impact": "high",
            "confidence": 85
        });
        let insight: TrendInsight = serde_json::from_value(json).expect("deserialize");
        assert_eq!(insight.insight_type, InsightType::ContentType);
        assert_eq!(insight.impact, Impact::High);
        assert!(insight.id.is_empty());
        assert!(insight.data.is_empty());
        assert!(insight.competitors.is_empty());
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let json = serde_json::json!({
            "priority": "someday",
            "category": "content",
            "title": "t",
            "description": "d",
            "expectedImpact": "+5% engagement"
        });
        assert!(serde_json::from_value::<ActionableSuggestion>(json).is_err());
    }

    #[test]
    fn content_idea_uses_type_key() {
        let idea = ContentIdea {
            title: "Day in My Life".to_string(),
            format: IdeaFormat::Reel,
            description: "d".to_string(),
            hook: "h".to_string(),
            hashtags: vec!["#vlog".to_string()],
            best_time: "Friday 5PM".to_string(),
            expected_engagement: "High".to_string(),
        };
        let json = serde_json::to_value(&idea).unwrap();
        assert_eq!(json["type"], "reel");
        assert_eq!(json["bestTime"], "Friday 5PM");
        assert_eq!(json["expectedEngagement"], "High");
    }

    #[test]
    fn post_performance_reads_camel_case() {
        let json = serde_json::json!({
            "performanceRating": "good",
            "reasons": ["Strong hook"],
            "improvements": [],
            "replicateStrategy": "Lead with a question"
        });
        let perf: PostPerformance = serde_json::from_value(json).expect("deserialize");
        assert_eq!(perf.performance_rating, PerformanceRating::Good);
        assert_eq!(perf.reasons, vec!["Strong hook".to_string()]);
    }
}
