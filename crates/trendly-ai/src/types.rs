use serde::{Deserialize, Serialize};
use trendly_core::{ActionableSuggestion, ContentIdea, TrendInsight};

/// Decoded reply of the competitor analysis prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub insights: Vec<TrendInsight>,
    pub suggestions: Vec<ActionableSuggestion>,
    #[serde(default)]
    pub content_ideas: Vec<String>,
    #[serde(default)]
    pub caption_templates: Vec<String>,
    #[serde(default)]
    pub hashtag_recommendations: Vec<String>,
    #[serde(default)]
    pub best_posting_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIdeas {
    pub ideas: Vec<ContentIdea>,
}

/// A generation result, or its fallback tagged with why generation failed.
///
/// Serializes as the payload's own fields plus an `error` string when the
/// payload is a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponse<T> {
    #[serde(flatten)]
    pub payload: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AiResponse<T> {
    #[must_use]
    pub fn generated(payload: T) -> Self {
        Self {
            payload,
            error: None,
        }
    }

    #[must_use]
    pub fn fallback(payload: T, error: &str) -> Self {
        Self {
            payload,
            error: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}
