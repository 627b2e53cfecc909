//! Fixed payloads returned when text generation is unavailable.

use trendly_core::{ContentIdea, IdeaFormat, StrategyDay, WeeklyStrategy};

use crate::types::{AnalysisResult, ContentIdeas};

pub const ANALYSIS_UNAVAILABLE: &str = "AI analysis unavailable - showing sample recommendations";
pub const IDEAS_UNAVAILABLE: &str = "AI unavailable - showing template ideas";
pub const STRATEGY_UNAVAILABLE: &str = "AI unavailable - showing template strategy";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[must_use]
pub fn analysis() -> AnalysisResult {
    AnalysisResult {
        insights: Vec::new(),
        suggestions: Vec::new(),
        content_ideas: strings(&[
            "Behind-the-scenes content showing your creative process",
            "Tutorial or how-to related to your niche",
            "Day in the life content",
            "Trending audio Reel with your unique twist",
            "Carousel post sharing valuable tips",
        ]),
        caption_templates: strings(&[
            "Here's what nobody tells you about [topic]... 👇",
            "I spent [time] learning this so you don't have to:",
            "The secret to [result]? It's simpler than you think.",
        ]),
        hashtag_recommendations: strings(&["#contentcreator", "#growthtips", "#instagram"]),
        best_posting_strategy: "Post Reels Tuesday-Friday between 5-7 PM for optimal engagement."
            .to_string(),
    }
}

fn idea(
    title: &str,
    format: IdeaFormat,
    description: &str,
    hook: &str,
    hashtags: &[&str],
    best_time: &str,
    expected_engagement: &str,
) -> ContentIdea {
    ContentIdea {
        title: title.to_string(),
        format,
        description: description.to_string(),
        hook: hook.to_string(),
        hashtags: strings(hashtags),
        best_time: best_time.to_string(),
        expected_engagement: expected_engagement.to_string(),
    }
}

#[must_use]
pub fn content_ideas() -> ContentIdeas {
    ContentIdeas {
        ideas: vec![
            idea(
                "3 Things I Wish I Knew Earlier",
                IdeaFormat::Carousel,
                "Share lessons learned in your niche",
                "Nobody talks about this...",
                &["#tips", "#lessons", "#growth"],
                "Wednesday 6PM",
                "High - educational content performs well",
            ),
            idea(
                "Day in My Life",
                IdeaFormat::Reel,
                "Show your daily routine with trending audio",
                "POV: You're spending a day with me",
                &["#dayinthelife", "#routine", "#vlog"],
                "Friday 5PM",
                "High - relatable content",
            ),
            idea(
                "Unpopular Opinion",
                IdeaFormat::Reel,
                "Share a controversial take in your niche",
                "Hot take: [statement]",
                &["#unpopularopinion", "#hottake"],
                "Tuesday 7PM",
                "Very High - drives comments",
            ),
        ],
    }
}

fn day(
    day: &str,
    content_type: &str,
    topic: &str,
    best_time: &str,
    caption: &str,
    hashtags: &[&str],
) -> StrategyDay {
    StrategyDay {
        day: day.to_string(),
        content_type: content_type.to_string(),
        topic: topic.to_string(),
        best_time: best_time.to_string(),
        caption: caption.to_string(),
        hashtags: strings(hashtags),
    }
}

#[must_use]
pub fn weekly_strategy() -> WeeklyStrategy {
    WeeklyStrategy {
        strategy: vec![
            day(
                "Monday",
                "Carousel",
                "Weekly motivation or tips",
                "12:00 PM",
                "Start your week strong 💪 Here are 5 things to focus on...",
                &["#mondaymotivation", "#weeklygoals"],
            ),
            day(
                "Wednesday",
                "Reel",
                "Educational or tutorial content",
                "6:00 PM",
                "Save this for later! Here's how to...",
                &["#tutorial", "#howto", "#tips"],
            ),
            day(
                "Friday",
                "Reel",
                "Trending or entertaining content",
                "5:00 PM",
                "Weekend vibes 🎉 [Trending topic]",
                &["#friday", "#weekend", "#trending"],
            ),
            day(
                "Sunday",
                "Story",
                "Behind the scenes or Q&A",
                "11:00 AM",
                "Sunday reset! AMA in stories 👇",
                &["#sundayreset", "#ama"],
            ),
        ],
        tips: strings(&[
            "Post consistently at the same times each week",
            "Respond to comments within the first hour",
            "Use 5-7 relevant hashtags per post",
            "Add a clear CTA in every caption",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_fallback_shape() {
        let a = analysis();
        assert!(a.insights.is_empty());
        assert!(a.suggestions.is_empty());
        assert_eq!(a.content_ideas.len(), 5);
        assert_eq!(a.caption_templates.len(), 3);
        assert_eq!(a.hashtag_recommendations.len(), 3);
    }

    #[test]
    fn idea_and_strategy_fallback_sizes() {
        assert_eq!(content_ideas().ideas.len(), 3);
        let strategy = weekly_strategy();
        assert_eq!(strategy.strategy.len(), 4);
        assert_eq!(strategy.tips.len(), 4);
        assert_eq!(strategy.strategy[3].content_type, "Story");
    }
}
