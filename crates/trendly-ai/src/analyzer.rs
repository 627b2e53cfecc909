//! Generation operations: prompt, complete, decode, post-process.

use trendly_core::{
    CaptionAnalysis, Competitor, Post, PostPerformance, UserProfile, WeeklyStrategy,
};

use crate::client::TextGenerator;
use crate::error::AiError;
use crate::extract::extract_json;
use crate::fallback;
use crate::prompt;
use crate::types::{AiResponse, AnalysisResult, ContentIdeas};

const ANALYSIS_MAX_TOKENS: u32 = 2000;
const IDEAS_MAX_TOKENS: u32 = 2000;
const STRATEGY_MAX_TOKENS: u32 = 2500;
const PERFORMANCE_MAX_TOKENS: u32 = 1000;
const CAPTIONS_MAX_TOKENS: u32 = 1000;

/// Competitors credited on each insight.
const INSIGHT_PROVENANCE: usize = 3;
/// Competitors credited on each suggestion.
const SUGGESTION_PROVENANCE: usize = 2;

const HIGH_PERFORMANCE_RATIO: f64 = 1.5;
const LOW_PERFORMANCE_RATIO: f64 = 0.5;

/// Generate insights and suggestions from competitor data.
///
/// Insights get ids `ai-insight-{n}` and the ids of the first three
/// competitors; suggestions get ids `ai-suggestion-{n}` and the usernames of
/// the first two.
///
/// # Errors
///
/// Returns [`AiError`] when generation fails or the reply does not decode.
pub async fn assemble(
    generator: &dyn TextGenerator,
    competitors: &[Competitor],
    posts: &[Post],
    user: Option<&UserProfile>,
) -> Result<AnalysisResult, AiError> {
    let messages = prompt::analysis_messages(competitors, posts, user);
    let reply = generator.complete(&messages, ANALYSIS_MAX_TOKENS).await?;
    let mut result: AnalysisResult = extract_json(&reply)?;

    let insight_ids: Vec<String> = competitors
        .iter()
        .take(INSIGHT_PROVENANCE)
        .map(|c| c.id.clone())
        .collect();
    for (idx, insight) in result.insights.iter_mut().enumerate() {
        insight.id = format!("ai-insight-{idx}");
        insight.competitors.clone_from(&insight_ids);
    }

    let based_on: Vec<String> = competitors
        .iter()
        .take(SUGGESTION_PROVENANCE)
        .map(|c| c.username.clone())
        .collect();
    for (idx, suggestion) in result.suggestions.iter_mut().enumerate() {
        suggestion.id = format!("ai-suggestion-{idx}");
        suggestion.based_on.clone_from(&based_on);
    }

    tracing::info!(
        competitors = competitors.len(),
        posts = posts.len(),
        insights = result.insights.len(),
        suggestions = result.suggestions.len(),
        "competitor analysis generated"
    );
    Ok(result)
}

/// Generate `count` content ideas modelled on the best competitor posts.
///
/// # Errors
///
/// Returns [`AiError`] when generation fails or the reply does not decode.
pub async fn generate_content_ideas(
    generator: &dyn TextGenerator,
    user: &UserProfile,
    competitors: &[Competitor],
    top_posts: &[Post],
    count: usize,
) -> Result<ContentIdeas, AiError> {
    let messages = prompt::content_ideas_messages(user, competitors, top_posts, count);
    let reply = generator.complete(&messages, IDEAS_MAX_TOKENS).await?;
    let ideas: ContentIdeas = extract_json(&reply)?;
    tracing::info!(requested = count, ideas = ideas.ideas.len(), "content ideas generated");
    Ok(ideas)
}

/// Generate a weekly posting plan.
///
/// # Errors
///
/// Returns [`AiError`] when generation fails or the reply does not decode.
pub async fn generate_weekly_strategy(
    generator: &dyn TextGenerator,
    user: &UserProfile,
    competitors: &[Competitor],
) -> Result<WeeklyStrategy, AiError> {
    let messages = prompt::weekly_strategy_messages(user, competitors);
    let reply = generator.complete(&messages, STRATEGY_MAX_TOKENS).await?;
    let strategy: WeeklyStrategy = extract_json(&reply)?;
    tracing::info!(days = strategy.strategy.len(), "weekly strategy generated");
    Ok(strategy)
}

/// Label a post relative to the average engagement rate.
#[must_use]
pub fn performance_band(engagement_rate: f64, average_engagement: f64) -> &'static str {
    if engagement_rate > average_engagement * HIGH_PERFORMANCE_RATIO {
        "high performing"
    } else if engagement_rate < average_engagement * LOW_PERFORMANCE_RATIO {
        "low performing"
    } else {
        "average performing"
    }
}

/// Explain a single post's performance.
///
/// # Errors
///
/// Returns [`AiError`] when generation fails or the reply does not decode.
pub async fn analyze_post_performance(
    generator: &dyn TextGenerator,
    post: &Post,
    average_engagement: f64,
) -> Result<PostPerformance, AiError> {
    let band = performance_band(post.engagement_rate, average_engagement);
    let messages = prompt::post_performance_messages(post, average_engagement, band);
    let reply = generator.complete(&messages, PERFORMANCE_MAX_TOKENS).await?;
    Ok(extract_json(&reply)?)
}

/// Score captions for engagement potential and pick out working patterns.
///
/// # Errors
///
/// Returns [`AiError`] when generation fails or the reply does not decode.
pub async fn analyze_captions(
    generator: &dyn TextGenerator,
    captions: &[String],
    niche: &[String],
) -> Result<CaptionAnalysis, AiError> {
    let messages = prompt::caption_messages(captions, niche);
    let reply = generator.complete(&messages, CAPTIONS_MAX_TOKENS).await?;
    let analysis: CaptionAnalysis = extract_json(&reply)?;
    tracing::info!(
        captions = captions.len(),
        reviewed = analysis.analysis.len(),
        "captions analyzed"
    );
    Ok(analysis)
}

/// [`assemble`], or the sample recommendations when it fails.
pub async fn assemble_or_fallback(
    generator: &dyn TextGenerator,
    competitors: &[Competitor],
    posts: &[Post],
    user: Option<&UserProfile>,
) -> AiResponse<AnalysisResult> {
    match assemble(generator, competitors, posts, user).await {
        Ok(result) => AiResponse::generated(result),
        Err(e) => {
            tracing::warn!(error = %e, "competitor analysis failed; using fallback");
            AiResponse::fallback(fallback::analysis(), fallback::ANALYSIS_UNAVAILABLE)
        }
    }
}

/// [`generate_content_ideas`], or the template ideas when it fails.
pub async fn content_ideas_or_fallback(
    generator: &dyn TextGenerator,
    user: &UserProfile,
    competitors: &[Competitor],
    top_posts: &[Post],
    count: usize,
) -> AiResponse<ContentIdeas> {
    match generate_content_ideas(generator, user, competitors, top_posts, count).await {
        Ok(ideas) => AiResponse::generated(ideas),
        Err(e) => {
            tracing::warn!(error = %e, "content idea generation failed; using fallback");
            AiResponse::fallback(fallback::content_ideas(), fallback::IDEAS_UNAVAILABLE)
        }
    }
}

/// [`generate_weekly_strategy`], or the template strategy when it fails.
pub async fn weekly_strategy_or_fallback(
    generator: &dyn TextGenerator,
    user: &UserProfile,
    competitors: &[Competitor],
) -> AiResponse<WeeklyStrategy> {
    match generate_weekly_strategy(generator, user, competitors).await {
        Ok(strategy) => AiResponse::generated(strategy),
        Err(e) => {
            tracing::warn!(error = %e, "weekly strategy generation failed; using fallback");
            AiResponse::fallback(fallback::weekly_strategy(), fallback::STRATEGY_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
