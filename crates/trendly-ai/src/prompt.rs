//! Prompt construction for each generation operation.
//!
//! Context is embedded as pretty-printed JSON; each user prompt ends with the
//! exact reply schema the decoder expects.

use std::collections::HashSet;

use serde_json::{json, Value};
use trendly_core::{Competitor, Post, UserProfile};

use crate::client::ChatMessage;

const TOP_POSTS_IN_ANALYSIS: usize = 10;
const ANALYSIS_CAPTION_CHARS: usize = 200;
const ANALYSIS_HASHTAGS: usize = 5;
const IDEA_POST_TYPES: usize = 5;
const IDEA_HASHTAGS: usize = 10;
const IDEA_CAPTIONS: usize = 3;
const IDEA_CAPTION_CHARS: usize = 100;

const ANALYSIS_SYSTEM: &str = "You are an expert Instagram growth strategist and content analyst.
Analyze the provided competitor data and generate actionable insights.
Always respond in valid JSON format.";

const ANALYSIS_SCHEMA: &str = r##"Provide your analysis in this exact JSON format:
{
  "insights": [
    {
      "type": "content_type|timing|hashtag|caption|format",
      "title": "Brief title",
      "description": "Detailed insight",
      "impact": "high|medium|low",
      "confidence": 85
    }
  ],
  "suggestions": [
    {
      "priority": "urgent|recommended|optional",
      "category": "content|timing|engagement|hashtags|format",
      "title": "Action title",
      "description": "What to do",
      "expectedImpact": "+X% engagement",
      "actionSteps": ["Step 1", "Step 2", "Step 3"]
    }
  ],
  "contentIdeas": ["Idea 1", "Idea 2", "Idea 3", "Idea 4", "Idea 5"],
  "captionTemplates": ["Template 1 with [placeholder]", "Template 2"],
  "hashtagRecommendations": ["#hashtag1", "#hashtag2", "#hashtag3"],
  "bestPostingStrategy": "Detailed posting schedule recommendation"
}"##;

const IDEAS_SYSTEM: &str =
    "You are a viral Instagram content strategist. Generate specific, actionable content ideas.";

const IDEAS_SCHEMA: &str = r##"Respond in JSON format:
{
  "ideas": [
    {
      "title": "Catchy title",
      "type": "reel|carousel|image|story",
      "description": "What the content should include",
      "hook": "First 3 seconds / first slide hook",
      "hashtags": ["#relevant", "#hashtags"],
      "bestTime": "Tuesday 6PM",
      "expectedEngagement": "High - because..."
    }
  ]
}"##;

const STRATEGY_SYSTEM: &str =
    "You are an Instagram growth coach. Create actionable weekly content plans.";

const STRATEGY_SCHEMA: &str = r##"Respond in JSON format:
{
  "strategy": [
    {
      "day": "Monday",
      "contentType": "Reel",
      "topic": "Specific topic idea",
      "bestTime": "6:00 PM",
      "caption": "Full caption with CTA",
      "hashtags": ["#hashtag1", "#hashtag2"]
    }
  ],
  "tips": ["Tip 1", "Tip 2", "Tip 3"]
}"##;

const PERFORMANCE_SYSTEM: &str = "You are an Instagram analytics expert. Analyze post performance.";

const PERFORMANCE_SCHEMA: &str = r##"Respond in JSON format:
{
  "performanceRating": "excellent|good|average|poor",
  "reasons": ["Reason 1", "Reason 2"],
  "improvements": ["Improvement 1", "Improvement 2"],
  "replicateStrategy": "How to replicate success or avoid issues"
}"##;

const CAPTIONS_SYSTEM: &str =
    "You are an Instagram caption expert. Analyze captions for engagement potential.";

const CAPTIONS_SCHEMA: &str = r##"Respond in JSON format:
{
  "analysis": [
    {
      "caption": "original caption",
      "score": 85,
      "strengths": ["Has CTA", "Storytelling"],
      "improvements": ["Add more emojis", "Include question"]
    }
  ],
  "patterns": ["Pattern 1 that works well", "Pattern 2"]
}"##;

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Posts sorted by engagement rate, highest first.
#[must_use]
pub fn by_engagement(posts: &[Post]) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| {
        b.engagement_rate
            .partial_cmp(&a.engagement_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}

fn competitor_summary(competitors: &[Competitor]) -> Value {
    competitors
        .iter()
        .map(|c| {
            json!({
                "username": c.username,
                "followers": c.followers,
                "engagementRate": c.engagement_rate,
                "niche": c.niche,
                "postingFrequency": c.posting_frequency,
                "avgLikes": c.average_likes,
                "avgComments": c.average_comments,
            })
        })
        .collect()
}

fn top_post_summary(posts: &[Post]) -> Value {
    by_engagement(posts)
        .into_iter()
        .take(TOP_POSTS_IN_ANALYSIS)
        .map(|p| {
            json!({
                "type": p.post_type,
                "caption": truncate_chars(&p.caption, ANALYSIS_CAPTION_CHARS),
                "hashtags": p.hashtags.iter().take(ANALYSIS_HASHTAGS).collect::<Vec<_>>(),
                "likes": p.likes,
                "comments": p.comments,
                "engagementRate": p.engagement_rate,
                "dayOfWeek": p.day_of_week,
                "timeOfDay": p.time_of_day,
            })
        })
        .collect()
}

/// Messages for the competitor analysis. Up to ten posts are included,
/// highest engagement first.
#[must_use]
pub fn analysis_messages(
    competitors: &[Competitor],
    posts: &[Post],
    user: Option<&UserProfile>,
) -> Vec<ChatMessage> {
    let user_section = user.map_or_else(String::new, |u| {
        let summary = json!({
            "followers": u.followers,
            "engagementRate": u.engagement_rate,
            "avgLikes": u.average_likes,
            "postingFrequency": u.posting_frequency,
            "niche": u.niche,
        });
        format!("USER PROFILE:\n{summary:#}")
    });

    let prompt = format!(
        "Analyze this Instagram competitor data and provide strategic recommendations:\n\n\
         COMPETITORS:\n{:#}\n\n\
         TOP PERFORMING POSTS:\n{:#}\n\n\
         {user_section}\n\n\
         {ANALYSIS_SCHEMA}",
        competitor_summary(competitors),
        top_post_summary(posts),
    );

    vec![ChatMessage::system(ANALYSIS_SYSTEM), ChatMessage::user(prompt)]
}

/// Messages asking for `count` content ideas. `top_posts` should already be
/// ordered best first.
#[must_use]
pub fn content_ideas_messages(
    user: &UserProfile,
    competitors: &[Competitor],
    top_posts: &[Post],
    count: usize,
) -> Vec<ChatMessage> {
    let mut seen = HashSet::new();
    let competitor_niches: Vec<&String> = competitors
        .iter()
        .flat_map(|c| &c.niche)
        .filter(|n| seen.insert(*n))
        .collect();

    let mut seen = HashSet::new();
    let top_hashtags: Vec<&String> = top_posts
        .iter()
        .flat_map(|p| &p.hashtags)
        .filter(|h| seen.insert(*h))
        .take(IDEA_HASHTAGS)
        .collect();

    let context = json!({
        "userNiche": user.niche,
        "userFollowers": user.followers,
        "competitorNiches": competitor_niches,
        "topContentTypes": top_posts
            .iter()
            .take(IDEA_POST_TYPES)
            .map(|p| p.post_type)
            .collect::<Vec<_>>(),
        "topHashtags": top_hashtags,
        "successfulCaptions": top_posts
            .iter()
            .take(IDEA_CAPTIONS)
            .map(|p| truncate_chars(&p.caption, IDEA_CAPTION_CHARS))
            .collect::<Vec<_>>(),
    });

    let prompt = format!(
        "Generate {count} viral content ideas based on this data:\n\n{context:#}\n\n{IDEAS_SCHEMA}"
    );

    vec![ChatMessage::system(IDEAS_SYSTEM), ChatMessage::user(prompt)]
}

/// Messages for a seven-day plan. The posting goal is the highest competitor
/// posting frequency.
#[must_use]
pub fn weekly_strategy_messages(user: &UserProfile, competitors: &[Competitor]) -> Vec<ChatMessage> {
    let goal = competitors
        .iter()
        .map(|c| c.posting_frequency)
        .fold(0.0_f64, f64::max);
    let rates = competitors
        .iter()
        .map(|c| format!("{}: {}%", c.username, c.engagement_rate))
        .collect::<Vec<_>>()
        .join(", ");

    let prompt = format!(
        "Create a 7-day Instagram content strategy for:\n\n\
         Niche: {niche}\n\
         Current followers: {followers}\n\
         Current engagement: {engagement}%\n\
         Posting frequency goal: {goal} posts/week\n\n\
         Top competitor engagement rates: {rates}\n\n\
         {STRATEGY_SCHEMA}",
        niche = user.niche.join(", "),
        followers = user.followers,
        engagement = user.engagement_rate,
    );

    vec![ChatMessage::system(STRATEGY_SYSTEM), ChatMessage::user(prompt)]
}

/// Messages asking why `post` performed the way it did relative to
/// `average_engagement`. `band` is the label from
/// [`crate::performance_band`].
#[must_use]
pub fn post_performance_messages(post: &Post, average_engagement: f64, band: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "Analyze this {band} Instagram post:\n\n\
         Type: {post_type}\n\
         Caption: \"{caption}\"\n\
         Hashtags: {hashtags}\n\
         Posted: {day} at {time}\n\
         Engagement rate: {rate}% (average is {average_engagement}%)\n\
         Likes: {likes}\n\
         Comments: {comments}\n\n\
         {PERFORMANCE_SCHEMA}",
        post_type = post.post_type,
        caption = post.caption,
        hashtags = post.hashtags.join(", "),
        day = post.day_of_week,
        time = post.time_of_day,
        rate = post.engagement_rate,
        likes = post.likes,
        comments = post.comments,
    );

    vec![ChatMessage::system(PERFORMANCE_SYSTEM), ChatMessage::user(prompt)]
}

/// Messages for reviewing `captions` within `niche`. Captions are numbered
/// from 1 in the order given.
#[must_use]
pub fn caption_messages(captions: &[String], niche: &[String]) -> Vec<ChatMessage> {
    let listed = captions
        .iter()
        .enumerate()
        .map(|(i, c)| format!("Caption {}: \"{c}\"", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");
    let prompt = format!(
        "Analyze these Instagram captions for the {niche} niche:\n\n{listed}\n\n{CAPTIONS_SCHEMA}",
        niche = niche.join(", "),
    );

    vec![ChatMessage::system(CAPTIONS_SYSTEM), ChatMessage::user(prompt)]
}
