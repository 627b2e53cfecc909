//! Read-only report and AI command handlers for the CLI.

use trendly_ai::OpenAiClient;
use trendly_core::{
    analyze_gaps, best_posting_times, compare, content_type_metrics, dashboard_stats,
    hashtag_metrics, top_posts, AppConfig, Competitor, DashboardState, GapValue, Post, UserProfile,
};

const TOP_HASHTAGS: usize = 10;
const TOP_POSTS: usize = 10;

fn require_user(state: &DashboardState) -> anyhow::Result<&UserProfile> {
    state
        .user_profile
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no account connected; run `connect <username>` first"))
}

fn require_tracked(state: &DashboardState) -> anyhow::Result<Vec<Competitor>> {
    let tracked = state.tracked_competitors();
    if tracked.is_empty() {
        anyhow::bail!("no tracked competitors; run `competitors add <username>` first");
    }
    Ok(tracked)
}

/// Posts owned by the given competitors.
fn posts_of(state: &DashboardState, competitors: &[Competitor]) -> Vec<Post> {
    state
        .posts
        .iter()
        .filter(|p| competitors.iter().any(|c| c.id == p.competitor_id))
        .cloned()
        .collect()
}

pub(crate) fn fmt_gap_value(value: &GapValue) -> String {
    match value {
        GapValue::Number(n) => format!("{n:.2}"),
        GapValue::Text(s) => s.clone(),
    }
}

fn build_generator(config: &AppConfig) -> anyhow::Result<OpenAiClient> {
    let client = OpenAiClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build OpenAI client: {e}"))?;
    if !client.is_configured() {
        tracing::warn!("OPENAI_API_KEY not set; showing template output");
    }
    Ok(client)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the comparison table for the connected account.
///
/// # Errors
///
/// Returns an error if no account is connected.
pub(crate) fn run_compare(state: &DashboardState) -> anyhow::Result<()> {
    let user = require_user(state)?;
    let rows = compare(user, &state.tracked_competitors());

    println!(
        "{:<18}{:>12}{:>12}{:>12}{:>11}  STATUS",
        "METRIC", "YOU", "AVG", "TOP", "DIFF"
    );
    for row in &rows {
        println!(
            "{:<18}{:>12.2}{:>12.2}{:>12.2}{:>10.1}%  {}",
            row.metric, row.user, row.competitor_avg, row.top_competitor, row.difference, row.status
        );
    }
    Ok(())
}

/// Print the gap analysis for the connected account.
///
/// # Errors
///
/// Returns an error if no account is connected.
pub(crate) fn run_gaps(state: &DashboardState) -> anyhow::Result<()> {
    let user = require_user(state)?;
    let Some(gaps) = analyze_gaps(user, &state.tracked_competitors()) else {
        println!("no tracked competitors to compare against");
        return Ok(());
    };

    for gap in &gaps {
        println!(
            "[{}] {}: you {} vs best {}",
            gap.priority,
            gap.category,
            fmt_gap_value(&gap.user_value),
            fmt_gap_value(&gap.competitor_best)
        );
        println!("    {}", gap.recommendation);
    }
    Ok(())
}

/// Print the dashboard overview over every stored competitor post.
pub(crate) fn run_stats(state: &DashboardState, times: usize) {
    let stats = dashboard_stats(&state.competitors, &state.posts);
    println!(
        "tracked {}  combined reach {}  avg engagement {:.2}%  posts analysed {}",
        stats.tracked_competitors,
        stats.combined_reach,
        stats.average_engagement,
        stats.posts_analyzed
    );

    if state.posts.is_empty() {
        return;
    }

    println!();
    println!("{:<10}{:>7}{:>12}{:>10}{:>10}", "TYPE", "POSTS", "ENGAGEMENT", "LIKES", "COMMENTS");
    for m in content_type_metrics(&state.posts) {
        println!(
            "{:<10}{:>7}{:>11.2}%{:>10.0}{:>10.0}",
            m.post_type, m.count, m.avg_engagement, m.avg_likes, m.avg_comments
        );
    }

    println!();
    println!("best posting times (UTC):");
    for t in best_posting_times(&state.posts, times) {
        println!(
            "  {:<10}{:02}:00  {:.2}% over {} posts",
            t.day, t.hour, t.avg_engagement, t.post_count
        );
    }

    println!();
    println!("top hashtags:");
    for h in hashtag_metrics(&state.posts).into_iter().take(TOP_HASHTAGS) {
        println!(
            "  {:<24}{:>4} uses  {:.2}%{}",
            h.hashtag,
            h.usage_count,
            h.avg_engagement,
            if h.trending { "  trending" } else { "" }
        );
    }
}

/// Run the competitor analysis over tracked competitors and their posts.
///
/// # Errors
///
/// Returns an error if nothing is tracked or the output cannot be encoded.
/// Generation failures print the fallback payload instead.
pub(crate) async fn run_analyze(config: &AppConfig, state: &DashboardState) -> anyhow::Result<()> {
    let tracked = require_tracked(state)?;
    let posts = posts_of(state, &tracked);
    let generator = build_generator(config)?;

    let response = trendly_ai::assemble_or_fallback(
        &generator,
        &tracked,
        &posts,
        state.user_profile.as_ref(),
    )
    .await;
    print_json(&response)
}

/// # Errors
///
/// Returns an error if no account is connected or nothing is tracked.
pub(crate) async fn run_ideas(
    config: &AppConfig,
    state: &DashboardState,
    count: usize,
) -> anyhow::Result<()> {
    let user = require_user(state)?;
    let tracked = require_tracked(state)?;
    let top_posts = state.top_posts(TOP_POSTS);
    let generator = build_generator(config)?;

    let response =
        trendly_ai::content_ideas_or_fallback(&generator, user, &tracked, &top_posts, count).await;
    print_json(&response)
}

/// # Errors
///
/// Returns an error if no account is connected or nothing is tracked.
pub(crate) async fn run_strategy(config: &AppConfig, state: &DashboardState) -> anyhow::Result<()> {
    let user = require_user(state)?;
    let tracked = require_tracked(state)?;
    let generator = build_generator(config)?;

    let response = trendly_ai::weekly_strategy_or_fallback(&generator, user, &tracked).await;
    print_json(&response)
}

/// Explain one stored post against the average engagement of its owner's
/// posts. Searches competitor posts first, then the user's own.
///
/// # Errors
///
/// Returns an error if the post is unknown or generation fails; there is no
/// template fallback for single-post reviews.
pub(crate) async fn run_review(
    config: &AppConfig,
    state: &DashboardState,
    post_id: &str,
) -> anyhow::Result<()> {
    let (post, siblings) = if let Some(post) = state.posts.iter().find(|p| p.id == post_id) {
        (post, state.posts_by_competitor(&post.competitor_id))
    } else if let Some(post) = state.user_posts.iter().find(|p| p.id == post_id) {
        (post, state.user_posts.iter().collect())
    } else {
        anyhow::bail!("post '{post_id}' not found");
    };

    let average = average_engagement(&siblings);
    let generator = build_generator(config)?;
    let review = trendly_ai::analyze_post_performance(&generator, post, average).await?;

    println!(
        "post {post_id}: {:.2}% vs average {average:.2}% ({})",
        post.engagement_rate,
        trendly_ai::performance_band(post.engagement_rate, average)
    );
    print_json(&review)
}

/// Non-empty captions of the `limit` highest-engagement posts.
pub(crate) fn top_captions(posts: &[Post], limit: usize) -> Vec<String> {
    top_posts(posts, posts.len())
        .into_iter()
        .map(|p| p.caption)
        .filter(|c| !c.trim().is_empty())
        .take(limit)
        .collect()
}

/// Score captions of the user's posts, or of a stored competitor's posts
/// when `username` is given.
///
/// # Errors
///
/// Returns an error if the account is unknown, there are no captions, or
/// generation fails; there is no template fallback for caption reviews.
pub(crate) async fn run_review_captions(
    config: &AppConfig,
    state: &DashboardState,
    username: Option<&str>,
    limit: usize,
) -> anyhow::Result<()> {
    let (posts, niche): (Vec<Post>, Vec<String>) = if let Some(username) = username {
        let competitor = state
            .find_by_username(username)
            .ok_or_else(|| anyhow::anyhow!("competitor '{username}' not found"))?;
        let posts = state
            .posts_by_competitor(&competitor.id)
            .into_iter()
            .cloned()
            .collect();
        (posts, competitor.niche.clone())
    } else {
        let user = require_user(state)?;
        (state.user_posts.clone(), user.niche.clone())
    };

    let captions = top_captions(&posts, limit);
    if captions.is_empty() {
        anyhow::bail!("no captions to review");
    }

    let generator = build_generator(config)?;
    let analysis = trendly_ai::analyze_captions(&generator, &captions, &niche).await?;
    print_json(&analysis)
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn average_engagement(posts: &[&Post]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    posts.iter().map(|p| p.engagement_rate).sum::<f64>() / posts.len() as f64
}
