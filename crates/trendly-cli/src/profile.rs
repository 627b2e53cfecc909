//! Profile lookup command handlers for the CLI.
//!
//! These talk to the Instagram provider directly. Lookups that find nothing
//! are reported and exit cleanly; a malformed upstream payload is an error.

use chrono::Utc;
use trendly_core::{AppConfig, DashboardState, UserProfile};
use trendly_instagram::{EnrichedProfile, InstagramProvider};

/// Build the Instagram provider, refusing to run without an API key.
///
/// # Errors
///
/// Returns an error if `RAPIDAPI_KEY` is not set or the HTTP client cannot be
/// constructed.
pub(crate) fn build_provider(config: &AppConfig) -> anyhow::Result<InstagramProvider> {
    if !config.instagram_configured() {
        anyhow::bail!("RAPIDAPI_KEY is not set; cannot query Instagram");
    }
    InstagramProvider::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build Instagram client: {e}"))
}

pub(crate) fn print_profile(enriched: &EnrichedProfile) {
    let p = &enriched.profile;
    println!("@{} ({})", p.username, p.display_name);
    println!(
        "  followers {}  following {}  posts {}",
        p.followers, p.following, p.posts_count
    );
    println!(
        "  engagement {:.2}%  avg likes {:.0}  avg comments {:.0}  posts/week {:.1}",
        p.engagement_rate, p.average_likes, p.average_comments, p.posting_frequency
    );
    println!("  niche {}  location {}", p.niche.join(", "), p.location);
    println!("  {} recent posts analysed", enriched.posts.len());
}

/// Look up a profile and print its derived metrics.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the upstream payload
/// is malformed.
pub(crate) async fn run_lookup(config: &AppConfig, username: &str, json: bool) -> anyhow::Result<()> {
    let provider = build_provider(config)?;
    let Some(enriched) = provider.fetch_enriched_profile(username).await? else {
        println!("no profile data for @{}", username.trim_start_matches('@'));
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&enriched)?);
    } else {
        print_profile(&enriched);
    }
    Ok(())
}

/// Search accounts and print one line per match.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the upstream payload
/// is malformed.
pub(crate) async fn run_search(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let provider = build_provider(config)?;
    let results = provider.search_users(query).await?;

    if results.is_empty() {
        println!("no accounts found for \"{query}\"");
        return Ok(());
    }

    println!("{:<32}{:<32}FOLLOWERS", "USERNAME", "NAME");
    for r in &results {
        println!("{:<32}{:<32}{}", r.username, r.display_name, r.followers);
    }
    Ok(())
}

/// Connect the user's own account, replacing any previous one.
///
/// # Errors
///
/// Returns an error if the profile cannot be found or the provider fails.
pub(crate) async fn run_connect(
    config: &AppConfig,
    state: &mut DashboardState,
    username: &str,
) -> anyhow::Result<()> {
    let provider = build_provider(config)?;
    let enriched = provider
        .fetch_enriched_profile(username)
        .await?
        .ok_or_else(|| anyhow::anyhow!("could not fetch profile @{username}"))?;

    print_profile(&enriched);
    let EnrichedProfile { profile, posts } = enriched;
    state.set_user_profile(UserProfile::from_competitor(profile, Utc::now()));
    state.set_user_posts(posts);
    println!("connected");
    Ok(())
}
