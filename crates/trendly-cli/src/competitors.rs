//! Competitor management command handlers for the CLI.
//!
//! Every handler mutates the loaded [`DashboardState`]; `main` saves it when
//! [`run`] reports a change. Watchlist sync failures are logged per account
//! and skipped so one bad handle does not abort the run.

use clap::Subcommand;
use futures::stream::{self, StreamExt};
use trendly_core::{AppConfig, DashboardState, StateError};
use trendly_instagram::EnrichedProfile;

use crate::profile::build_provider;

/// Sub-commands available under `competitors`.
#[derive(Debug, Subcommand)]
pub enum CompetitorsCommands {
    /// Look up an account and add it to the dashboard
    Add {
        username: String,
        /// Store the competitor without tracking it
        #[arg(long)]
        untracked: bool,
    },
    /// Remove a competitor and its posts
    Remove { username: String },
    /// Toggle whether a competitor is tracked
    Track { username: String },
    /// List stored competitors
    List,
    /// Add or refresh every account in the watchlist file
    Sync {
        /// Preview the watchlist without calling Instagram
        #[arg(long)]
        dry_run: bool,
    },
}

/// Result of storing one fetched profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stored {
    Added,
    Refreshed,
}

/// Dispatch a `competitors` sub-command. Returns whether the state changed.
///
/// # Errors
///
/// Returns an error when the named competitor is unknown, a lookup fails, or
/// the watchlist cannot be loaded.
pub(crate) async fn run(
    config: &AppConfig,
    state: &mut DashboardState,
    command: CompetitorsCommands,
) -> anyhow::Result<bool> {
    match command {
        CompetitorsCommands::Add {
            username,
            untracked,
        } => run_add(config, state, &username, !untracked).await,
        CompetitorsCommands::Remove { username } => {
            let id = resolve_id(state, &username)?;
            let removed = state.remove_competitor(&id)?;
            println!("removed @{}", removed.username);
            Ok(true)
        }
        CompetitorsCommands::Track { username } => {
            let id = resolve_id(state, &username)?;
            let tracked = state.toggle_tracked(&id)?;
            println!(
                "@{} is {}",
                username.trim_start_matches('@'),
                if tracked { "tracked" } else { "not tracked" }
            );
            Ok(true)
        }
        CompetitorsCommands::List => {
            print_list(state);
            Ok(false)
        }
        CompetitorsCommands::Sync { dry_run } => run_sync(config, state, dry_run).await,
    }
}

fn resolve_id(state: &DashboardState, username: &str) -> anyhow::Result<String> {
    state
        .find_by_username(username)
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("competitor '{username}' not found"))
}

/// Store a fetched profile: refresh it when the username is already present,
/// otherwise add it. A non-empty `niche` overrides the looked-up category.
pub(crate) fn store_profile(
    state: &mut DashboardState,
    enriched: EnrichedProfile,
    niche: &[String],
    tracked: bool,
) -> Result<Stored, StateError> {
    let EnrichedProfile { mut profile, posts } = enriched;
    if !niche.is_empty() {
        profile.niche = niche.to_vec();
    }

    if let Some(existing) = state.find_by_username(&profile.username) {
        let id = existing.id.clone();
        state.refresh_competitor(&id, profile, posts)?;
        return Ok(Stored::Refreshed);
    }

    profile.is_tracked = tracked;
    let id = state.add_competitor(profile)?.id.clone();
    state.replace_posts(&id, posts)?;
    Ok(Stored::Added)
}

async fn run_add(
    config: &AppConfig,
    state: &mut DashboardState,
    username: &str,
    tracked: bool,
) -> anyhow::Result<bool> {
    if let Some(existing) = state.find_by_username(username) {
        anyhow::bail!("@{} is already on the dashboard", existing.username);
    }

    let provider = build_provider(config)?;
    let enriched = provider
        .fetch_enriched_profile(username)
        .await?
        .ok_or_else(|| anyhow::anyhow!("could not fetch profile @{username}"))?;

    crate::profile::print_profile(&enriched);
    store_profile(state, enriched, &[], tracked)?;
    println!("added");
    Ok(true)
}

fn print_list(state: &DashboardState) {
    if state.competitors.is_empty() {
        println!("no competitors yet; run `competitors add <username>` or `competitors sync`");
        return;
    }

    println!(
        "{:<28}{:<9}{:>11}{:>12}{:>12}{:>8}",
        "USERNAME", "TRACKED", "FOLLOWERS", "ENGAGEMENT", "POSTS/WEEK", "POSTS"
    );
    for c in &state.competitors {
        println!(
            "{:<28}{:<9}{:>11}{:>11.2}%{:>12.1}{:>8}",
            c.username,
            if c.is_tracked { "yes" } else { "no" },
            c.followers,
            c.engagement_rate,
            c.posting_frequency,
            state.posts_by_competitor(&c.id).len()
        );
    }
}

/// Add or refresh every watchlist account, fetching up to
/// `sync_concurrency` profiles at once.
async fn run_sync(
    config: &AppConfig,
    state: &mut DashboardState,
    dry_run: bool,
) -> anyhow::Result<bool> {
    let watchlist = trendly_core::load_watchlist(&config.watchlist_path)?;
    let entries = &watchlist.competitors;

    if dry_run {
        let handles: Vec<&str> = entries.iter().map(|e| e.handle()).collect();
        println!(
            "dry-run: would sync {} competitors: [{}]",
            handles.len(),
            handles.join(", ")
        );
        return Ok(false);
    }

    let provider = build_provider(config)?;
    let max_concurrent = config.sync_concurrency.max(1);

    let results: Vec<_> = stream::iter(entries)
        .map(|entry| {
            let provider = &provider;
            async move { (entry, provider.fetch_enriched_profile(entry.handle()).await) }
        })
        .buffer_unordered(max_concurrent)
        .collect()
        .await;

    let mut added = 0usize;
    let mut refreshed = 0usize;
    let mut failed = 0usize;

    for (entry, result) in results {
        match result {
            Ok(Some(enriched)) => match store_profile(state, enriched, &entry.niche, true) {
                Ok(Stored::Added) => added += 1,
                Ok(Stored::Refreshed) => refreshed += 1,
                Err(e) => {
                    tracing::warn!(username = %entry.handle(), error = %e, "skipping competitor");
                    failed += 1;
                }
            },
            Ok(None) => {
                tracing::warn!(username = %entry.handle(), "skipping competitor: no profile data");
                failed += 1;
            }
            Err(e) => {
                tracing::warn!(username = %entry.handle(), error = %e, "skipping competitor");
                failed += 1;
            }
        }
    }

    tracing::info!(added, refreshed, failed, "watchlist sync complete");
    println!("sync: {added} added, {refreshed} refreshed, {failed} failed");
    Ok(added + refreshed > 0)
}

#[cfg(test)]
#[path = "competitors_test.rs"]
mod tests;
