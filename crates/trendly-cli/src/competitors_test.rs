use chrono::{TimeZone, Utc};
use trendly_core::{Competitor, DashboardState, Post, PostType};
use trendly_instagram::EnrichedProfile;

use super::{store_profile, Stored};

fn enriched(id: &str, username: &str, followers: u64, likes: u64) -> EnrichedProfile {
    let posted_at = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    EnrichedProfile {
        profile: Competitor {
            id: id.to_string(),
            username: username.to_string(),
            followers,
            niche: vec!["Beauty".to_string()],
            ..Competitor::default()
        },
        posts: vec![Post::new("p1", PostType::Reel, "#glow", likes, 0, posted_at)],
    }
}

#[test]
fn store_profile_adds_new_competitor_as_tracked() {
    let mut state = DashboardState::default();

    let stored = store_profile(&mut state, enriched("ig-1", "mia", 1_000, 50), &[], true)
        .expect("store");

    assert_eq!(stored, Stored::Added);
    assert_eq!(state.competitors.len(), 1);
    assert!(state.competitors[0].is_tracked);
    assert!((state.competitors[0].engagement_rate - 5.0).abs() < 1e-9);
    assert_eq!(state.posts_by_competitor("ig-1").len(), 1);
}

#[test]
fn store_profile_refreshes_existing_username() {
    let mut state = DashboardState::default();
    store_profile(&mut state, enriched("ig-1", "mia", 1_000, 50), &[], false).expect("store");

    let stored = store_profile(&mut state, enriched("ig-1", "Mia", 2_000, 50), &[], true)
        .expect("store");

    assert_eq!(stored, Stored::Refreshed);
    assert_eq!(state.competitors.len(), 1);
    assert_eq!(state.competitors[0].followers, 2_000);
    assert!(!state.competitors[0].is_tracked);
    assert_eq!(state.posts.len(), 1);
}

#[test]
fn watchlist_niche_overrides_lookup_category() {
    let mut state = DashboardState::default();
    let niche = vec!["Skincare".to_string(), "Wellness".to_string()];

    store_profile(&mut state, enriched("ig-1", "mia", 1_000, 50), &niche, true).expect("store");

    assert_eq!(state.competitors[0].niche, niche);
}

#[test]
fn refresh_with_unavailable_posts_keeps_stored_stats() {
    let mut state = DashboardState::default();
    store_profile(&mut state, enriched("ig-1", "mia", 1_000, 50), &[], true).expect("store");
    let before = state.competitors[0].clone();

    let mut without_posts = enriched("ig-1", "mia", 1_100, 0);
    without_posts.posts.clear();
    let stored = store_profile(&mut state, without_posts, &[], true).expect("store");

    assert_eq!(stored, Stored::Refreshed);
    assert_eq!(state.competitors[0].followers, 1_100);
    assert!((state.competitors[0].average_likes - before.average_likes).abs() < f64::EPSILON);
    assert!((state.competitors[0].engagement_rate - before.engagement_rate).abs() < f64::EPSILON);
    assert_eq!(state.posts_by_competitor("ig-1").len(), 1);
}
