//! Conversion of provider payloads into dashboard records.

use chrono::{DateTime, Utc};
use trendly_core::{Competitor, Post, PostType};

use crate::types::{ProfileSearchResult, RawPost, RawProfile, RawSearchUser};

const UNKNOWN: &str = "Unknown";
const MAX_ESTIMATED_ENGAGEMENT: f64 = 15.0;

/// Rough engagement estimate from profile counters alone, in percent.
///
/// `min(media_count * 100 / followers * 0.5, 15)` rounded to one decimal;
/// zero without followers. Replaced by the post-derived rate once posts are
/// fetched.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimated_engagement(media_count: u64, followers: u64) -> f64 {
    if followers == 0 {
        return 0.0;
    }
    let estimate =
        (media_count as f64 * 100.0 / followers as f64 * 0.5).min(MAX_ESTIMATED_ENGAGEMENT);
    (estimate * 10.0).round() / 10.0
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build an untracked [`Competitor`] from a profile payload.
///
/// Post-derived metrics start at zero until [`trendly_core::enrich`] runs.
#[must_use]
pub fn normalize_profile(raw: RawProfile, added_at: DateTime<Utc>) -> Competitor {
    let display_name = non_empty(raw.full_name).unwrap_or_else(|| raw.username.clone());
    let niche = non_empty(raw.category).map_or_else(|| vec![UNKNOWN.to_string()], |c| vec![c]);

    Competitor {
        engagement_rate: estimated_engagement(raw.media_count, raw.follower_count),
        id: raw.id,
        username: raw.username,
        display_name,
        avatar: raw.profile_pic_url.unwrap_or_default(),
        bio: raw.biography.unwrap_or_default(),
        followers: raw.follower_count,
        following: raw.following_count,
        posts_count: raw.media_count,
        average_likes: 0.0,
        average_comments: 0.0,
        posting_frequency: 0.0,
        growth_rate: 0.0,
        niche,
        location: non_empty(raw.city_name).unwrap_or_else(|| UNKNOWN.to_string()),
        is_tracked: false,
        added_at,
    }
}

/// Build a [`Post`] from a feed item. `competitor_id` and `engagement_rate`
/// are filled in by enrichment.
#[must_use]
pub fn normalize_post(raw: RawPost) -> Post {
    let posted_at = DateTime::from_timestamp(raw.taken_at, 0).unwrap_or_default();
    let caption = raw.caption.map(|c| c.text).unwrap_or_default();
    let mut post = Post::new(
        raw.id,
        PostType::from_media_type(raw.media_type),
        caption,
        raw.like_count,
        raw.comment_count,
        posted_at,
    );
    post.thumbnail = raw.thumbnail_url.unwrap_or_default();
    post
}

#[must_use]
pub fn normalize_search_user(raw: RawSearchUser) -> ProfileSearchResult {
    ProfileSearchResult {
        id: raw.id,
        username: raw.username,
        display_name: raw.full_name.unwrap_or_default(),
        avatar: raw.profile_pic_url.unwrap_or_default(),
        followers: raw.follower_count.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawCaption;

    fn raw_profile() -> RawProfile {
        RawProfile {
            id: "17841400".to_string(),
            username: "glowwithmia".to_string(),
            full_name: Some(String::new()),
            profile_pic_url: Some("https://cdn.example/mia.jpg".to_string()),
            biography: None,
            follower_count: 10_000,
            following_count: 300,
            media_count: 400,
            category: None,
            city_name: None,
        }
    }

    #[test]
    fn estimated_engagement_is_capped_and_rounded() {
        assert!((estimated_engagement(400, 10_000) - 2.0).abs() < f64::EPSILON);
        assert!((estimated_engagement(10_000, 1_000) - 15.0).abs() < f64::EPSILON);
        assert!((estimated_engagement(1, 3) - 15.0).abs() < f64::EPSILON);
        assert!((estimated_engagement(7, 300) - 1.2).abs() < 1e-9);
        assert!(estimated_engagement(50, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn profile_fallbacks_apply() {
        let competitor = normalize_profile(raw_profile(), DateTime::<Utc>::default());
        assert_eq!(competitor.display_name, "glowwithmia");
        assert_eq!(competitor.niche, vec!["Unknown".to_string()]);
        assert_eq!(competitor.location, "Unknown");
        assert_eq!(competitor.bio, "");
        assert!(!competitor.is_tracked);
        assert!((competitor.engagement_rate - 2.0).abs() < f64::EPSILON);
        assert!(competitor.average_likes.abs() < f64::EPSILON);
    }

    #[test]
    fn profile_uses_category_and_city() {
        let mut raw = raw_profile();
        raw.full_name = Some("Mia Chen".to_string());
        raw.category = Some("Beauty".to_string());
        raw.city_name = Some("Austin".to_string());
        let competitor = normalize_profile(raw, DateTime::<Utc>::default());
        assert_eq!(competitor.display_name, "Mia Chen");
        assert_eq!(competitor.niche, vec!["Beauty".to_string()]);
        assert_eq!(competitor.location, "Austin");
    }

    #[test]
    fn post_maps_media_types_and_labels() {
        let make = |media_type| RawPost {
            id: "p1".to_string(),
            media_type,
            thumbnail_url: None,
            caption: Some(RawCaption {
                text: "Morning routine #skincare #SPF".to_string(),
            }),
            like_count: 120,
            comment_count: 8,
            // 2024-06-03T18:05:00Z, a Monday.
            taken_at: 1_717_437_900,
        };

        assert_eq!(normalize_post(make(1)).post_type, PostType::Image);
        assert_eq!(normalize_post(make(2)).post_type, PostType::Video);
        assert_eq!(normalize_post(make(8)).post_type, PostType::Carousel);

        let post = normalize_post(make(1));
        assert_eq!(post.hashtags, vec!["#skincare".to_string(), "#SPF".to_string()]);
        assert_eq!(post.day_of_week, "Monday");
        assert_eq!(post.time_of_day, "6:05 PM");
        assert!(post.competitor_id.is_empty());
    }

    #[test]
    fn post_without_caption_has_no_hashtags() {
        let post = normalize_post(RawPost {
            id: "p2".to_string(),
            media_type: 1,
            thumbnail_url: None,
            caption: None,
            like_count: 0,
            comment_count: 0,
            taken_at: 0,
        });
        assert_eq!(post.caption, "");
        assert!(post.hashtags.is_empty());
    }

    #[test]
    fn search_user_defaults_missing_followers() {
        let result = normalize_search_user(RawSearchUser {
            id: "1".to_string(),
            username: "zoe".to_string(),
            full_name: Some("Zoe".to_string()),
            profile_pic_url: None,
            follower_count: None,
        });
        assert_eq!(result.followers, 0);
        assert_eq!(result.display_name, "Zoe");
    }
}
