//! Post aggregation and competitor enrichment.

use crate::accounts::Competitor;
use crate::posts::Post;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Summary statistics over one account's posts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PostAggregate {
    pub average_likes: f64,
    pub average_comments: f64,
    /// Percent, two decimals.
    pub engagement_rate: f64,
    /// Posts per week, whole number.
    pub posting_frequency: f64,
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reduce `posts` to summary statistics against `follower_count`.
///
/// Also rewrites every post's `engagement_rate` as
/// `(likes + comments) / follower_count * 100` (two decimals, `0` without
/// followers). An empty slice yields [`PostAggregate::default`].
///
/// Posting frequency is `count / span_days * 7` rounded to a whole number,
/// where the span runs from the oldest to the newest post. When every post
/// shares one instant the span is zero and the post count is returned as-is.
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(posts: &mut [Post], follower_count: u64) -> PostAggregate {
    let followers = follower_count as f64;

    for post in posts.iter_mut() {
        post.engagement_rate = if follower_count > 0 {
            round2(post.interactions() as f64 / followers * 100.0)
        } else {
            0.0
        };
    }

    if posts.is_empty() {
        return PostAggregate::default();
    }

    let count = posts.len() as f64;
    let total_likes: u64 = posts.iter().map(|p| p.likes).sum();
    let total_comments: u64 = posts.iter().map(|p| p.comments).sum();
    let average_likes = total_likes as f64 / count;
    let average_comments = total_comments as f64 / count;

    let engagement_rate = if follower_count > 0 {
        round2((average_likes + average_comments) / followers * 100.0)
    } else {
        0.0
    };

    let oldest = posts.iter().map(|p| p.posted_at).min();
    let newest = posts.iter().map(|p| p.posted_at).max();
    let span_days = match (oldest, newest) {
        (Some(oldest), Some(newest)) => {
            (newest - oldest).num_milliseconds() as f64 / MILLIS_PER_DAY
        }
        _ => 0.0,
    };

    let posting_frequency = if span_days > 0.0 {
        (count / span_days * 7.0).round()
    } else {
        count
    };

    PostAggregate {
        average_likes,
        average_comments,
        engagement_rate,
        posting_frequency,
    }
}

/// Refresh a competitor's derived metrics from its posts.
///
/// Posts are re-scored against the competitor's follower count and stamped
/// with its id. With no posts the competitor is returned unchanged so that
/// previously known statistics survive an empty refresh.
#[must_use]
pub fn enrich(competitor: Competitor, posts: &mut [Post]) -> Competitor {
    if posts.is_empty() {
        return competitor;
    }

    let summary = aggregate(posts, competitor.followers);
    for post in posts.iter_mut() {
        post.competitor_id.clone_from(&competitor.id);
    }

    tracing::debug!(
        username = %competitor.username,
        posts = posts.len(),
        engagement_rate = summary.engagement_rate,
        posting_frequency = summary.posting_frequency,
        "enriched competitor from posts"
    );

    Competitor {
        average_likes: summary.average_likes.round(),
        average_comments: summary.average_comments.round(),
        engagement_rate: summary.engagement_rate,
        posting_frequency: summary.posting_frequency,
        ..competitor
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::posts::PostType;

    fn post(id: &str, likes: u64, comments: u64, days_ago: i64) -> Post {
        let base = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        Post::new(
            id,
            PostType::Image,
            "",
            likes,
            comments,
            base - Duration::days(days_ago),
        )
    }

    fn competitor(followers: u64) -> Competitor {
        Competitor {
            id: "c-1".to_string(),
            username: "rival".to_string(),
            followers,
            engagement_rate: 3.3,
            average_likes: 111.0,
            average_comments: 22.0,
            posting_frequency: 4.0,
            growth_rate: 2.0,
            ..Competitor::default()
        }
    }

    #[test]
    fn empty_posts_return_zero_aggregate() {
        let mut posts: Vec<Post> = vec![];
        assert_eq!(aggregate(&mut posts, 1_000), PostAggregate::default());
        assert_eq!(aggregate(&mut posts, 0), PostAggregate::default());
    }

    #[test]
    fn engagement_rate_uses_average_interactions() {
        let mut posts = vec![post("a", 100, 10, 0), post("b", 300, 30, 2)];
        let summary = aggregate(&mut posts, 4_000);
        assert!((summary.average_likes - 200.0).abs() < f64::EPSILON);
        assert!((summary.average_comments - 20.0).abs() < f64::EPSILON);
        // (200 + 20) / 4000 * 100 = 5.5
        assert!((summary.engagement_rate - 5.5).abs() < 1e-9);
    }

    #[test]
    fn engagement_rate_rounds_to_two_decimals() {
        let mut posts = vec![post("a", 1, 0, 0)];
        let summary = aggregate(&mut posts, 3);
        // 1/3 * 100 = 33.333...
        assert!((summary.engagement_rate - 33.33).abs() < 1e-9);
        assert!((posts[0].engagement_rate - 33.33).abs() < 1e-9);
    }

    #[test]
    fn zero_followers_yield_zero_engagement() {
        let mut posts = vec![post("a", 50, 5, 0)];
        let summary = aggregate(&mut posts, 0);
        assert!(summary.engagement_rate.abs() < f64::EPSILON);
        assert!(posts[0].engagement_rate.abs() < f64::EPSILON);
        assert!((summary.average_likes - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn per_post_engagement_is_recomputed() {
        let mut posts = vec![post("a", 90, 10, 0), post("b", 40, 10, 1)];
        posts[0].engagement_rate = 99.0;
        aggregate(&mut posts, 1_000);
        assert!((posts[0].engagement_rate - 10.0).abs() < 1e-9);
        assert!((posts[1].engagement_rate - 5.0).abs() < 1e-9);
    }

    #[test]
    fn ten_posts_over_ten_days_post_seven_per_week() {
        // Oldest at 10 days ago, newest today: a 10-day span.
        let mut posts: Vec<Post> = (0..10)
            .map(|i| {
                let days_ago = if i == 9 { 10 } else { i };
                post(&format!("p{i}"), 10, 1, days_ago)
            })
            .collect();
        let summary = aggregate(&mut posts, 1_000);
        assert!((summary.posting_frequency - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn posting_frequency_ignores_input_order() {
        let mut posts = vec![post("old", 1, 1, 14), post("new", 1, 1, 0), post("mid", 1, 1, 7)];
        let summary = aggregate(&mut posts, 100);
        // 3 posts over 14 days -> 1.5/week -> rounds to 2
        assert!((summary.posting_frequency - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_span_falls_back_to_post_count() {
        let mut posts = vec![post("a", 1, 1, 3), post("b", 1, 1, 3), post("c", 1, 1, 3)];
        let summary = aggregate(&mut posts, 100);
        assert!((summary.posting_frequency - 3.0).abs() < f64::EPSILON);

        let mut single = vec![post("solo", 1, 1, 0)];
        assert!((aggregate(&mut single, 100).posting_frequency - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn enrich_with_no_posts_returns_input_unchanged() {
        let original = competitor(10_000);
        let mut posts: Vec<Post> = vec![];
        let enriched = enrich(original.clone(), &mut posts);
        assert_eq!(enriched, original);
    }

    #[test]
    fn enrich_overwrites_only_derived_fields() {
        let original = competitor(2_000);
        let mut posts = vec![post("a", 101, 10, 0), post("b", 200, 21, 7)];
        let enriched = enrich(original.clone(), &mut posts);

        assert!((enriched.average_likes - 151.0).abs() < f64::EPSILON); // 150.5 rounds up
        assert!((enriched.average_comments - 16.0).abs() < f64::EPSILON); // 15.5 rounds up
        assert!((enriched.engagement_rate - 8.3).abs() < 1e-9); // 166 / 2000 * 100
        assert!((enriched.posting_frequency - 2.0).abs() < f64::EPSILON);

        assert_eq!(enriched.id, original.id);
        assert_eq!(enriched.username, original.username);
        assert_eq!(enriched.followers, original.followers);
        assert!((enriched.growth_rate - original.growth_rate).abs() < f64::EPSILON);
    }

    #[test]
    fn enrich_stamps_competitor_id_on_posts() {
        let mut posts = vec![post("a", 1, 1, 0), post("b", 1, 1, 1)];
        let _ = enrich(competitor(100), &mut posts);
        assert!(posts.iter().all(|p| p.competitor_id == "c-1"));
    }
}
