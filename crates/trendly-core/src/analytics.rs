//! Post-level breakdowns for the analytics view.

use std::collections::HashMap;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::accounts::Competitor;
use crate::aggregate::round2;
use crate::posts::{Post, PostType};

/// Hashtags used at least this many times can be flagged as trending.
const TRENDING_MIN_USAGE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeMetrics {
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub count: usize,
    pub avg_engagement: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingMetrics {
    pub day: String,
    /// Hour of day, UTC.
    pub hour: u32,
    pub avg_engagement: f64,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagMetrics {
    pub hashtag: String,
    pub usage_count: usize,
    pub avg_engagement: f64,
    pub trending: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub tracked_competitors: usize,
    /// Combined followers of every competitor, tracked or not.
    pub combined_reach: u64,
    pub average_engagement: f64,
    pub posts_analyzed: usize,
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn by_engagement_desc(a: f64, b: f64) -> std::cmp::Ordering {
    b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
}

/// Per content type present in `posts`, sorted by average engagement.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn content_type_metrics(posts: &[Post]) -> Vec<ContentTypeMetrics> {
    let mut metrics: Vec<ContentTypeMetrics> = PostType::ALL
        .iter()
        .filter_map(|&post_type| {
            let group: Vec<&Post> = posts.iter().filter(|p| p.post_type == post_type).collect();
            if group.is_empty() {
                return None;
            }
            let count = group.len();
            let engagement: f64 = group.iter().map(|p| p.engagement_rate).sum();
            let likes: u64 = group.iter().map(|p| p.likes).sum();
            let comments: u64 = group.iter().map(|p| p.comments).sum();
            Some(ContentTypeMetrics {
                post_type,
                count,
                avg_engagement: round2(mean(engagement, count)),
                avg_likes: round2(mean(likes as f64, count)),
                avg_comments: round2(mean(comments as f64, count)),
            })
        })
        .collect();

    metrics.sort_by(|a, b| by_engagement_desc(a.avg_engagement, b.avg_engagement));
    metrics
}

/// Bucket posts by weekday and UTC hour, sorted by average engagement.
#[must_use]
pub fn timing_metrics(posts: &[Post]) -> Vec<TimingMetrics> {
    let mut buckets: Vec<(String, u32, f64, usize)> = Vec::new();
    let mut index: HashMap<(String, u32), usize> = HashMap::new();

    for post in posts {
        let key = (post.day_of_week.clone(), post.posted_at.hour());
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push((key.0, key.1, 0.0, 0));
            buckets.len() - 1
        });
        buckets[slot].2 += post.engagement_rate;
        buckets[slot].3 += 1;
    }

    let mut metrics: Vec<TimingMetrics> = buckets
        .into_iter()
        .map(|(day, hour, sum, post_count)| TimingMetrics {
            day,
            hour,
            avg_engagement: round2(mean(sum, post_count)),
            post_count,
        })
        .collect();

    metrics.sort_by(|a, b| by_engagement_desc(a.avg_engagement, b.avg_engagement));
    metrics
}

/// The `n` best weekday/hour slots.
#[must_use]
pub fn best_posting_times(posts: &[Post], n: usize) -> Vec<TimingMetrics> {
    let mut metrics = timing_metrics(posts);
    metrics.truncate(n);
    metrics
}

/// Per lowercase hashtag, sorted by average engagement.
///
/// A hashtag is trending when it appears on at least three posts and its
/// average engagement beats the average across all posts.
#[must_use]
pub fn hashtag_metrics(posts: &[Post]) -> Vec<HashtagMetrics> {
    let overall = mean(posts.iter().map(|p| p.engagement_rate).sum(), posts.len());

    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (f64, usize)> = HashMap::new();
    for post in posts {
        for tag in &post.hashtags {
            let tag = tag.to_lowercase();
            let entry = totals.entry(tag.clone()).or_insert_with(|| {
                order.push(tag);
                (0.0, 0)
            });
            entry.0 += post.engagement_rate;
            entry.1 += 1;
        }
    }

    let mut metrics: Vec<HashtagMetrics> = order
        .into_iter()
        .map(|hashtag| {
            let (sum, usage_count) = totals.get(&hashtag).copied().unwrap_or_default();
            let avg_engagement = mean(sum, usage_count);
            HashtagMetrics {
                trending: usage_count >= TRENDING_MIN_USAGE && avg_engagement > overall,
                avg_engagement: round2(avg_engagement),
                usage_count,
                hashtag,
            }
        })
        .collect();

    metrics.sort_by(|a, b| by_engagement_desc(a.avg_engagement, b.avg_engagement));
    metrics
}

/// The `limit` posts with the highest engagement rate.
#[must_use]
pub fn top_posts(posts: &[Post], limit: usize) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| by_engagement_desc(a.engagement_rate, b.engagement_rate));
    sorted.truncate(limit);
    sorted
}

/// Headline numbers for the dashboard overview.
#[must_use]
pub fn dashboard_stats(competitors: &[Competitor], posts: &[Post]) -> DashboardStats {
    let engagement: f64 = competitors.iter().map(|c| c.engagement_rate).sum();
    DashboardStats {
        tracked_competitors: competitors.iter().filter(|c| c.is_tracked).count(),
        combined_reach: competitors.iter().map(|c| c.followers).sum(),
        average_engagement: mean(engagement, competitors.len()),
        posts_analyzed: posts.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(post_type: PostType, caption: &str, engagement: f64, hour: u32) -> Post {
        // 2024-06-03 is a Monday.
        let posted_at = Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap();
        let mut p = Post::new("p", post_type, caption, 100, 10, posted_at);
        p.engagement_rate = engagement;
        p
    }

    #[test]
    fn content_types_sorted_by_engagement() {
        let posts = vec![
            post(PostType::Image, "", 2.0, 9),
            post(PostType::Reel, "", 6.0, 9),
            post(PostType::Reel, "", 4.0, 9),
        ];
        let metrics = content_type_metrics(&posts);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].post_type, PostType::Reel);
        assert_eq!(metrics[0].count, 2);
        assert!((metrics[0].avg_engagement - 5.0).abs() < 1e-9);
        assert!((metrics[0].avg_likes - 100.0).abs() < 1e-9);
        assert_eq!(metrics[1].post_type, PostType::Image);
    }

    #[test]
    fn timing_buckets_by_day_and_hour() {
        let posts = vec![
            post(PostType::Image, "", 2.0, 9),
            post(PostType::Image, "", 4.0, 9),
            post(PostType::Image, "", 8.0, 18),
        ];
        let metrics = timing_metrics(&posts);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].day, "Monday");
        assert_eq!(metrics[0].hour, 18);
        assert_eq!(metrics[1].post_count, 2);
        assert!((metrics[1].avg_engagement - 3.0).abs() < 1e-9);

        let best = best_posting_times(&posts, 1);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].hour, 18);
    }

    #[test]
    fn hashtags_are_case_insensitive_and_flag_trending() {
        let posts = vec![
            post(PostType::Image, "#Glow", 6.0, 9),
            post(PostType::Image, "#glow", 6.0, 9),
            post(PostType::Image, "#GLOW #skin", 6.0, 9),
            post(PostType::Image, "#skin", 1.0, 9),
            post(PostType::Image, "", 1.0, 9),
        ];
        let metrics = hashtag_metrics(&posts);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].hashtag, "#glow");
        assert_eq!(metrics[0].usage_count, 3);
        assert!(metrics[0].trending);
        assert_eq!(metrics[1].hashtag, "#skin");
        assert!(!metrics[1].trending);
    }

    #[test]
    fn top_posts_orders_and_limits() {
        let posts = vec![
            post(PostType::Image, "a", 1.0, 9),
            post(PostType::Image, "b", 3.0, 9),
            post(PostType::Image, "c", 2.0, 9),
        ];
        let top = top_posts(&posts, 2);
        let captions: Vec<&str> = top.iter().map(|p| p.caption.as_str()).collect();
        assert_eq!(captions, vec!["b", "c"]);
    }

    #[test]
    fn dashboard_stats_counts_tracked_and_reach() {
        let competitors = vec![
            Competitor {
                followers: 1_000,
                engagement_rate: 2.0,
                is_tracked: true,
                ..Competitor::default()
            },
            Competitor {
                followers: 3_000,
                engagement_rate: 4.0,
                ..Competitor::default()
            },
        ];
        let stats = dashboard_stats(&competitors, &[post(PostType::Image, "", 1.0, 9)]);
        assert_eq!(stats.tracked_competitors, 1);
        assert_eq!(stats.combined_reach, 4_000);
        assert!((stats.average_engagement - 3.0).abs() < 1e-9);
        assert_eq!(stats.posts_analyzed, 1);
    }

    #[test]
    fn dashboard_stats_empty_is_zero() {
        assert_eq!(dashboard_stats(&[], &[]), DashboardStats::default());
    }
}
