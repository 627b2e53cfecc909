use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("hashtag pattern is valid"));

/// Content format of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Image,
    Video,
    Carousel,
    Reel,
}

impl PostType {
    pub const ALL: [PostType; 4] = [
        PostType::Image,
        PostType::Video,
        PostType::Carousel,
        PostType::Reel,
    ];

    /// Map an Instagram `media_type` code (1 = image, 2 = video, 8 = carousel).
    ///
    /// Unknown codes fall back to `Image`.
    #[must_use]
    pub fn from_media_type(code: i64) -> Self {
        match code {
            2 => PostType::Video,
            8 => PostType::Carousel,
            _ => PostType::Image,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Image => "image",
            PostType::Video => "video",
            PostType::Carousel => "carousel",
            PostType::Reel => "reel",
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published item by a tracked account.
///
/// `engagement_rate` is derived from `likes`, `comments` and the owner's
/// follower count by [`crate::aggregate`]; `day_of_week` and `time_of_day`
/// are derived from `posted_at`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub id: String,
    pub competitor_id: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub thumbnail: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub engagement_rate: f64,
    pub posted_at: DateTime<Utc>,
    pub day_of_week: String,
    pub time_of_day: String,
}

impl Post {
    /// Build a post from raw counts, deriving hashtags and time labels.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        post_type: PostType,
        caption: impl Into<String>,
        likes: u64,
        comments: u64,
        posted_at: DateTime<Utc>,
    ) -> Self {
        let caption = caption.into();
        let hashtags = extract_hashtags(&caption);
        Self {
            id: id.into(),
            competitor_id: String::new(),
            post_type,
            thumbnail: String::new(),
            caption,
            hashtags,
            likes,
            comments,
            shares: 0,
            saves: 0,
            engagement_rate: 0.0,
            posted_at,
            day_of_week: day_of_week_label(posted_at),
            time_of_day: time_of_day_label(posted_at),
        }
    }

    /// Likes plus comments.
    #[must_use]
    pub fn interactions(&self) -> u64 {
        self.likes.saturating_add(self.comments)
    }
}

/// Full weekday name, e.g. `"Monday"`.
#[must_use]
pub fn day_of_week_label(ts: DateTime<Utc>) -> String {
    ts.format("%A").to_string()
}

/// 12-hour clock label without a leading zero, e.g. `"6:05 PM"`.
#[must_use]
pub fn time_of_day_label(ts: DateTime<Utc>) -> String {
    ts.format("%-I:%M %p").to_string()
}

/// Extract `#tag` tokens from a caption in order of appearance.
#[must_use]
pub fn extract_hashtags(caption: &str) -> Vec<String> {
    HASHTAG_RE
        .find_iter(caption)
        .map(|m| m.as_str().to_string())
        .collect()
}
