//! Response shapes of the RapidAPI Instagram provider.
//!
//! Only the fields the dashboard uses are modelled; everything else in the
//! payload is ignored.

use serde::{Deserialize, Serialize};

/// Every endpoint wraps its payload in `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub media_count: u64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawItems<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCaption {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: String,
    /// 1 = image, 2 = video, 8 = carousel.
    #[serde(default)]
    pub media_type: i64,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub caption: Option<RawCaption>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    /// Unix seconds.
    pub taken_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub follower_count: Option<u64>,
}

/// A user search hit, trimmed to what the search picker displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSearchResult {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub followers: u64,
}
