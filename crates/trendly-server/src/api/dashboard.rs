use axum::{extract::rejection::JsonRejection, Extension, Json};
use serde::{Deserialize, Serialize};
use trendly_core::{
    analyze_gaps, best_posting_times, compare, content_type_metrics, dashboard_stats,
    hashtag_metrics, top_posts, ComparisonMetric, Competitor, ContentTypeMetrics, DashboardStats,
    GapAnalysis, HashtagMetrics, Post, TimingMetrics, UserProfile,
};

use crate::middleware::RequestId;

use super::{json_body, ApiError, ApiResponse};

const PROFILE_REQUIRED: &str = "User profile and competitors required";
const POSTS_REQUIRED: &str = "Competitors and posts data required";
const BEST_TIMES: usize = 5;
const TOP_HASHTAGS: usize = 20;
const TOP_POSTS: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProfileRequest {
    pub user_profile: Option<UserProfile>,
    pub competitors: Option<Vec<Competitor>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyticsRequest {
    pub competitors: Option<Vec<Competitor>>,
    pub posts: Option<Vec<Post>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyticsData {
    pub stats: DashboardStats,
    pub content_types: Vec<ContentTypeMetrics>,
    pub best_times: Vec<TimingMetrics>,
    pub hashtags: Vec<HashtagMetrics>,
    pub top_posts: Vec<Post>,
}

fn profile_and_tracked(
    req_id: &str,
    body: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<(UserProfile, Vec<Competitor>), ApiError> {
    let request = json_body(req_id, body, PROFILE_REQUIRED)?;
    let (Some(user), Some(competitors)) = (request.user_profile, request.competitors) else {
        return Err(ApiError::bad_request(req_id, PROFILE_REQUIRED));
    };
    let tracked = competitors.into_iter().filter(|c| c.is_tracked).collect();
    Ok((user, tracked))
}

pub(super) async fn comparison(
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<ComparisonMetric>>>, ApiError> {
    let (user, tracked) = profile_and_tracked(&req_id.0, body)?;
    Ok(Json(ApiResponse::new(compare(&user, &tracked), req_id.0)))
}

/// `data` is `null` when no competitor is tracked.
pub(super) async fn gaps(
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Option<Vec<GapAnalysis>>>>, ApiError> {
    let (user, tracked) = profile_and_tracked(&req_id.0, body)?;
    Ok(Json(ApiResponse::new(analyze_gaps(&user, &tracked), req_id.0)))
}

pub(super) async fn analytics(
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyticsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalyticsData>>, ApiError> {
    let request = json_body(&req_id.0, body, POSTS_REQUIRED)?;
    let (Some(competitors), Some(posts)) = (request.competitors, request.posts) else {
        return Err(ApiError::bad_request(req_id.0, POSTS_REQUIRED));
    };

    let mut hashtags = hashtag_metrics(&posts);
    hashtags.truncate(TOP_HASHTAGS);

    let data = AnalyticsData {
        stats: dashboard_stats(&competitors, &posts),
        content_types: content_type_metrics(&posts),
        best_times: best_posting_times(&posts, BEST_TIMES),
        hashtags,
        top_posts: top_posts(&posts, TOP_POSTS),
    };
    Ok(Json(ApiResponse::new(data, req_id.0)))
}
