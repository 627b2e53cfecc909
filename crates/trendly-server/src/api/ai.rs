use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use trendly_ai::{AiResponse, AnalysisResult, ContentIdeas};
use trendly_core::{Competitor, Post, UserProfile, WeeklyStrategy};

use crate::middleware::RequestId;

use super::{json_body, ApiError, ApiResponse, AppState};

const ANALYZE_REQUIRED: &str = "Competitors and posts data required";
const PROFILE_REQUIRED: &str = "User profile and competitors required";
const DEFAULT_IDEA_COUNT: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeRequest {
    pub competitors: Option<Vec<Competitor>>,
    pub posts: Option<Vec<Post>>,
    pub user_profile: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ContentIdeasRequest {
    pub user_profile: Option<UserProfile>,
    pub competitors: Option<Vec<Competitor>>,
    pub top_posts: Option<Vec<Post>>,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StrategyRequest {
    pub user_profile: Option<UserProfile>,
    pub competitors: Option<Vec<Competitor>>,
}

pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AiResponse<AnalysisResult>>>, ApiError> {
    let request = json_body(&req_id.0, body, ANALYZE_REQUIRED)?;
    let (Some(competitors), Some(posts)) = (request.competitors, request.posts) else {
        return Err(ApiError::bad_request(req_id.0, ANALYZE_REQUIRED));
    };

    let response = trendly_ai::assemble_or_fallback(
        state.generator.as_ref(),
        &competitors,
        &posts,
        request.user_profile.as_ref(),
    )
    .await;
    Ok(Json(ApiResponse::new(response, req_id.0)))
}

pub(super) async fn content_ideas(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ContentIdeasRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AiResponse<ContentIdeas>>>, ApiError> {
    let request = json_body(&req_id.0, body, PROFILE_REQUIRED)?;
    let (Some(user), Some(competitors)) = (request.user_profile, request.competitors) else {
        return Err(ApiError::bad_request(req_id.0, PROFILE_REQUIRED));
    };
    let top_posts = request.top_posts.unwrap_or_default();
    let count = request.count.unwrap_or(DEFAULT_IDEA_COUNT);

    let response = trendly_ai::content_ideas_or_fallback(
        state.generator.as_ref(),
        &user,
        &competitors,
        &top_posts,
        count,
    )
    .await;
    Ok(Json(ApiResponse::new(response, req_id.0)))
}

pub(super) async fn strategy(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<StrategyRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AiResponse<WeeklyStrategy>>>, ApiError> {
    let request = json_body(&req_id.0, body, PROFILE_REQUIRED)?;
    let (Some(user), Some(competitors)) = (request.user_profile, request.competitors) else {
        return Err(ApiError::bad_request(req_id.0, PROFILE_REQUIRED));
    };

    let response =
        trendly_ai::weekly_strategy_or_fallback(state.generator.as_ref(), &user, &competitors)
            .await;
    Ok(Json(ApiResponse::new(response, req_id.0)))
}
