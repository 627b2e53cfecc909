use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use trendly_instagram::{EnrichedProfile, ProfileSearchResult};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ProfileQuery {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    pub results: Vec<ProfileSearchResult>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ApiResponse<EnrichedProfile>>, ApiError> {
    let Some(username) = present(query.username) else {
        return Err(ApiError::bad_request(req_id.0, "Username is required"));
    };

    match state.instagram.fetch_enriched_profile(&username).await {
        Ok(Some(profile)) => Ok(Json(ApiResponse::new(profile, req_id.0))),
        Ok(None) => Err(ApiError::new(
            req_id.0,
            "not_found",
            "Could not fetch profile. Check API key and username.",
        )),
        Err(e) => {
            tracing::error!(username = %username, error = %e, "instagram profile lookup failed");
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                "Failed to fetch Instagram data",
            ))
        }
    }
}

pub(super) async fn search_users(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    let Some(q) = present(query.q) else {
        return Err(ApiError::bad_request(req_id.0, "Search query is required"));
    };

    match state.instagram.search_users(&q).await {
        Ok(results) => Ok(Json(ApiResponse::new(SearchData { results }, req_id.0))),
        Err(e) => {
            tracing::error!(query = %q, error = %e, "instagram search failed");
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                "Failed to search Instagram users",
            ))
        }
    }
}
