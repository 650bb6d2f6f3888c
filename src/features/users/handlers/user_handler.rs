use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{BadgeResponseDto, LeaderboardDto, ProfileDto};
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// State for user handlers
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Profile with rank, counts and badges", body = ApiResponse<ProfileDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(state): State<UserHandlerState>,
) -> Result<Json<ApiResponse<ProfileDto>>> {
    let profile = state.user_service.profile(user.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// List the authenticated user's badges
#[utoipa::path(
    get,
    path = "/api/users/me/badges",
    responses(
        (status = 200, description = "Earned badges, newest first", body = ApiResponse<Vec<BadgeResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn my_badges(
    user: AuthenticatedUser,
    State(state): State<UserHandlerState>,
) -> Result<Json<ApiResponse<Vec<BadgeResponseDto>>>> {
    let badges = state.user_service.badges(user.id).await?;
    Ok(Json(ApiResponse::success(Some(badges), None, None)))
}

/// Points leaderboard
#[utoipa::path(
    get,
    path = "/api/users/leaderboard",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Leaderboard page with caller rank", body = ApiResponse<LeaderboardDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn leaderboard(
    user: AuthenticatedUser,
    State(state): State<UserHandlerState>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<LeaderboardDto>>> {
    let (board, total) = state.user_service.leaderboard(user.id, &page).await?;
    Ok(Json(ApiResponse::success(
        Some(board),
        None,
        Some(Meta { total }),
    )))
}
