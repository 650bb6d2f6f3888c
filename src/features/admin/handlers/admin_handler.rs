use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::{SetAdminDto, StatsDto};
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::UserResponseDto;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// State for admin handlers
#[derive(Clone)]
pub struct AdminState {
    pub admin_service: Arc<AdminService>,
}

/// Platform statistics (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Platform counters and breakdowns", body = ApiResponse<StatsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an administrator")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn get_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<StatsDto>>> {
    let stats = state.admin_service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of users, newest first", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an administrator")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AdminState>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let (users, total) = state.admin_service.list_users(&page).await?;
    let dtos: Vec<UserResponseDto> = users.into_iter().map(|u| u.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Grant or revoke a user's admin flag (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/admin",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = SetAdminDto,
    responses(
        (status = 200, description = "Admin flag updated", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn set_admin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AdminState>,
    Path(id): Path<uuid::Uuid>,
    AppJson(dto): AppJson<SetAdminDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = state.admin_service.set_admin(id, dto.is_admin).await?;
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}
