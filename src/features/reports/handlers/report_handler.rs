use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    CreateReportDto, ReportListQuery, ReportResponseDto, UpdateReportStatusDto,
};
use crate::features::reports::models::ReportFilter;
use crate::features::reports::services::{ReportIntakeService, ReportSubmission};
use crate::modules::storage::FileStore;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub intake: Arc<ReportIntakeService>,
    pub files: Arc<dyn FileStore>,
}

/// Submit a new report (multipart: text fields plus optional `image` part)
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body(content = CreateReportDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Duplicate of a recent nearby report")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut address: Option<String> = None;
    let mut image_reference: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("title") => title = Some(read_text(field).await?),
            Some("description") => description = Some(read_text(field).await?),
            Some("latitude") => latitude = Some(read_f64(field, "Latitude").await?),
            Some("longitude") => longitude = Some(read_f64(field, "Longitude").await?),
            Some("address") => address = Some(read_text(field).await?),
            Some("image") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read image upload: {}", e))
                })?;
                if !data.is_empty() {
                    image_reference = Some(state.files.store(data.to_vec(), &content_type).await?);
                }
            }
            _ => {}
        }
    }

    let dto = CreateReportDto {
        title: title.ok_or_else(|| AppError::Validation("Title is required".to_string()))?,
        description: description
            .ok_or_else(|| AppError::Validation("Description is required".to_string()))?,
        latitude: latitude
            .ok_or_else(|| AppError::Validation("Latitude is required".to_string()))?,
        longitude: longitude
            .ok_or_else(|| AppError::Validation("Longitude is required".to_string()))?,
        address,
    };
    dto.validate()?;

    let report = state
        .intake
        .submit(ReportSubmission {
            author_id: user.id,
            title: dto.title,
            description: dto.description,
            latitude: dto.latitude,
            longitude: dto.longitude,
            address: dto.address,
            image_reference,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report.into()),
            Some("Report created successfully".to_string()),
            None,
        )),
    ))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart field: {}", e)))
}

async fn read_f64(field: axum::extract::multipart::Field<'_>, label: &str) -> Result<f64> {
    let text = read_text(field).await?;
    text.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a number", label)))
}

/// List reports, filterable by status, category and priority
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Page of reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let (reports, total) = state
        .intake
        .list(&query.filter(), &query.pagination())
        .await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// List the authenticated user's own reports
#[utoipa::path(
    get,
    path = "/api/reports/me",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of the user's reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn my_reports(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let filter = ReportFilter {
        author_id: Some(user.id),
        ..Default::default()
    };
    let (reports, total) = state.intake.list(&filter, &page).await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.intake.get(id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Update report status (admin only)
#[utoipa::path(
    patch,
    path = "/api/reports/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Unknown status value"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn update_report_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.intake.update_status(id, &dto.status).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::gamification::BadgeService;
    use crate::features::reports::routes;
    use crate::shared::test_helpers::{
        test_user, InMemoryBadgeStore, InMemoryReportStore, InMemoryUserStore, NullFileStore,
        RecordingNotifier,
    };
    use axum::Extension;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;

    fn server_for(user: AuthenticatedUser) -> (Arc<InMemoryReportStore>, TestServer) {
        let reports = Arc::new(InMemoryReportStore::new());
        let users = Arc::new(InMemoryUserStore::new());
        let badges = Arc::new(InMemoryBadgeStore::new());
        let notifier = Arc::new(RecordingNotifier::new());

        let mut row = test_user(&user.email);
        row.id = user.id;
        row.is_admin = user.is_admin;
        users.seed(row);

        let badge_service = Arc::new(BadgeService::new(
            reports.clone(),
            users.clone(),
            badges.clone(),
        ));
        let intake = Arc::new(ReportIntakeService::new(
            reports.clone(),
            users.clone(),
            badge_service,
            notifier,
        ));

        let app = routes::routes(intake, Arc::new(NullFileStore)).layer(Extension(user));
        (reports, TestServer::new(app).unwrap())
    }

    fn citizen() -> AuthenticatedUser {
        AuthenticatedUser {
            id: uuid::Uuid::new_v4(),
            email: "citizen@example.com".to_string(),
            name: "Citizen".to_string(),
            is_admin: false,
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            id: uuid::Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            is_admin: true,
        }
    }

    fn pothole_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("title", "Pothole near the market")
            .add_text("description", "Large pothole damaging vehicles")
            .add_text("latitude", "28.6139")
            .add_text("longitude", "77.2090")
    }

    #[tokio::test]
    async fn test_create_report_returns_created_with_triage() {
        let (_, server) = server_for(citizen());

        let response = server.post("/api/reports").multipart(pothole_form()).await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["category"], "pothole");
        assert_eq!(body["data"]["priority"], "medium");
        assert_eq!(body["data"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_create_report_with_image_stores_reference() {
        let (_, server) = server_for(citizen());

        let form = pothole_form().add_part(
            "image",
            Part::bytes(vec![0xffu8, 0xd8, 0xff]).mime_type("image/jpeg"),
        );
        let response = server.post("/api/reports").multipart(form).await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        let reference = body["data"]["image_reference"].as_str().unwrap();
        assert!(reference.starts_with("reports/"));
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_conflict_with_match() {
        let (_, server) = server_for(citizen());

        server.post("/api/reports").multipart(pothole_form()).await;

        let form = MultipartForm::new()
            .add_text("title", "Another pothole")
            .add_text("description", "Pothole in the road again")
            .add_text("latitude", "28.6140")
            .add_text("longitude", "77.2091");
        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(axum::http::StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "DUPLICATE_REPORT");
        assert_eq!(body["data"]["category"], "pothole");
    }

    #[tokio::test]
    async fn test_create_report_missing_fields_is_validation_error() {
        let (_, server) = server_for(citizen());

        let form = MultipartForm::new().add_text("title", "Pothole");
        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_status_update_requires_admin() {
        let (reports, server) = server_for(citizen());
        server.post("/api/reports").multipart(pothole_form()).await;
        let id = reports.all()[0].id;

        let response = server
            .patch(&format!("/api/reports/{}/status", id))
            .json(&serde_json::json!({"status": "resolved"}))
            .await;
        response.assert_status(axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_status_update_and_invalid_value() {
        let (reports, server) = server_for(admin());
        server.post("/api/reports").multipart(pothole_form()).await;
        let id = reports.all()[0].id;

        let response = server
            .patch(&format!("/api/reports/{}/status", id))
            .json(&serde_json::json!({"status": "in-progress"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "in-progress");

        let response = server
            .patch(&format!("/api/reports/{}/status", id))
            .json(&serde_json::json!({"status": "closed"}))
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_STATUS");
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let (reports, server) = server_for(admin());
        server.post("/api/reports").multipart(pothole_form()).await;
        let id = reports.all()[0].id;
        server
            .patch(&format!("/api/reports/{}/status", id))
            .json(&serde_json::json!({"status": "resolved"}))
            .await;

        let response = server.get("/api/reports").add_query_param("status", "pending").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["meta"]["total"], 0);

        let response = server.get("/api/reports").add_query_param("status", "resolved").await;
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }
}
