use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::events::handlers as events_handlers;
use crate::features::gamification::models as gamification_models;
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::my_reports,
        reports_handlers::get_report,
        reports_handlers::update_report_status,
        // Users
        users_handlers::get_me,
        users_handlers::my_badges,
        users_handlers::leaderboard,
        // Admin
        admin_handlers::get_stats,
        admin_handlers::list_users,
        admin_handlers::set_admin,
        // Events
        events_handlers::subscribe,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_models::ReportCategory,
            reports_models::ReportPriority,
            reports_models::ReportStatus,
            reports_dtos::CreateReportDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::ReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Users
            gamification_models::BadgeType,
            users_dtos::UserResponseDto,
            users_dtos::BadgeResponseDto,
            users_dtos::ProfileDto,
            users_dtos::LeaderboardEntryDto,
            users_dtos::LeaderboardDto,
            ApiResponse<users_dtos::ProfileDto>,
            ApiResponse<Vec<users_dtos::BadgeResponseDto>>,
            ApiResponse<users_dtos::LeaderboardDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Admin
            admin_dtos::StatsDto,
            admin_dtos::CategoryCountDto,
            admin_dtos::PriorityCountDto,
            admin_dtos::SetAdminDto,
            ApiResponse<admin_dtos::StatsDto>,
        )
    ),
    tags(
        (name = "reports", description = "Civic issue reports: intake, listing, status"),
        (name = "users", description = "Profiles, badges and the leaderboard"),
        (name = "admin", description = "Platform statistics and user management (admin only)"),
        (name = "events", description = "Live event stream"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicSense API",
        version = "0.1.0",
        description = "API documentation for CivicSense",
    )
)]
pub struct ApiDoc;

/// Adds Bearer security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
