use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportIntakeService;
use crate::modules::storage::FileStore;

/// Create routes for the reports feature.
///
/// All routes require authentication; the status transition additionally
/// requires the admin flag (enforced in the handler).
pub fn routes(intake: Arc<ReportIntakeService>, files: Arc<dyn FileStore>) -> Router {
    let state = ReportState { intake, files };

    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/api/reports/me", get(handlers::my_reports))
        .route("/api/reports/{id}", get(handlers::get_report))
        .route(
            "/api/reports/{id}/status",
            patch(handlers::update_report_status),
        )
        .with_state(state)
}
