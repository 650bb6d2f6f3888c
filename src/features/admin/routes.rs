use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::admin::handlers::{self, AdminState};
use crate::features::admin::services::AdminService;

/// Create routes for the admin feature (admin flag enforced per handler)
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    let state = AdminState { admin_service };

    Router::new()
        .route("/api/admin/stats", get(handlers::get_stats))
        .route("/api/admin/users", get(handlers::list_users))
        .route("/api/admin/users/{id}/admin", patch(handlers::set_admin))
        .with_state(state)
}
