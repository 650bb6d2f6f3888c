use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers::{self, UserHandlerState};
use crate::features::users::services::UserService;

/// Create routes for the users feature (all require authentication)
pub fn routes(user_service: Arc<UserService>) -> Router {
    let state = UserHandlerState { user_service };

    Router::new()
        .route("/api/users/me", get(handlers::get_me))
        .route("/api/users/me/badges", get(handlers::my_badges))
        .route("/api/users/leaderboard", get(handlers::leaderboard))
        .with_state(state)
}
