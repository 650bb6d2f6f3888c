use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::events::handlers::{self, EventsState};
use crate::modules::broadcast::EventHub;

/// Create routes for the live event stream (public)
pub fn routes(hub: Arc<EventHub>) -> Router {
    let state = EventsState { hub };

    Router::new()
        .route("/api/events", get(handlers::subscribe))
        .with_state(state)
}
