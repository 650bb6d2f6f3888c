use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};

use crate::modules::broadcast::EventHub;

/// State for event handlers
#[derive(Clone)]
pub struct EventsState {
    pub hub: Arc<EventHub>,
}

/// Live event stream (SSE). Emits `report.created` and
/// `report.status_changed` events as they happen; no history, no replay.
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Server-sent event stream", content_type = "text/event-stream")
    ),
    tag = "events"
)]
pub async fn subscribe(
    State(state): State<EventsState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.hub.subscribe();
    tracing::debug!("New live event subscriber connected");

    let stream = ReceiverStream::new(rx).filter_map(|event| {
        match Event::default().event(&event.topic).json_data(&event.payload) {
            Ok(sse_event) => Some(Ok(sse_event)),
            Err(e) => {
                tracing::warn!("Failed to encode event {}: {}", event.topic, e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
