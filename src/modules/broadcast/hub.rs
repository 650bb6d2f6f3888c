use async_trait::async_trait;
use serde::Serialize;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// A single event pushed to live subscribers
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Fire-and-forget event publication. Callers never learn whether anyone
/// was listening; delivery is best effort by contract.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, payload: serde_json::Value);
}

/// In-process fan-out hub backed by per-subscriber bounded channels.
///
/// Slow subscribers get events dropped (`try_send`), disconnected ones are
/// pruned on the next publish. No persistence, no replay.
pub struct EventHub {
    subscribers: Mutex<Vec<mpsc::Sender<BroadcastEvent>>>,
    buffer: usize,
}

impl EventHub {
    pub fn new(buffer: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            buffer,
        }
    }

    /// Register a new subscriber and hand back its receiving end
    pub fn subscribe(&self) -> mpsc::Receiver<BroadcastEvent> {
        let (tx, rx) = mpsc::channel(self.buffer);
        self.subscribers.lock().unwrap().push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for EventHub {
    async fn publish(&self, topic: &str, payload: serde_json::Value) {
        let event = BroadcastEvent {
            topic: topic.to_string(),
            payload,
        };

        let mut subscribers = self.subscribers.lock().unwrap();
        let before = subscribers.len();
        subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            // Full buffer: drop this event for this subscriber, keep them
            Err(mpsc::error::TrySendError::Full(_)) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });

        let pruned = before - subscribers.len();
        if pruned > 0 {
            tracing::debug!("Pruned {} disconnected event subscribers", pruned);
        }
        tracing::debug!(
            "Published {} to {} subscribers",
            event.topic,
            subscribers.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let hub = EventHub::new(8);
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.publish("report.created", json!({"report_id": "abc"}))
            .await;

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.topic, "report.created");
        assert_eq!(e2.payload["report_id"], "abc");
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers_is_a_noop() {
        let hub = EventHub::new(8);
        hub.publish("report.created", json!({})).await;
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_disconnected_subscribers_are_pruned() {
        let hub = EventHub::new(8);
        let rx = hub.subscribe();
        drop(rx);

        hub.publish("report.created", json!({})).await;
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_full_buffer_drops_event_but_keeps_subscriber() {
        let hub = EventHub::new(1);
        let mut rx = hub.subscribe();

        hub.publish("report.created", json!({"n": 1})).await;
        hub.publish("report.created", json!({"n": 2})).await;

        // Second event was dropped; subscriber still registered
        assert_eq!(rx.recv().await.unwrap().payload["n"], 1);
        assert_eq!(hub.subscriber_count(), 1);
    }
}
