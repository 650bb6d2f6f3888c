mod hub;

pub use hub::{BroadcastEvent, EventHub, Notifier};
