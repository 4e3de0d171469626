//! Core worker utilities

use crate::events::{Event, EventType, Update};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event. A closed UI loop is not an error for workers.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_poll_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        update: Update,
    ) {
        self.send_event(
            Event::poller_with_level(message, event_type, log_level).with_update(update),
        )
        .await;
    }

    pub async fn send_command_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        update: Update,
    ) {
        self.send_event(
            Event::commander_with_level(message, event_type, log_level).with_update(update),
        )
        .await;
    }
}
