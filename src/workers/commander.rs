//! Command dispatch
//!
//! Fire-and-forget commands: one request per dispatch, no retries, no
//! deduplication and no cancellation.

use super::core::EventSender;
use crate::backend::Backend;
use crate::error_classifier::ErrorClassifier;
use crate::events::{CommandOutcome, EventType, Update};
use crate::logging::LogLevel;
use crate::snapshot::Command;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Notice shown when a dispatch fails.
pub const DISPATCH_FAILED: &str = "Failed to send command";

#[derive(Clone)]
pub struct CommandDispatcher {
    backend: Arc<dyn Backend>,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl CommandDispatcher {
    pub fn new(backend: Arc<dyn Backend>, event_sender: EventSender) -> Self {
        Self {
            backend,
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Sends one command and reports the outcome as an event.
    pub async fn send_command(&self, device: &str, action: &str) -> CommandOutcome {
        let command = Command::new(device, action);
        match self.backend.send_command(&command).await {
            Ok(()) => {
                self.event_sender
                    .send_command_event(
                        format!("Sent: {}", command),
                        EventType::Success,
                        LogLevel::Info,
                        Update::Command {
                            command,
                            outcome: CommandOutcome::Sent,
                        },
                    )
                    .await;
                CommandOutcome::Sent
            }
            Err(e) => {
                let outcome = CommandOutcome::Failed(e.to_string());
                self.event_sender
                    .send_command_event(
                        format!("{}: {}", DISPATCH_FAILED, e),
                        EventType::Error,
                        self.classifier.classify_backend_error(&e),
                        Update::Command {
                            command,
                            outcome: outcome.clone(),
                        },
                    )
                    .await;
                outcome
            }
        }
    }

    /// Sends the command on a detached task so the UI loop never waits on it.
    pub fn dispatch(&self, device: &str, action: &str) -> JoinHandle<CommandOutcome> {
        let dispatcher = self.clone();
        let device = device.to_string();
        let action = action.to_string();
        tokio::spawn(async move { dispatcher.send_command(&device, &action).await })
    }
}
