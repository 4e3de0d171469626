//! Event System
//!
//! Worker events and the state updates they carry to the UI thread

use crate::logging::{LogLevel, should_log_with_env};
use crate::snapshot::{Command, SensorSnapshot};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Worker {
    /// Worker that polls the realtime endpoint.
    Poller,
    /// Worker that dispatches commands to nodes.
    Commander,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
}

/// Result of a single realtime poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The backend answered; `completed_at` is the local wall-clock time.
    Snapshot {
        snapshot: SensorSnapshot,
        completed_at: String,
    },
    /// Network failure, non-success status or unusable body.
    Offline(String),
    /// The backend address is unusable; no request was made.
    ConfigError(String),
}

/// Result of a single command dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Sent,
    Failed(String),
}

/// State change carried by an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Poll { seq: u64, outcome: PollOutcome },
    Command { command: Command, outcome: CommandOutcome },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Optional payload applied to the dashboard state
    pub update: Option<Update>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            update: None,
        }
    }

    pub fn poller_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Poller, msg, event_type, log_level)
    }

    pub fn commander_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Commander, msg, event_type, log_level)
    }

    pub fn with_update(mut self, update: Update) -> Self {
        self.update = Some(update);
        self
    }

    pub fn should_display(&self) -> bool {
        if self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.worker, self.msg
        )
    }
}
