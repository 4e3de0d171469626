//! Dashboard state update logic
//!
//! Applies worker events to the dashboard state

use super::state::{ConnectionStatus, DashboardState, Notice, NoticeKind};

use crate::events::{CommandOutcome, Event as WorkerEvent, PollOutcome, Update};
use crate::snapshot::Command;
use crate::workers::commander::DISPATCH_FAILED;

impl DashboardState {
    /// Advance the animation tick and apply every queued event.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            if event.should_display() {
                self.add_to_activity_log(event);
            }
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: &WorkerEvent) {
        match &event.update {
            Some(Update::Poll { seq, outcome }) => {
                self.apply_poll(*seq, outcome.clone());
            }
            Some(Update::Command { command, outcome }) => self.apply_command(command, outcome),
            None => {}
        }
    }

    /// Applies the outcome of poll `seq`. Returns whether it changed the state.
    ///
    /// Outcomes older than the last applied one are dropped, and nothing is
    /// applied once the configuration has been found unusable.
    pub fn apply_poll(&mut self, seq: u64, outcome: PollOutcome) -> bool {
        if self.status() == ConnectionStatus::ConfigError {
            return false;
        }
        if seq <= self.last_applied_seq() {
            return false;
        }
        self.set_last_applied_seq(seq);

        match outcome {
            PollOutcome::Snapshot {
                snapshot,
                completed_at,
            } => {
                self.replace_snapshot(snapshot);
                self.set_last_updated(completed_at);
                self.set_status(ConnectionStatus::SystemOnline);
            }
            // The previous snapshot stays on screen
            PollOutcome::Offline(_) => self.set_status(ConnectionStatus::BackendOffline),
            PollOutcome::ConfigError(_) => self.set_status(ConnectionStatus::ConfigError),
        }
        true
    }

    /// Queues the acknowledgement for a dispatched command.
    pub fn apply_command(&mut self, command: &Command, outcome: &CommandOutcome) {
        let notice = match outcome {
            CommandOutcome::Sent => Notice {
                kind: NoticeKind::Success,
                message: format!("Sent: {}", command),
            },
            CommandOutcome::Failed(_) => Notice {
                kind: NoticeKind::Failure,
                message: DISPATCH_FAILED.to_string(),
            },
        };
        self.push_notice(notice);
    }
}
