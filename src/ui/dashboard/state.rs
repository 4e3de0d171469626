//! Dashboard state management
//!
//! Contains the dashboard state struct and the enums it is rendered from

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::snapshot::SensorSnapshot;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Connection status derived from the most recent applied poll.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum ConnectionStatus {
    #[strum(to_string = "Connecting...")]
    Connecting,
    #[strum(to_string = "System Online")]
    SystemOnline,
    #[strum(to_string = "Backend Offline")]
    BackendOffline,
    /// Terminal for the session: only a configuration change clears it.
    #[strum(to_string = "Config Error: Missing URL")]
    ConfigError,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A blocking acknowledgement shown until the operator dismisses it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Dashboard state: owned by the dashboard screen, mutated only by poll and
/// command outcomes and by operator input, dropped on teardown.
#[derive(Debug)]
pub struct DashboardState {
    /// The backend the dashboard is connected to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Interval between two polls.
    pub poll_interval: Duration,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Animation tick counter
    pub tick: usize,

    status: ConnectionStatus,
    snapshot: SensorSnapshot,
    /// Local time of the last applied successful poll
    last_updated: Option<String>,
    /// Sequence number of the last applied poll outcome
    last_applied_seq: u64,
    /// Key of the selected node in the snapshot
    selected: Option<String>,
    notices: VecDeque<Notice>,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            poll_interval: ui_config.poll_interval,
            with_background_color: ui_config.with_background_color,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            status: ConnectionStatus::Connecting,
            snapshot: SensorSnapshot::default(),
            last_updated: None,
            last_applied_seq: 0,
            selected: None,
            notices: VecDeque::new(),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied_seq
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Node identifier commands for the selected card are addressed to.
    pub fn selected_target(&self) -> Option<String> {
        let key = self.selected.as_deref()?;
        Some(self.snapshot.command_target(key).to_string())
    }

    /// Notice currently blocking the dashboard, if any.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }

    // Setters used by the updaters

    pub(super) fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
    }

    pub(super) fn set_last_applied_seq(&mut self, seq: u64) {
        self.last_applied_seq = seq;
    }

    pub(super) fn set_last_updated(&mut self, time: String) {
        self.last_updated = Some(time);
    }

    /// Replaces the snapshot, keeping the selection on the same node when it
    /// still exists and on the same position otherwise.
    pub(super) fn replace_snapshot(&mut self, snapshot: SensorSnapshot) {
        let previous_index = self.selected_index();
        self.snapshot = snapshot;

        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|key| self.snapshot.nodes.contains_key(key));
        if still_present {
            return;
        }

        let count = self.snapshot.nodes.len();
        self.selected = if count == 0 {
            None
        } else {
            let index = previous_index.unwrap_or(0).min(count - 1);
            self.snapshot.nodes.keys().nth(index).cloned()
        };
    }

    pub(super) fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Dismisses the current notice. Returns whether one was pending.
    pub fn dismiss_notice(&mut self) -> bool {
        self.notices.pop_front().is_some()
    }

    /// Position of the selected node in display order.
    pub fn selected_index(&self) -> Option<usize> {
        let key = self.selected.as_ref()?;
        self.snapshot.nodes.keys().position(|k| k == key)
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_previous(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, step: isize) {
        let count = self.snapshot.nodes.len();
        if count == 0 {
            self.selected = None;
            return;
        }
        let index = match self.selected_index() {
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
            None => 0,
        };
        self.selected = self.snapshot.nodes.keys().nth(index).cloned();
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
