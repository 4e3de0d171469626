//! Realtime polling
//!
//! `Poller::refresh` performs a single poll; `Poller::spawn` repeats it on a
//! fixed interval until the returned `PollHandle` is shut down or dropped.

use super::core::EventSender;
use crate::backend::Backend;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType, PollOutcome, Update};
use crate::logging::LogLevel;
use chrono::Local;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Issues realtime polls and reports their outcome as events.
///
/// Every poll is tagged with a sequence number taken when the request starts,
/// so the UI can drop answers that arrive after a newer one was applied.
#[derive(Clone)]
pub struct Poller {
    backend: Arc<dyn Backend>,
    event_sender: EventSender,
    next_seq: Arc<AtomicU64>,
    classifier: ErrorClassifier,
}

impl Poller {
    pub fn new(backend: Arc<dyn Backend>, event_sender: EventSender) -> Self {
        Self {
            backend,
            event_sender,
            next_seq: Arc::new(AtomicU64::new(0)),
            classifier: ErrorClassifier::new(),
        }
    }

    /// Polls the realtime endpoint once and reports the outcome.
    ///
    /// Returns the sequence number of this poll.
    pub async fn refresh(&self) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;

        // An unusable address short-circuits before any request is built
        if let Err(e) = self.backend.environment().base_url() {
            self.event_sender
                .send_poll_event(
                    format!("Config error: {}", e),
                    EventType::Error,
                    LogLevel::Error,
                    Update::Poll {
                        seq,
                        outcome: PollOutcome::ConfigError(e.to_string()),
                    },
                )
                .await;
            return seq;
        }

        match self.backend.get_realtime().await {
            Ok(snapshot) => {
                let msg = format!("Realtime data for {} node(s)", snapshot.node_count());
                let completed_at = Local::now().format("%H:%M:%S").to_string();
                self.event_sender
                    .send_poll_event(
                        msg,
                        EventType::Success,
                        LogLevel::Debug,
                        Update::Poll {
                            seq,
                            outcome: PollOutcome::Snapshot {
                                snapshot,
                                completed_at,
                            },
                        },
                    )
                    .await;
            }
            Err(e) => {
                let (outcome, log_level) = if e.is_config() {
                    (PollOutcome::ConfigError(e.to_string()), LogLevel::Error)
                } else {
                    (
                        PollOutcome::Offline(e.to_string()),
                        self.classifier.classify_backend_error(&e),
                    )
                };
                self.event_sender
                    .send_poll_event(
                        format!("Backend offline: {}", e),
                        EventType::Error,
                        log_level,
                        Update::Poll { seq, outcome },
                    )
                    .await;
            }
        }
        seq
    }

    /// Operator-triggered poll, logged before it runs.
    pub async fn manual_refresh(&self) -> u64 {
        self.event_sender
            .send_event(Event::poller_with_level(
                "Manual refresh".to_string(),
                EventType::Refresh,
                LogLevel::Info,
            ))
            .await;
        self.refresh().await
    }

    /// Polls immediately, then once per `interval`.
    ///
    /// Each tick's request runs on its own task so a slow answer never holds
    /// back the next tick.
    pub fn spawn(&self, interval: Duration) -> PollHandle {
        let token = CancellationToken::new();
        let loop_token = token.clone();
        let poller = self.clone();

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = loop_token.cancelled() => break,
                    _ = ticker.tick() => {
                        let poller = poller.clone();
                        let request_token = loop_token.clone();
                        tokio::spawn(async move {
                            tokio::select! {
                                biased;
                                _ = request_token.cancelled() => {}
                                _ = poller.refresh() => {}
                            }
                        });
                    }
                }
            }
        });

        PollHandle {
            token,
            join: Some(join),
        }
    }
}

/// Owner of a running poll loop.
///
/// Shutting the handle down (or dropping it) stops the timer and abandons any
/// poll still in flight; no poll is issued afterwards.
pub struct PollHandle {
    token: CancellationToken,
    join: Option<JoinHandle<()>>,
}

impl PollHandle {
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Stops polling and waits for the loop to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
