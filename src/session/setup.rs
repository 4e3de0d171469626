//! Session setup and initialization

use crate::backend::{Backend, BackendClient, error::BackendError};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::workers::{CommandDispatcher, EventSender, Poller};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Session data shared by the TUI, headless and one-shot modes
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// The backend every worker talks to
    pub backend: Arc<dyn Backend>,
    pub poller: Poller,
    pub dispatcher: CommandDispatcher,
    pub poll_interval: Duration,
}

impl SessionData {
    pub fn environment(&self) -> &Environment {
        self.backend.environment()
    }
}

/// Wires a backend to a poller and a command dispatcher over one event channel.
pub fn build_session(backend: Arc<dyn Backend>, poll_interval: Duration) -> SessionData {
    let (sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let event_sender = EventSender::new(sender);

    SessionData {
        event_receiver,
        poller: Poller::new(backend.clone(), event_sender.clone()),
        dispatcher: CommandDispatcher::new(backend.clone(), event_sender),
        backend,
        poll_interval,
    }
}

/// Sets up a session against the HTTP backend at `env`.
///
/// An unusable address is not rejected here: the first poll reports it as a
/// configuration error so the dashboard can show it.
pub fn setup_session(
    env: Environment,
    poll_interval: Duration,
) -> Result<SessionData, BackendError> {
    let client = BackendClient::new(env)?;
    Ok(build_session(Arc::new(client), poll_interval))
}
