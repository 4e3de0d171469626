//! One-shot operations behind the `snapshot`, `send` and `set-limits`
//! subcommands.

use super::SessionData;
use crate::backend::error::BackendError;
use crate::events::{CommandOutcome, PollOutcome, Update};
use crate::snapshot::{Command, LimitUpdate, Limits, SensorSnapshot, SnapshotError};
use crate::ui::dashboard::components::nodes::WAITING_TEXT;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Backend offline: {0}")]
    Offline(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to send command: {0}")]
    Dispatch(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] SnapshotError),

    #[error("Poll finished without reporting")]
    NoOutcome,
}

/// Polls once and returns the snapshot, or why it could not be fetched.
pub async fn fetch_snapshot(session: &mut SessionData) -> Result<SensorSnapshot, CommandError> {
    let seq = session.poller.refresh().await;
    while let Ok(event) = session.event_receiver.try_recv() {
        let Some(Update::Poll { seq: polled, outcome }) = event.update else {
            continue;
        };
        if polled != seq {
            continue;
        }
        return match outcome {
            PollOutcome::Snapshot { snapshot, .. } => Ok(snapshot),
            PollOutcome::Offline(reason) => Err(CommandError::Offline(reason)),
            PollOutcome::ConfigError(reason) => Err(CommandError::Config(reason)),
        };
    }
    Err(CommandError::NoOutcome)
}

/// Text rendering of a snapshot, one line per node.
pub fn snapshot_lines(snapshot: &SensorSnapshot) -> Vec<String> {
    let mut lines: Vec<String> = snapshot
        .nodes
        .values()
        .map(|reading| reading.to_string())
        .collect();
    if lines.is_empty() {
        lines.push(WAITING_TEXT.to_string());
    }
    if let Some(users) = snapshot.format_users() {
        lines.push(format!("Users: {}", users));
    }
    lines
}

/// Sends one command and waits for the transport to finish.
pub async fn send_command(
    session: &SessionData,
    device: &str,
    action: &str,
) -> Result<Command, CommandError> {
    match session.dispatcher.send_command(device, action).await {
        CommandOutcome::Sent => Ok(Command::new(device, action)),
        CommandOutcome::Failed(reason) => Err(CommandError::Dispatch(reason)),
    }
}

/// Validates and submits new thresholds for `device`.
pub async fn set_limits(
    session: &SessionData,
    device: &str,
    temp_th: Option<f64>,
    gas_th: Option<f64>,
) -> Result<Limits, CommandError> {
    let update = LimitUpdate::new(device, temp_th, gas_th)?;
    Ok(session.backend.set_limits(&update).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::environment::Environment;
    use crate::session::setup::{build_session, setup_session};
    use crate::snapshot::actions;
    use mockall::predicate::eq;
    use serde_json::{Number, json};
    use std::sync::Arc;
    use std::time::Duration;

    fn session_with(backend: MockBackend) -> SessionData {
        build_session(Arc::new(backend), Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_fetch_snapshot_returns_readings() {
        let mut backend = MockBackend::new();
        backend.expect_environment().return_const(Environment::Local);
        backend.expect_get_realtime().returning(|| {
            Ok(SensorSnapshot::from_json(json!({"kitchen": {"node": "kitchen", "temp": 22.5}}))?)
        });
        let mut session = session_with(backend);

        let snapshot = fetch_snapshot(&mut session).await.unwrap();
        assert_eq!(
            snapshot_lines(&snapshot),
            vec!["kitchen [--] temp 22.5°C | gas -- | limits -- / --".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_snapshot_reports_offline_and_config() {
        let mut backend = MockBackend::new();
        backend.expect_environment().return_const(Environment::Local);
        backend
            .expect_get_realtime()
            .returning(|| Err(BackendError::Decode("not json".to_string())));
        let mut session = session_with(backend);
        assert!(matches!(
            fetch_snapshot(&mut session).await,
            Err(CommandError::Offline(_))
        ));

        let mut backend = MockBackend::new();
        backend.expect_environment().return_const(Environment::Custom {
            api_url: String::new(),
        });
        backend.expect_get_realtime().times(0);
        let mut session = session_with(backend);
        assert!(matches!(
            fetch_snapshot(&mut session).await,
            Err(CommandError::Config(_))
        ));
    }

    #[test]
    fn test_snapshot_lines_for_users_shape() {
        let snapshot = SensorSnapshot::from_json(json!({"users": ["admin"]})).unwrap();
        assert_eq!(
            snapshot_lines(&snapshot),
            vec![WAITING_TEXT.to_string(), "Users: admin".to_string()]
        );
    }

    #[tokio::test]
    async fn test_send_command_outcomes() {
        let mut backend = MockBackend::new();
        backend
            .expect_send_command()
            .with(eq(Command::new("kitchen", actions::LIGHT_ON)))
            .times(1)
            .returning(|_| Ok(()));
        backend
            .expect_send_command()
            .with(eq(Command::new("garage", actions::LIGHT_OFF)))
            .times(1)
            .returning(|_| Err(BackendError::Decode("reset".to_string())));
        let session = session_with(backend);

        let sent = send_command(&session, "kitchen", actions::LIGHT_ON)
            .await
            .unwrap();
        assert_eq!(sent.to_string(), "LIGHT_ON to kitchen");

        let failed = send_command(&session, "garage", actions::LIGHT_OFF).await;
        assert!(matches!(failed, Err(CommandError::Dispatch(_))));
    }

    async fn closed_port_session() -> SessionData {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let env = Environment::Custom {
            api_url: format!("http://{}", addr),
        };
        setup_session(env, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_send_command_to_closed_port_is_dispatch_error() {
        let session = closed_port_session().await;

        let failed = send_command(&session, "garage", actions::LIGHT_OFF).await;
        match failed {
            Err(CommandError::Dispatch(reason)) => assert!(reason.starts_with("Reqwest error")),
            other => panic!("expected a dispatch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_snapshot_from_closed_port_is_offline() {
        let mut session = closed_port_session().await;
        assert!(matches!(
            fetch_snapshot(&mut session).await,
            Err(CommandError::Offline(_))
        ));
    }

    #[tokio::test]
    // An update without thresholds never reaches the backend.
    async fn test_set_limits_requires_threshold() {
        let mut backend = MockBackend::new();
        backend.expect_set_limits().times(0);
        let session = session_with(backend);

        let result = set_limits(&session, "kitchen", None, None).await;
        assert!(matches!(
            result,
            Err(CommandError::InvalidInput(SnapshotError::NoThreshold))
        ));
    }

    #[tokio::test]
    async fn test_set_limits_returns_applied_limits() {
        let mut backend = MockBackend::new();
        backend
            .expect_set_limits()
            .times(1)
            .returning(|update| {
                Ok(Limits {
                    temp_th: update.temp_th.and_then(Number::from_f64),
                    gas_th: Some(Number::from(1)),
                })
            });
        let session = session_with(backend);

        let limits = set_limits(&session, "kitchen", Some(28.5), None)
            .await
            .unwrap();
        assert_eq!(limits.to_string(), "Max Temp 28.5°C | Max Gas 1V");
    }
}
