use crate::backend::error::BackendError;
use crate::environment::Environment;
use crate::snapshot::{Command, LimitUpdate, Limits, SensorSnapshot};

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch the latest reading of every node.
    async fn get_realtime(&self) -> Result<SensorSnapshot, BackendError>;

    /// Send a one-shot command to a node. Only transport failures are reported.
    async fn send_command(&self, command: &Command) -> Result<(), BackendError>;

    /// Update the alert thresholds of a node.
    async fn set_limits(&self, update: &LimitUpdate) -> Result<Limits, BackendError>;
}
