//! Error handling for the backend module

use crate::environment::AddressError;
use crate::snapshot::SnapshotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend address is missing, a placeholder, or not an absolute URL.
    #[error("Config error: {0}")]
    Config(#[from] AddressError),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body does not have the expected shape.
    #[error("Decoding error: {0}")]
    Decode(String),

    /// The backend processed the request but refused it.
    #[error("Rejected by backend: {0}")]
    Rejected(String),
}

impl From<SnapshotError> for BackendError {
    fn from(error: SnapshotError) -> Self {
        BackendError::Decode(error.to_string())
    }
}

impl BackendError {
    pub async fn from_response(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        BackendError::Http { status, message }
    }

    /// Whether the error comes from configuration rather than the network.
    pub fn is_config(&self) -> bool {
        matches!(self, BackendError::Config(_))
    }
}
