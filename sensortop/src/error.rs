//! Error kinds surfaced to the user. Both are recovered locally and shown as a single message.

use thiserror::Error;

/// Rejected window-size input from the limit prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("limit must be a whole number, got '{0}'")]
    NotANumber(String),
    #[error("limit must be greater than zero, got {0}")]
    NotPositive(i64),
    #[error("limit {0} is too large")]
    OutOfRange(String),
}

/// A failed poll against the reading service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("failed to fetch readings: HTTP {0}")]
    Status(u16),
    #[error("failed to fetch readings: {0}")]
    Transport(String),
    #[error("unexpected response from reading service: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return FetchError::Status(status.as_u16());
        }
        if e.is_decode() {
            return FetchError::Decode(e.to_string());
        }
        FetchError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl MonitorError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, MonitorError::Fetch(_))
    }
}
